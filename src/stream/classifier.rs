/// Represents the type of a line in an M3U8 playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    Empty,
    /// `#EXT...` tag line.
    Tag,
    /// Any other `#` line.
    Comment,
    /// URI reference, absolute or relative.
    Uri,
}

impl LineType {
    pub fn is_uri(&self) -> bool {
        matches!(self, Self::Uri)
    }

    /// Tags and comments may carry URLs inside attribute values.
    pub fn is_hash_line(&self) -> bool {
        matches!(self, Self::Tag | Self::Comment)
    }
}

/// Classifier for M3U8 lines.
pub struct LineClassifier;

impl LineClassifier {
    /// The meaningful part of a line: surrounding whitespace and a leading
    /// byte-order mark removed.
    pub fn content(line: &str) -> &str {
        line.trim().trim_start_matches('\u{feff}')
    }

    /// Classify a line from an M3U8 playlist.
    pub fn classify(line: &str) -> LineType {
        let line = Self::content(line);

        if line.is_empty() {
            LineType::Empty
        } else if line.starts_with("#EXT") {
            LineType::Tag
        } else if line.starts_with('#') {
            LineType::Comment
        } else {
            LineType::Uri
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_tags() {
        assert_eq!(LineClassifier::classify("#EXTM3U"), LineType::Tag);
        assert_eq!(
            LineClassifier::classify("#EXT-X-STREAM-INF:BANDWIDTH=1000000"),
            LineType::Tag
        );
        assert_eq!(LineClassifier::classify("  #EXTINF:6.0,"), LineType::Tag);
    }

    #[test]
    fn test_classify_tag_after_byte_order_mark() {
        assert_eq!(LineClassifier::classify("\u{feff}#EXTM3U"), LineType::Tag);
        assert_eq!(LineClassifier::classify("\u{feff}#EXTM3U\r"), LineType::Tag);
        assert_eq!(LineClassifier::classify("\u{feff}"), LineType::Empty);
    }

    #[test]
    fn test_classify_uri() {
        assert_eq!(
            LineClassifier::classify("https://example.com/playlist.m3u8"),
            LineType::Uri
        );
        assert_eq!(LineClassifier::classify("segment001.ts"), LineType::Uri);
        assert_eq!(LineClassifier::classify(" /abs/seg.ts\r"), LineType::Uri);
    }

    #[test]
    fn test_classify_comment() {
        assert_eq!(
            LineClassifier::classify("# This is a comment"),
            LineType::Comment
        );
    }

    #[test]
    fn test_classify_empty() {
        assert_eq!(LineClassifier::classify(""), LineType::Empty);
        assert_eq!(LineClassifier::classify("  \r"), LineType::Empty);
    }
}
