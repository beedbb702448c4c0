use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::{RewritePass, TransformContext, map_lines};
use crate::stream::classifier::LineClassifier;

static ABSOLUTE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s"'\n]+"#).expect("valid URL pattern"));

/// Routes absolute URLs found inside `#` lines through the relay, e.g. the
/// `URI="https://..."` attribute of `#EXT-X-KEY` or `#EXT-X-MEDIA`.
///
/// URI lines are left alone: they belong to [`super::UriLinePass`].
pub struct EmbeddedUrlPass;

impl EmbeddedUrlPass {
    fn rewrite_line(line: &str, context: &TransformContext) -> Option<String> {
        if !LineClassifier::classify(line).is_hash_line() || !ABSOLUTE_URL.is_match(line) {
            return None;
        }

        let rewritten = ABSOLUTE_URL.replace_all(line, |caps: &regex::Captures<'_>| {
            let found = &caps[0];
            match Url::parse(found) {
                Ok(url) => context.proxy_url(&url),
                Err(_) => found.to_string(),
            }
        });

        (rewritten != line).then(|| rewritten.into_owned())
    }
}

impl RewritePass for EmbeddedUrlPass {
    fn name(&self) -> &'static str {
        "embedded-url"
    }

    fn apply(&self, input: &str, context: &TransformContext) -> (String, usize) {
        map_lines(input, |line| Self::rewrite_line(line, context))
    }
}
