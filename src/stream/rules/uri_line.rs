use super::{RewritePass, TransformContext, map_lines};
use crate::stream::classifier::LineClassifier;

/// Routes every URI line of a playlist through the relay.
///
/// Variant playlists, media segments and anything else on a line of its
/// own are treated alike; the relay decides per request whether the
/// response is another playlist.
pub struct UriLinePass;

impl UriLinePass {
    fn rewrite_line(line: &str, context: &TransformContext) -> Option<String> {
        if !LineClassifier::classify(line).is_uri() {
            return None;
        }

        match context.resolve_url(LineClassifier::content(line)) {
            Ok(resolved) => Some(context.proxy_url(&resolved)),
            Err(e) => {
                tracing::debug!("Keeping unresolvable URI line {:?}: {}", line, e);
                None
            }
        }
    }
}

impl RewritePass for UriLinePass {
    fn name(&self) -> &'static str {
        "uri-line"
    }

    fn apply(&self, input: &str, context: &TransformContext) -> (String, usize) {
        map_lines(input, |line| Self::rewrite_line(line, context))
    }
}
