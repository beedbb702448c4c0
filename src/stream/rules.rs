pub mod embedded_url;
pub mod uri_line;

use super::context::TransformContext;

pub use embedded_url::EmbeddedUrlPass;
pub use uri_line::UriLinePass;

/// A whole-manifest rewrite.
///
/// A pass maps the input line by line: it never adds, removes or reorders
/// lines, and it never fails. A line it cannot handle is left as it was.
pub trait RewritePass: Send + Sync {
    fn name(&self) -> &'static str;

    /// Rewrite `input` and report how many lines changed.
    fn apply(&self, input: &str, context: &TransformContext) -> (String, usize);
}

/// Rewrite every line of `input` with `f`, keeping `\n` separators.
pub(crate) fn map_lines(input: &str, mut f: impl FnMut(&str) -> Option<String>) -> (String, usize) {
    let mut changed = 0;
    let lines: Vec<String> = input
        .split('\n')
        .map(|line| match f(line) {
            Some(rewritten) => {
                changed += 1;
                rewritten
            }
            None => line.to_string(),
        })
        .collect();

    (lines.join("\n"), changed)
}

/// Create the default set of passes, in the order they must run.
pub fn default_passes(rewrite_embedded_urls: bool) -> Vec<Box<dyn RewritePass>> {
    let mut passes: Vec<Box<dyn RewritePass>> = vec![Box::new(UriLinePass)];
    if rewrite_embedded_urls {
        passes.push(Box::new(EmbeddedUrlPass));
    }
    passes
}
