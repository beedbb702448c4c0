use super::{context::TransformContext, rules::RewritePass};

/// Runs rewrite passes over a buffered M3U8 playlist.
pub struct StreamProcessor {
    context: TransformContext,
    passes: Vec<Box<dyn RewritePass>>,
}

impl StreamProcessor {
    pub fn new(context: TransformContext, passes: Vec<Box<dyn RewritePass>>) -> Self {
        Self { context, passes }
    }

    /// Process entire playlist content and return transformed content.
    ///
    /// Each pass sees the previous pass's output. Line count and order are
    /// preserved by every pass, so they are preserved overall.
    pub fn process(&self, input: &str) -> String {
        let mut content = input.to_string();

        for pass in &self.passes {
            let (output, changed) = pass.apply(&content, &self.context);
            tracing::debug!(
                pass = pass.name(),
                changed,
                "Rewrote manifest from {}",
                self.context.original_url
            );
            content = output;
        }

        content
    }

    /// Get context (for inspection/testing).
    pub fn context(&self) -> &TransformContext {
        &self.context
    }
}
