use std::sync::Arc;
use url::Url;

/// The relay's own endpoint, used to route rewritten URLs back through it.
#[derive(Debug, Clone)]
pub struct ProxyEndpoint {
    path: Arc<str>,
}

impl ProxyEndpoint {
    pub fn new(path: impl Into<Arc<str>>) -> Self {
        Self { path: path.into() }
    }

    /// Build `<path>?url=<target>` with the target percent-encoded as a
    /// single query value.
    pub fn wrap(&self, target: &Url) -> String {
        self.wrap_str(target.as_str())
    }

    pub(crate) fn wrap_str(&self, target: &str) -> String {
        format!("{}?url={}", self.path, urlencoding::encode(target))
    }

    /// Recover the target from a URL previously produced by [`wrap`](Self::wrap).
    pub fn unwrap_target(&self, proxied: &str) -> Option<String> {
        let query = proxied.strip_prefix(&*self.path)?.strip_prefix("?url=")?;
        urlencoding::decode(query).ok().map(|s| s.into_owned())
    }
}
