use crate::{Result, proxy::ProxyEndpoint};
use url::Url;

/// Context for transforming a playlist.
#[derive(Debug, Clone)]
pub struct TransformContext {
    /// URL the manifest was fetched from; the base for every relative URI.
    pub original_url: Url,

    /// Relay endpoint rewritten URIs point at.
    pub endpoint: ProxyEndpoint,
}

impl TransformContext {
    pub fn new(original_url: Url, endpoint: ProxyEndpoint) -> Self {
        Self {
            original_url,
            endpoint,
        }
    }

    /// Resolve a URI reference against the original manifest URL.
    pub fn resolve_url(&self, reference: &str) -> Result<Url> {
        self.original_url.join(reference).map_err(Into::into)
    }

    /// Build the relay URL for an absolute target.
    pub fn proxy_url(&self, target: &Url) -> String {
        self.endpoint.wrap(target)
    }
}
