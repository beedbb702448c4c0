use serde::Deserialize;

/// Query parameters for the proxy endpoint.
#[derive(Debug, Deserialize)]
pub struct ProxyParams {
    /// Absolute http(s) URL to fetch.
    #[serde(default)]
    pub url: Option<String>,
}

impl ProxyParams {
    /// The target URL, treating an empty value as absent.
    pub fn target(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }
}
