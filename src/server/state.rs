use crate::{
    Result,
    config::ProxyConfig,
    proxy::{ProxyEndpoint, UpstreamClient},
};
use std::sync::Arc;

/// Shared application state.
///
/// Nothing here changes after startup; requests share no mutable state.
#[derive(Clone)]
pub struct AppState {
    pub client: UpstreamClient,
    pub endpoint: ProxyEndpoint,
    pub config: Arc<ProxyConfig>,
}

impl AppState {
    pub fn new(config: ProxyConfig) -> Result<Self> {
        Ok(Self {
            client: UpstreamClient::new(&config)?,
            endpoint: ProxyEndpoint::new(config.proxy_path.as_str()),
            config: Arc::new(config),
        })
    }
}
