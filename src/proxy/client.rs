use std::time::Duration;

use axum::http::{HeaderMap, Method};
use bytes::Bytes;
use reqwest::Client;
use tokio::time::Instant;
use url::Url;

use crate::{Error, Result, config::ProxyConfig};

/// Outbound transport chosen from the target's scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Plain,
    Tls,
}

impl Transport {
    pub fn for_url(url: &Url) -> Result<Self> {
        match url.scheme() {
            "http" => Ok(Self::Plain),
            "https" => Ok(Self::Tls),
            other => Err(Error::InvalidUrl(format!(
                "unsupported scheme '{other}', expected http or https"
            ))),
        }
    }
}

/// HTTP client for talking to upstream origins.
///
/// Redirects are not followed: they go back to the player with a rewritten
/// `Location` so the next hop is proxied too. Idle connections are not kept,
/// so every request dials the origin afresh.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    timeout: Duration,
}

impl UpstreamClient {
    pub fn new(config: &ProxyConfig) -> Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(config.skip_tls_verify)
            .redirect(reqwest::redirect::Policy::none())
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            timeout: config.upstream_timeout,
        })
    }

    /// Send a request and wait for the response headers.
    ///
    /// One deadline is fixed here for the whole request. Connecting and
    /// waiting for headers spend from it, and so does buffering a manifest
    /// body through [`UpstreamResponse::read_body`]. A passthrough body is
    /// not bounded: a live stream may flow for as long as both ends stay
    /// open. On expiry the pending request is dropped, which closes its
    /// connection.
    pub async fn send(
        &self,
        method: Method,
        target: &Url,
        headers: HeaderMap,
    ) -> Result<UpstreamResponse> {
        let deadline = Instant::now() + self.timeout;
        let request = self.client.request(method, target.clone()).headers(headers);

        match tokio::time::timeout_at(deadline, request.send()).await {
            Ok(result) => Ok(UpstreamResponse {
                response: result?,
                deadline,
            }),
            Err(_) => Err(Error::Timeout),
        }
    }
}

/// Upstream response whose headers have arrived.
pub struct UpstreamResponse {
    pub response: reqwest::Response,
    deadline: Instant,
}

impl UpstreamResponse {
    /// Buffer the whole body within what is left of the request deadline.
    pub async fn read_body(self) -> Result<Bytes> {
        match tokio::time::timeout_at(self.deadline, self.response.bytes()).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(Error::Timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_by_scheme() {
        let plain = Url::parse("http://example.com/a.m3u8").unwrap();
        let tls = Url::parse("https://example.com/a.m3u8").unwrap();

        assert_eq!(Transport::for_url(&plain).unwrap(), Transport::Plain);
        assert_eq!(Transport::for_url(&tls).unwrap(), Transport::Tls);
    }

    #[test]
    fn test_transport_rejects_other_schemes() {
        for target in ["ftp://example.com/a.ts", "file:///etc/passwd", "data:text/plain,hi"] {
            let url = Url::parse(target).unwrap();
            assert!(matches!(Transport::for_url(&url), Err(Error::InvalidUrl(_))));
        }
    }

    #[test]
    fn test_client_builds_from_config() {
        let config = ProxyConfig {
            upstream_timeout: Duration::from_secs(3),
            ..ProxyConfig::default()
        };
        let client = UpstreamClient::new(&config).unwrap();
        assert_eq!(client.timeout, Duration::from_secs(3));
    }
}
