//! Runtime configuration read from the environment.
//!
//! Every setting has a default, so the relay starts with no environment at
//! all. Unparsable values are rejected at startup instead of being silently
//! replaced by the default.

use std::time::Duration;

use crate::{Error, Result};

pub const DEFAULT_PROXY_PATH: &str = "/api/proxy";

pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(9);

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,

    /// Route the relay listens on; also the prefix of every rewritten URL.
    pub proxy_path: String,

    /// Time budget for one upstream request: response headers, plus the
    /// whole body when it is a manifest to rewrite.
    pub upstream_timeout: Duration,

    /// Accept any upstream certificate (self-signed, expired, wrong host).
    ///
    /// Many IPTV origins serve broken certificates, so this is on unless
    /// turned off. With it on, upstream traffic can be intercepted by anyone
    /// on the path.
    pub skip_tls_verify: bool,

    /// User-Agent sent upstream when the client did not send one.
    pub default_user_agent: String,

    /// Also rewrite absolute URLs embedded in tag lines of a manifest.
    pub rewrite_embedded_urls: bool,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            proxy_path: DEFAULT_PROXY_PATH.to_string(),
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
            skip_tls_verify: true,
            default_user_agent: DEFAULT_USER_AGENT.to_string(),
            rewrite_embedded_urls: true,
        }
    }
}

impl ProxyConfig {
    /// Build the configuration from `HOST`, `PORT` and the `RELAY_*` variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(v) => v
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("PORT must be a port number, got {v:?}")))?,
            None => defaults.port,
        };

        let proxy_path = lookup("RELAY_PROXY_PATH").unwrap_or(defaults.proxy_path);
        if !proxy_path.starts_with('/') {
            return Err(Error::Config(format!(
                "RELAY_PROXY_PATH must start with '/', got {proxy_path:?}"
            )));
        }

        let upstream_timeout = match lookup("RELAY_UPSTREAM_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(v.trim().parse().map_err(|_| {
                Error::Config(format!(
                    "RELAY_UPSTREAM_TIMEOUT_SECS must be a whole number of seconds, got {v:?}"
                ))
            })?),
            None => defaults.upstream_timeout,
        };

        let skip_tls_verify = match lookup("RELAY_SKIP_TLS_VERIFY") {
            Some(v) => parse_bool("RELAY_SKIP_TLS_VERIFY", &v)?,
            None => defaults.skip_tls_verify,
        };

        let rewrite_embedded_urls = match lookup("RELAY_REWRITE_EMBEDDED_URLS") {
            Some(v) => parse_bool("RELAY_REWRITE_EMBEDDED_URLS", &v)?,
            None => defaults.rewrite_embedded_urls,
        };

        let config = Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            proxy_path,
            upstream_timeout,
            skip_tls_verify,
            default_user_agent: lookup("RELAY_USER_AGENT")
                .filter(|ua| !ua.trim().is_empty())
                .unwrap_or(defaults.default_user_agent),
            rewrite_embedded_urls,
        };

        if config.skip_tls_verify {
            tracing::warn!("Upstream TLS certificate verification is DISABLED");
            tracing::warn!("Upstream responses can be forged by anyone on the network path");
            tracing::warn!("Set RELAY_SKIP_TLS_VERIFY=false to verify upstream certificates");
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::Config(format!("{key} must be a boolean, got {value:?}"))),
    }
}
