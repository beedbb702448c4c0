use axum::http::{
    HeaderMap, HeaderName, HeaderValue,
    header::{
        ACCEPT, ACCEPT_ENCODING, CONNECTION, CONTENT_ENCODING, CONTENT_LENGTH, HOST, LOCATION,
        ORIGIN, REFERER, TRANSFER_ENCODING, USER_AGENT,
    },
};
use url::Url;

use super::ProxyEndpoint;
use crate::config::DEFAULT_USER_AGENT;

/// Upstream response headers that never reach the client.
///
/// Length and encoding are invalidated by rewriting (and compression is
/// refused upstream anyway); host and the framing headers belong to the
/// upstream connection.
const DROPPED_RESPONSE_HEADERS: [HeaderName; 5] = [
    CONTENT_ENCODING,
    CONTENT_LENGTH,
    HOST,
    TRANSFER_ENCODING,
    CONNECTION,
];

/// Build the headers sent to the upstream origin.
///
/// Only the client's User-Agent is carried over. Referer and Origin always
/// name the target's own origin so hotlink checks see a same-site request.
pub fn outbound_headers(target: &Url, inbound: &HeaderMap, default_user_agent: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();

    let user_agent = inbound
        .get(USER_AGENT)
        .cloned()
        .or_else(|| HeaderValue::from_str(default_user_agent).ok())
        .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_USER_AGENT));
    headers.insert(USER_AGENT, user_agent);
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));

    let origin = target.origin().ascii_serialization();
    if let Ok(referer) = HeaderValue::from_str(&format!("{origin}/")) {
        headers.insert(REFERER, referer);
    }
    if let Ok(origin) = HeaderValue::from_str(&origin) {
        headers.insert(ORIGIN, origin);
    }

    headers
}

/// Copy upstream response headers for the client, rewriting `Location`.
pub fn forward_headers(upstream: &HeaderMap, target: &Url, endpoint: &ProxyEndpoint) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(upstream.len());

    for (name, value) in upstream {
        if DROPPED_RESPONSE_HEADERS.contains(name) {
            continue;
        }

        if name == LOCATION {
            headers.append(LOCATION, rewrite_location(value, target, endpoint));
        } else {
            headers.append(name.clone(), value.clone());
        }
    }

    headers
}

/// Point a redirect back at the relay. Relative targets are resolved
/// against the URL that produced the redirect.
fn rewrite_location(value: &HeaderValue, target: &Url, endpoint: &ProxyEndpoint) -> HeaderValue {
    let Ok(location) = value.to_str() else {
        return value.clone();
    };

    match target.join(location.trim()) {
        Ok(resolved) => {
            HeaderValue::from_str(&endpoint.wrap(&resolved)).unwrap_or_else(|_| value.clone())
        }
        Err(e) => {
            tracing::warn!("Leaving unresolvable Location {:?} as is: {}", location, e);
            value.clone()
        }
    }
}
