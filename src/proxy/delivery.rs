use axum::http::{HeaderMap, header::CONTENT_TYPE};
use url::Url;

/// Content-type fragments that mark an HLS playlist.
const MANIFEST_MARKERS: [&str; 2] = ["mpegurl", "hls"];

const MANIFEST_EXTENSION: &str = ".m3u8";

/// How an upstream body is delivered to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Buffer the playlist and rewrite its URIs.
    Manifest,
    /// Pipe bytes through untouched.
    Passthrough,
}

impl DeliveryMode {
    pub fn classify(content_type: Option<&str>, target: &Url) -> Self {
        let by_type = content_type
            .map(|ct| ct.to_ascii_lowercase())
            .is_some_and(|ct| MANIFEST_MARKERS.iter().any(|marker| ct.contains(marker)));

        let by_path = target
            .path()
            .to_ascii_lowercase()
            .ends_with(MANIFEST_EXTENSION);

        if by_type || by_path {
            Self::Manifest
        } else {
            Self::Passthrough
        }
    }

    pub fn from_response(headers: &HeaderMap, target: &Url) -> Self {
        let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
        Self::classify(content_type, target)
    }
}
