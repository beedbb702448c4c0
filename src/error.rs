use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Missing url parameter")]
    MissingUrl,

    #[error("Invalid target URL: {0}")]
    InvalidUrl(String),

    #[error("Upstream request failed: {0}")]
    Upstream(String),

    #[error("Upstream did not respond in time")]
    Timeout,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

#[derive(Debug, Serialize)]
pub(crate) struct ErrorResponse {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Error {
    fn label(&self) -> &'static str {
        match self {
            Self::MissingUrl => "Missing url parameter",
            Self::Upstream(_) => "Upstream Error",
            Self::Timeout => "Timeout",
            Self::InvalidUrl(_) | Self::Internal(_) | Self::Config(_) => "Internal Proxy Error",
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            Self::MissingUrl | Self::Timeout => None,
            Self::InvalidUrl(d) | Self::Upstream(d) | Self::Internal(d) | Self::Config(d) => {
                Some(d.clone())
            }
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingUrl => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::InvalidUrl(_) | Self::Internal(_) | Self::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.label(),
            details: self.details(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Self::InvalidUrl(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Upstream(error_chain(&e))
        }
    }
}

/// Render an error together with every `source()` below it.
///
/// reqwest's top-level message only names the URL; the useful part
/// ("connection refused", "dns error", ...) sits further down the chain.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_msg = cause.to_string();
        if !out.contains(&cause_msg) {
            out.push_str(": ");
            out.push_str(&cause_msg);
        }
        source = cause.source();
    }
    out
}
