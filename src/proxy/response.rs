use axum::{
    BoxError,
    body::Body,
    http::{HeaderMap, HeaderValue, StatusCode, header::CONTENT_LENGTH},
    response::Response,
};
use bytes::Bytes;
use futures::TryStream;

/// Status and headers of a proxied response, assembled before any body
/// byte is produced.
///
/// Every finishing method consumes the head, so status and headers are
/// emitted exactly once. Once a streamed body is running, a failure can only
/// cut the stream short.
#[derive(Debug)]
pub struct ResponseHead {
    status: StatusCode,
    headers: HeaderMap,
}

impl ResponseHead {
    pub fn new(status: StatusCode, headers: HeaderMap) -> Self {
        Self { status, headers }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Finish with a body piped from `stream` without buffering.
    pub fn stream<S>(self, stream: S) -> Response
    where
        S: TryStream + Send + 'static,
        S::Ok: Into<Bytes>,
        S::Error: Into<BoxError>,
    {
        self.finish(Body::from_stream(stream))
    }

    /// Finish with a complete body and its exact `Content-Length`.
    pub fn buffered(mut self, body: impl Into<Bytes>) -> Response {
        let body = body.into();
        self.headers
            .insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
        self.finish(Body::from(body))
    }

    /// Finish with no body at all.
    pub fn empty(self) -> Response {
        self.buffered(Bytes::new())
    }

    fn finish(self, body: Body) -> Response {
        let mut response = Response::new(body);
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}
