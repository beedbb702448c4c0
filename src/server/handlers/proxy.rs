use axum::{
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
};
use futures::TryStreamExt;
use url::Url;

use crate::{
    Error, Result,
    error::error_chain,
    proxy::{
        DeliveryMode, ResponseHead, Transport, UpstreamResponse, forward_headers, outbound_headers,
    },
    server::{params::ProxyParams, state::AppState},
    stream::{StreamProcessor, TransformContext, rules},
};

/// Handle requests to the proxy endpoint.
pub async fn handle_proxy(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    params: std::result::Result<Query<ProxyParams>, QueryRejection>,
) -> Result<Response> {
    if method == Method::OPTIONS {
        return Ok(StatusCode::OK.into_response());
    }

    let Query(params) = params.map_err(|e| Error::InvalidUrl(e.body_text()))?;
    let raw_url = params.target().ok_or(Error::MissingUrl)?;

    let target = Url::parse(raw_url).inspect_err(|e| {
        tracing::warn!("Rejecting malformed target {:?}: {}", raw_url, e);
    })?;
    let transport = Transport::for_url(&target)?;

    tracing::info!("Proxy request: {} {} ({:?})", method, target, transport);

    let outbound = outbound_headers(&target, &headers, &state.config.default_user_agent);
    let upstream = state
        .client
        .send(method, &target, outbound)
        .await
        .inspect_err(|e| tracing::warn!("Upstream request for {} failed: {}", target, e))?;

    let mode = DeliveryMode::from_response(upstream.response.headers(), &target);
    let head = ResponseHead::new(
        upstream.response.status(),
        forward_headers(upstream.response.headers(), &target, &state.endpoint),
    );

    tracing::debug!("Upstream answered {} for {}, delivering as {:?}", head.status(), target, mode);

    match mode {
        DeliveryMode::Passthrough => {
            let body = upstream.response.bytes_stream().inspect_err(move |e| {
                tracing::warn!("Passthrough from {} aborted: {}", target, error_chain(e));
            });
            Ok(head.stream(body))
        }
        DeliveryMode::Manifest => rewrite_manifest(&state, target, head, upstream).await,
    }
}

/// Buffer a playlist, rewrite it and send it with a fresh `Content-Length`.
async fn rewrite_manifest(
    state: &AppState,
    target: Url,
    head: ResponseHead,
    upstream: UpstreamResponse,
) -> Result<Response> {
    let body = match upstream.read_body().await {
        Ok(body) => body,
        Err(Error::Timeout) => return Err(Error::Timeout),
        Err(e) => {
            tracing::error!("Failed to read manifest from {}: {}", target, e);
            return Ok(head.empty());
        }
    };

    let content = String::from_utf8_lossy(&body);
    let context = TransformContext::new(target, state.endpoint.clone());
    let processor = StreamProcessor::new(
        context,
        rules::default_passes(state.config.rewrite_embedded_urls),
    );

    let rewritten = processor.process(&content);
    tracing::debug!(
        "Rewrote manifest {} ({} -> {} bytes)",
        processor.context().original_url,
        body.len(),
        rewritten.len()
    );

    Ok(head.buffered(rewritten))
}
