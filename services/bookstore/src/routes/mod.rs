//! HTTP routes
//!
//! Every resource contributes its own sub-router; this module merges them,
//! adds the liveness endpoint and the not-found fallback, and wraps the
//! result in the server-wide layers.

use axum::{
    Json, Router, async_trait,
    body::{Body, HttpBody},
    extract::{FromRequest, FromRequestParts, Path, Request, State},
    http::request::Parts,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::{future::poll_fn, pin::Pin, time::Duration};
use tower_http::trace::TraceLayer;
use tracing::warn;
use validator::Validate;

use crate::{
    config::HttpConfig, error::ApiError, repositories::ResourceId, state::AppState,
    validation::describe,
};

pub mod catalog;
pub mod users;

#[cfg(test)]
mod e2e;

const INVALID_ID: &str = "invalid id parameter";
const INVALID_BODY: &str = "please, fix your request body";

/// Create the router for the bookstore service
pub fn create_router(state: AppState, http: &HttpConfig) -> Router {
    let routes = Router::new()
        .route("/health", get(health_check))
        .merge(users::router(state.user_service))
        .merge(catalog::router_with_patch(
            "/api/authors",
            state.author_service,
        ))
        .merge(catalog::router("/api/genres", state.genre_service))
        .merge(catalog::router("/api/languages", state.language_service))
        .fallback(not_found);

    with_server_layers(routes, http)
}

/// Wrap `routes` in the header, body and timeout bounds plus tracing
fn with_server_layers(routes: Router, http: &HttpConfig) -> Router {
    let body = BodyBounds {
        timeout: http.read_timeout(),
        max_bytes: http.max_body_bytes,
    };

    routes
        .layer(middleware::from_fn_with_state(
            http.write_timeout(),
            limit_handler_time,
        ))
        .layer(middleware::from_fn_with_state(body, read_body))
        .layer(middleware::from_fn_with_state(
            http.max_header_bytes(),
            limit_header_size,
        ))
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "bookstore"
    }))
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Reject requests whose header block exceeds `limit` bytes
async fn limit_header_size(
    State(limit): State<usize>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let size: usize = req
        .headers()
        .iter()
        .map(|(name, value)| name.as_str().len() + value.len())
        .sum();

    if size > limit {
        warn!("rejected request with {} header bytes", size);
        return Err(ApiError::HeadersTooLarge);
    }

    Ok(next.run(req).await)
}

#[derive(Clone, Copy)]
struct BodyBounds {
    timeout: Duration,
    max_bytes: usize,
}

/// Receive the whole request body within the read timeout and size bound
async fn read_body(
    State(bounds): State<BodyBounds>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (parts, body) = req.into_parts();
    let bytes = tokio::time::timeout(bounds.timeout, collect_body(body, bounds.max_bytes))
        .await
        .map_err(|_| ApiError::RequestTimeout)??;

    Ok(next
        .run(Request::from_parts(parts, Body::from(bytes)))
        .await)
}

async fn collect_body(mut body: Body, max_bytes: usize) -> Result<Vec<u8>, ApiError> {
    let mut bytes = Vec::new();
    while let Some(frame) = poll_fn(|cx| Pin::new(&mut body).poll_frame(cx)).await {
        let frame =
            frame.map_err(|e| ApiError::bad_request("cannot read request body", e.to_string()))?;
        let Ok(data) = frame.into_data() else {
            continue;
        };
        if bytes.len() + data.len() > max_bytes {
            warn!("rejected request body over {} bytes", max_bytes);
            return Err(ApiError::PayloadTooLarge);
        }
        bytes.extend_from_slice(&data);
    }
    Ok(bytes)
}

/// Give up on handlers that run past `timeout`
async fn limit_handler_time(
    State(timeout): State<Duration>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    tokio::time::timeout(timeout, next.run(req))
        .await
        .map_err(|_| {
            warn!("request not handled within {:?}", timeout);
            ApiError::HandlerTimeout
        })
}

/// `:id` path parameter parsed as an unsigned decimal of the resource's width
pub struct IdParam<I>(pub I);

#[async_trait]
impl<S, I> FromRequestParts<S> for IdParam<I>
where
    S: Send + Sync,
    I: ResourceId,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::bad_request(INVALID_ID, ""))?;

        I::parse(&raw)
            .map(IdParam)
            .ok_or_else(|| ApiError::bad_request(INVALID_ID, ""))
    }
}

/// JSON body that has passed its declared validation rules
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text(), INVALID_BODY))?;

        payload
            .validate()
            .map_err(|errors| ApiError::validation(describe(&errors)))?;

        Ok(ValidJson(payload))
    }
}
