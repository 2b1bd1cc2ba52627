//! Application router: the `/health` report, the `/api/v1` moderation API,
//! and the request middleware around them.
//!
//! The binary and the integration tests both build the app here so they run
//! the same middleware stack.

use std::any::Any;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::routes;
use crate::state::AppState;

const REQUEST_ID: &str = "x-request-id";

/// Build the application [`Router`] from its state.
///
/// Layers run outermost first: request id assignment, tracing (the span
/// carries the request id), id propagation to the response, CORS, the
/// configured timeout, then panic recovery into the JSON error envelope.
/// Unmatched paths answer with the same envelope.
pub fn build_app_router(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID),
            MakeRequestUuid,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID,
        )))
        .layer(cors_layer(&state.config))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(state.config.request_timeout_secs),
        ))
        .layer(CatchPanicLayer::custom(panic_response));

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .fallback(unknown_route)
        .layer(middleware)
        .with_state(state)
}

/// CORS for the dashboard origins. Only the methods the moderation API
/// serves are allowed; the request id is exposed to the browser.
///
/// Panics at startup if a configured origin is not a valid header value.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{origin}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .expose_headers([HeaderName::from_static(REQUEST_ID)])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

fn request_span(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id,
    )
}

fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
    AppError::InternalError("Handler panicked".into()).into_response()
}

async fn unknown_route() -> AppError {
    AppError::NotFound("Route not found".into())
}
