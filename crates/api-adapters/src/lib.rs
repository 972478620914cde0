//! # api-adapters
//!
//! HTTP surface of the forum. Handlers translate requests into use-case
//! payloads; [`error::ApiError`] translates failures back into responses.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;

use std::sync::Arc;

use axum::extract::FromRef;
use axum::routing::{delete, get, post, put};
use axum::Router;
use domains::AccessTokenVerifier;
use services::ForumUseCases;

pub use error::ApiError;
pub use metrics::HttpMetrics;
pub use middleware::with_standard_layers;

#[derive(Clone)]
pub struct AppState {
    pub use_cases: Arc<ForumUseCases>,
    pub verifier: Arc<dyn AccessTokenVerifier>,
    pub metrics: Arc<HttpMetrics>,
}

impl AppState {
    pub fn new(use_cases: ForumUseCases, verifier: Arc<dyn AccessTokenVerifier>) -> Self {
        Self {
            use_cases: Arc::new(use_cases),
            verifier,
            metrics: Arc::new(HttpMetrics::new()),
        }
    }
}

impl FromRef<AppState> for Arc<HttpMetrics> {
    fn from_ref(state: &AppState) -> Self {
        state.metrics.clone()
    }
}

/// Forum routes plus `/metrics`. Scrapes of `/metrics` are not counted.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/threads", post(handlers::post_thread))
        .route("/threads/{threadId}", get(handlers::get_thread))
        .route("/threads/{threadId}/comments", post(handlers::post_comment))
        .route("/threads/{threadId}/comments/{commentId}", delete(handlers::delete_comment))
        .route("/threads/{threadId}/comments/{commentId}/replies", post(handlers::post_reply))
        .route(
            "/threads/{threadId}/comments/{commentId}/replies/{replyId}",
            delete(handlers::delete_reply),
        )
        .route("/threads/{threadId}/comments/{commentId}/likes", put(handlers::put_like))
        .route_layer(axum::middleware::from_fn_with_state(state.metrics.clone(), metrics::track))
        .route("/metrics", get(metrics::export))
        .with_state(state)
}
