//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod answers;
pub mod health;
pub mod ranking;

use axum::{Router, http::Method, middleware};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{middleware::logging_middleware, state::AppState};

/// Create all routes
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(ranking::routes())
        .merge(answers::routes(state))
}

/// The complete application with its middleware stack
pub fn app(state: AppState) -> Router {
    routes(state.clone())
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any),
        )
        .with_state(state)
}
