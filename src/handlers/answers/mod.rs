//! Answer submission handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{Router, extract::DefaultBodyLimit, middleware, routing::post};
use tower::ServiceBuilder;
use tower_http::decompression::RequestDecompressionLayer;

use crate::{
    constants::MAX_BODY_SIZE, middleware::rate_limit::rate_limit_middleware, state::AppState,
};

/// Answer routes. Throttling runs before the body is decompressed.
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/answer/{number}", post(handler::submit_answer))
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .route_layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn_with_state(state, rate_limit_middleware))
                .layer(RequestDecompressionLayer::new()),
        )
}
