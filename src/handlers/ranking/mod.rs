//! Ranking handlers

mod handler;
pub mod response;

pub use handler::*;
pub use response::*;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Ranking routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ranking", get(handler::get_ranking))
        .route("/teamflag.txt", get(handler::get_leader_address))
}
