//! Rate limiting middleware

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};

use crate::{
    error::{AppError, AppResult},
    state::AppState,
};

/// Reject a team's submission when its previous one was too recent.
///
/// Runs before the body is read, so throttled requests cost no decoding or
/// scoring.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
    next: Next,
) -> AppResult<Response> {
    let team = state.teams().resolve(&addr.ip().to_string());

    if !state.breaker().check(&team) {
        tracing::debug!(team = %team, address = %addr.ip(), "Submission throttled");
        return Err(AppError::TooManyRequests);
    }

    Ok(next.run(request).await)
}
