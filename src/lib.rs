//! BitJudge - Image Guessing Competition Scoring Server
//!
//! Teams submit candidate bitmaps for hidden answer images. The server counts
//! the wrong cells, releases a reward flag once fewer than 10% are wrong, and
//! keeps a live leaderboard of each team's best score per image.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Middleware**: per-team submission throttling and request logging
//! - **Services**: ranking board, snapshot persistence, interval breaker, team lookup
//! - **Models**: bitmap grids, questions and the competition time gate

pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
