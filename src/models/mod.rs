//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod competition;
pub mod grid;
pub mod question;
pub mod ranking;

pub use competition::*;
pub use grid::*;
pub use question::*;
pub use ranking::*;
