//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default path of the game definition file
pub const DEFAULT_GAME_CONFIG_PATH: &str = "game.toml";

/// Maximum accepted request body after decompression (4 MB)
pub const MAX_BODY_SIZE: usize = 4 * 1024 * 1024;

// =============================================================================
// GRID FORMAT
// =============================================================================

/// Row separator used for answer maps in the game file
pub const ANSWER_ROW_SEPARATOR: &str = " ";

/// Row separator used in submitted candidate images
pub const SUBMISSION_ROW_SEPARATOR: &str = "\r\n";

/// The only character that maps to an unset cell
pub const UNSET_CELL: char = '0';

// =============================================================================
// SCORING
// =============================================================================

/// A submission earns the flag when its wrong ratio is strictly below this
pub const FLAG_WRONG_RATIO: f64 = 0.10;

/// Reported wrong count for attempts against a closed or unknown question.
/// Not a measurement.
pub const INVALID_WRONG_COUNT: usize = 0x8fff_ffff;

// =============================================================================
// RANKING
// =============================================================================

/// Default path of the ranking snapshot file
pub const DEFAULT_SNAPSHOT_PATH: &str = "ranking_backup.json";

/// Rank index of the leading team
pub const FIRST_PLACE: usize = 0;

// =============================================================================
// TEAMS
// =============================================================================

/// Label for addresses that match no configured team prefix
pub const UNKNOWN_TEAM: &str = "unknown team";
