//! Shared constants for end-to-end tests
//!
//! This module contains all constants used across the test suite.
//! When the fixture dataset changes, update only this file.

// ============================================================================
// Fixture Dataset Keys
// ============================================================================

pub const ROCK_KEY: &str = "RK";
pub const JAZZ_KEY: &str = "JZ";
pub const METAL_KEY: &str = "MT";
pub const BLUES_KEY: &str = "BL";
pub const LATIN_KEY: &str = "LT";

/// Artist key for "AC/DC"
pub const ACDC_KEY: &str = "A1";

/// Artist key for "Miles Davis"
pub const MILES_DAVIS_KEY: &str = "A2";

// ============================================================================
// Fixture Dataset Figures
// ============================================================================

/// Line items in the fixture dataset
pub const TOTAL_ROWS: usize = 8;

/// Genre and artist lookup sizes
pub const GENRE_KEY_COUNT: usize = 5;
pub const ARTIST_KEY_COUNT: usize = 4;

/// Calendar months between the first (2009-01) and last (2013-12) invoice
pub const MONTH_COUNT: usize = 60;

/// Rows matching the initial controls: top genres, all artists, 2010-2012
pub const INITIAL_VIEW_ROWS: usize = 5;

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
