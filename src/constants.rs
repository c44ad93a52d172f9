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

/// Maximum accepted request body size in bytes
pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

/// Seconds to wait for a pooled connection
pub const DATABASE_ACQUIRE_TIMEOUT_SECS: u64 = 5;

// =============================================================================
// CALENDAR
// =============================================================================

/// Default calendar offset from UTC, in minutes
pub const DEFAULT_CALENDAR_UTC_OFFSET_MINUTES: i32 = 0;

/// Largest accepted calendar offset magnitude, in minutes
pub const MAX_CALENDAR_UTC_OFFSET_MINUTES: i32 = 23 * 60 + 59;

// =============================================================================
// REQUEST HEADERS & COOKIES
// =============================================================================

/// Header carrying the shared API key for public endpoints
pub const API_KEY_HEADER: &str = "x-special-key";

/// Alternate API key header, consulted when the primary one is absent
pub const API_KEY_HEADER_ALIAS: &str = "x-api-key";

/// Prefix of the per-banner dismissal cookie (`banner_dismissed_<id>`)
pub const DISMISSAL_COOKIE_PREFIX: &str = "banner_dismissed_";

/// Path fragment that marks a referring page as an article
pub const ARTICLE_PATH_MARKER: &str = "/article";

/// CORS preflight cache lifetime in seconds
pub const CORS_MAX_AGE_SECS: u32 = 86400;

/// Methods advertised in CORS preflight responses
pub const CORS_ALLOWED_METHODS: &str = "GET,POST,PUT,DELETE,OPTIONS,PATCH";

/// Headers advertised in CORS preflight responses
pub const CORS_ALLOWED_HEADERS: &str = "X-CSRF-Token, X-Requested-With, Accept, Accept-Version, \
     Content-Length, Content-MD5, Content-Type, Date, X-Api-Version, x-special-key, x-api-key, Authorization";

// =============================================================================
// USER ROLES
// =============================================================================

/// User role identifiers
pub mod roles {
    pub const ADMIN: &str = "admin";
}

// =============================================================================
// ROADBLOCK PRIORITIES
// =============================================================================

/// Priority assigned to recurrence combinations missing from the table
pub const FALLBACK_PRIORITY: u8 = 10;

// =============================================================================
// VALIDATION
// =============================================================================

/// Default close button delay in seconds
pub const DEFAULT_CLOSE_BUTTON_DELAY: i32 = 5;

/// Maximum close button delay in seconds
pub const MAX_CLOSE_BUTTON_DELAY: i32 = 60;

/// Default delay before the banner appears, in seconds
pub const DEFAULT_BANNER_TIME_DELAY: i32 = 5;

/// Maximum delay before the banner appears, in seconds
pub const MAX_BANNER_TIME_DELAY: i32 = 300;

/// Maximum link length
pub const MAX_LINK_LENGTH: u64 = 2048;

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api";
