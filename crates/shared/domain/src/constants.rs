//! Domain-level constants.
//!
//! These constants define storage limits and query bounds shared by the
//! domain types and the persistence layer.

// =============================================================================
// Identifiers
// =============================================================================

/// Identifier of a record that has not been persisted yet
pub const UNSET_ID: i32 = 0;

// =============================================================================
// Column sizes
// =============================================================================

/// Maximum stored nickname length
pub const MAX_NICKNAME_LENGTH: u32 = 255;

/// Maximum stored email length
pub const MAX_EMAIL_LENGTH: u32 = 100;

/// Maximum stored password hash length (argon2 PHC strings are ~100 chars)
pub const MAX_PASSWORD_HASH_LENGTH: u32 = 255;

/// Maximum stored post title length
pub const MAX_TITLE_LENGTH: u32 = 255;

// =============================================================================
// Queries
// =============================================================================

/// Upper bound on rows returned by list queries
pub const MAX_PAGE_SIZE: u64 = 100;
