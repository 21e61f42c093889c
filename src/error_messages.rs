//!
//! Centralized message constants shared by the harness, the suite runner and
//! the error types.
//!

// ============================================================================
// CAST FAILURES
// ============================================================================

/// Path reported when a cast fails on a value with no enclosing field.
pub const DEFAULT_VALUE_PATH: &str = "this";

/// Case-insensitive pattern every cast failure message must match.
pub const CAST_FAILURE_PATTERN: &str =
    r"(?i)The value of (.+) could not be cast to a value that satisfies the schema type";

// ============================================================================
// HARNESS FAILURES
// ============================================================================

pub const EXPECTED_VALID: &str = "Expected the value to be valid, but the schema rejected it";
pub const EXPECTED_INVALID: &str = "Expected the value to be invalid, but the schema accepted it";
pub const CAST_RESULT_MISMATCH: &str = "Cast result did not match the expected value";

// ============================================================================
// SUITE SKIPPING
// ============================================================================

pub const SKIP_NOT_ONLY: &str = "Not marked 'only' in 'only' mode";
pub const SKIP_MARKED: &str = "Marked 'skip'";
pub const SKIP_FILTERED: &str = "Filtered out by substring: {}";
