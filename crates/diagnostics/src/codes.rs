//! Diagnostic ID constants.
//!
//! Use these instead of string literals to get compile-time typo detection
//! and IDE autocomplete. Every constant has an [`explain`](crate::explain)
//! entry.

/// Wrong command-line invocation (arity or unknown flag).
pub const USAGE: &str = "NOSJ0001";
/// The input source could not be read.
pub const IO: &str = "NOSJ0002";

/// A structural marker or separator was expected but something else was found.
pub const PARSER_EXPECTED_TOKEN: &str = "NOSJ1001";
/// A map key was expected but the next character cannot start one.
pub const PARSER_MISSING_KEY: &str = "NOSJ1002";
/// A value position was empty.
pub const PARSER_MISSING_VALUE: &str = "NOSJ1003";
/// Non-whitespace input follows the closing top-level marker.
pub const PARSER_TRAILING_CONTENT: &str = "NOSJ1004";

/// A map key does not match `[a-z]+`.
pub const INVALID_KEY: &str = "NOSJ2001";
/// A token was decoded as a num but is not a binary literal.
pub const INVALID_NUM: &str = "NOSJ2101";
/// A token was decoded as a simple string but does not match its pattern.
pub const INVALID_SIMPLE_STRING: &str = "NOSJ2102";
/// A token was decoded as a complex string but its escapes are malformed or absent.
pub const INVALID_COMPLEX_STRING: &str = "NOSJ2103";

/// Map nesting exceeds the configured maximum depth.
pub const DEPTH_EXCEEDED: &str = "NOSJ3001";

/// Every known code, in numeric order.
pub const ALL: &[&str] = &[
    USAGE,
    IO,
    PARSER_EXPECTED_TOKEN,
    PARSER_MISSING_KEY,
    PARSER_MISSING_VALUE,
    PARSER_TRAILING_CONTENT,
    INVALID_KEY,
    INVALID_NUM,
    INVALID_SIMPLE_STRING,
    INVALID_COMPLEX_STRING,
    DEPTH_EXCEEDED,
];
