//! Diagnostics for the NOSJ decoder.
//!
//! Provides [`Diagnostic`], [`Span`], and [`LineIndex`] types used to describe
//! failures from the parser and processor, the diagnostic [`codes`], and the
//! [`report`] module that turns any failure into the single standardized
//! `ERROR -- <message>` line.

#![warn(missing_docs)]

/// Diagnostic ID constants.
pub mod codes;
/// The standardized failure line and exit status.
pub mod report;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

// ── LineIndex ────────────────────────────────────────────────────────────

/// Maps byte offsets in a source string to line and column positions.
///
/// Lines and columns are **0-indexed** internally. Use [`LineIndex::line_col`]
/// to get a `(line, col)` pair and add 1 when displaying to users.
///
/// The index is built in O(n) time and each lookup is O(log n) via binary
/// search.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset of the start of each line.
    /// `line_starts[0]` is always 0.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Build a `LineIndex` from source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0usize];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Convert a byte offset to a 0-indexed `(line, column)` pair.
    ///
    /// If `offset` is past the end of the source, the last line is returned
    /// with the column measured from that line's start.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next.saturating_sub(1),
        };
        let col = offset.saturating_sub(self.line_starts[line]);
        (line, col)
    }
}

// ── Span ─────────────────────────────────────────────────────────────────

/// Byte span in the source input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of the first character (0-based).
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Span {
    /// Create a span covering `[start, end)`.
    ///
    /// Panics if `end < start`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(end >= start, "Span end ({end}) < start ({start})");
        Self { start, end }
    }
}

// ── Diagnostic ───────────────────────────────────────────────────────────

/// A structured description of one failure.
///
/// Every NOSJ failure is fatal, so there is no severity: the first diagnostic
/// produced aborts the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Unique diagnostic code (e.g., `"NOSJ2001"`).
    pub id: Cow<'static, str>,
    /// Human-readable message, exactly as it appears after `ERROR -- `.
    pub message: String,
    /// Byte span in the source input, when the failure has a source location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    /// Machine-readable context for tooling (`"key"`, `"token"`, `"expected"`, ...).
    ///
    /// Uses `BTreeMap` for deterministic key ordering in serialized output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<BTreeMap<String, String>>,
}

impl Diagnostic {
    /// Create a diagnostic with the given fields.
    pub fn new(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            span,
            context: None,
        }
    }

    /// Attach machine-readable context metadata (builder pattern).
    pub fn with_context(mut self, ctx: BTreeMap<String, String>) -> Self {
        self.context = Some(ctx);
        self
    }

    /// Returns the human-readable explanation for this diagnostic's code, if available.
    pub fn explain(&self) -> Option<&'static str> {
        explain(&self.id)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "error[{}]: {}", self.id, self.message)
    }
}

/// Returns the human-readable explanation for a diagnostic code, if known.
pub fn explain(id: &str) -> Option<&'static str> {
    match id {
        codes::USAGE => Some("The decoder takes exactly one input file argument."),
        codes::IO => Some("The input file could not be opened or is not valid UTF-8 text."),
        codes::PARSER_EXPECTED_TOKEN => Some(
            "A map marker ('(<' or '>)') or separator (':' or ',') is missing; whitespace is not allowed inside a map.",
        ),
        codes::PARSER_MISSING_KEY => {
            Some("Every pair must start with a key of one or more lowercase letters a-z.")
        }
        codes::PARSER_MISSING_VALUE => {
            Some("A key is followed by ':' but no value; a value is a nested map or a non-empty token.")
        }
        codes::PARSER_TRAILING_CONTENT => {
            Some("Only whitespace may follow the closing '>)' of the top-level map.")
        }
        codes::INVALID_KEY => Some("Map keys must match [a-z]+."),
        codes::INVALID_NUM => Some("A num is a non-empty two's-complement binary literal of 0s and 1s."),
        codes::INVALID_SIMPLE_STRING => Some(
            "A simple string is one or more letters, digits, spaces or tabs followed by a terminating 's'.",
        ),
        codes::INVALID_COMPLEX_STRING => Some(
            "A complex string must contain at least one %XY escape and every '%' must be followed by two hex digits.",
        ),
        codes::DEPTH_EXCEEDED => {
            Some("Maps are nested deeper than the configured maximum depth.")
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── LineIndex ────────────────────────────────────────────────────────

    #[test]
    fn line_index_single_line() {
        let idx = LineIndex::new("(<a:1>)");
        assert_eq!(idx.line_col(0), (0, 0));
        assert_eq!(idx.line_col(4), (0, 4));
    }

    #[test]
    fn line_index_leading_whitespace_lines() {
        let idx = LineIndex::new("\n\n  (<>)");
        assert_eq!(idx.line_col(0), (0, 0));
        assert_eq!(idx.line_col(1), (1, 0));
        assert_eq!(idx.line_col(4), (2, 2)); // '('
    }

    #[test]
    fn line_index_trailing_newline() {
        let idx = LineIndex::new("a\n");
        assert_eq!(idx.line_col(2), (1, 0));
    }

    #[test]
    fn line_index_empty_input() {
        let idx = LineIndex::new("");
        assert_eq!(idx.line_col(0), (0, 0));
    }

    #[test]
    fn line_index_offset_past_end() {
        let idx = LineIndex::new("ab\ncd");
        assert_eq!(idx.line_col(9), (1, 6));
    }

    // ── Span ────────────────────────────────────────────────────────────

    #[test]
    #[should_panic(expected = "Span end (3) < start (5)")]
    fn span_new_inverted_panics() {
        Span::new(5, 3);
    }

    // ── Diagnostic ──────────────────────────────────────────────────────

    #[test]
    fn diagnostic_display() {
        let d = Diagnostic::new(codes::INVALID_KEY, "Invalid key format: Abc", None);
        assert_eq!(d.to_string(), "error[NOSJ2001]: Invalid key format: Abc");
    }

    #[test]
    fn all_codes_have_explanations() {
        for code in codes::ALL {
            assert!(
                explain(code).is_some(),
                "diagnostic code {code} has no explain() entry"
            );
        }
    }

    #[test]
    fn codes_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for code in codes::ALL {
            assert!(seen.insert(*code), "duplicate code {code}");
        }
    }

    #[test]
    fn diagnostic_explain_unknown() {
        let d = Diagnostic::new("UNKNOWN", "test", None);
        assert!(d.explain().is_none());
    }

    #[test]
    fn diagnostic_serde_omits_absent_fields() {
        let d = Diagnostic::new(codes::DEPTH_EXCEEDED, "too deep", None);
        let json = serde_json::to_string(&d).unwrap();
        assert!(!json.contains("span"), "None span should be omitted: {json}");
        assert!(!json.contains("context"), "None context should be omitted: {json}");
    }

    #[test]
    fn diagnostic_context_serde_roundtrip() {
        let d = Diagnostic::new(codes::PARSER_EXPECTED_TOKEN, "expected ':'", Some(Span::new(3, 4)))
            .with_context(BTreeMap::from([
                ("expected".into(), ":".into()),
                ("found".into(), "x".into()),
            ]));
        let json = serde_json::to_string(&d).unwrap();
        let d2: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(d, d2);
    }
}
