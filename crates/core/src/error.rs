//! Typed failures for parsing and processing.

use std::collections::BTreeMap;

use nosj_diagnostics::{Diagnostic, Span, codes};

use crate::leaf::LeafKind;

/// Every way a NOSJ document can be rejected.
///
/// The `Display` output of each variant is the exact text that follows
/// `ERROR -- ` on the diagnostic stream. The first failure anywhere aborts the
/// whole document; nothing is recovered or retried.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NosjError {
    /// The input violates the map grammar.
    #[error("NOSJ parse error: {message}")]
    Parse {
        /// Diagnostic code (one of the `PARSER_*` codes).
        code: &'static str,
        /// Diagnosis including line and column.
        message: String,
        /// Offending source range.
        span: Span,
    },

    /// A map key does not match `[a-z]+`. The key is reported verbatim.
    #[error("Invalid key format: {key}")]
    InvalidKey {
        /// The offending key, unmodified.
        key: String,
    },

    /// A leaf token failed every value pattern, or a secondary constraint of
    /// the pattern it was decoded as.
    #[error("Invalid {kind} value: {token} ({reason})")]
    Decode {
        /// The value kind the token was last decoded as.
        kind: LeafKind,
        /// The offending raw token.
        token: String,
        /// Why the decoder rejected it.
        reason: String,
    },

    /// Map nesting is deeper than the configured limit.
    #[error("Maximum nesting depth of {limit} exceeded")]
    DepthExceeded {
        /// The configured maximum depth.
        limit: usize,
        /// Where the too-deep map opens, when known from source.
        span: Option<Span>,
    },
}

impl NosjError {
    pub(crate) fn decode(kind: LeafKind, token: &str, reason: impl Into<String>) -> Self {
        NosjError::Decode {
            kind,
            token: token.to_string(),
            reason: reason.into(),
        }
    }

    /// The diagnostic code for this failure.
    pub fn code(&self) -> &'static str {
        match self {
            NosjError::Parse { code, .. } => *code,
            NosjError::InvalidKey { .. } => codes::INVALID_KEY,
            NosjError::Decode { kind, .. } => match kind {
                LeafKind::Num => codes::INVALID_NUM,
                LeafKind::SimpleString => codes::INVALID_SIMPLE_STRING,
                LeafKind::ComplexString => codes::INVALID_COMPLEX_STRING,
            },
            NosjError::DepthExceeded { .. } => codes::DEPTH_EXCEEDED,
        }
    }

    /// Source range of the failure, for errors raised by the parser.
    pub fn span(&self) -> Option<Span> {
        match self {
            NosjError::Parse { span, .. } => Some(*span),
            NosjError::DepthExceeded { span, .. } => *span,
            NosjError::InvalidKey { .. } | NosjError::Decode { .. } => None,
        }
    }

    /// Convert to a structured [`Diagnostic`] carrying the same message.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::new(self.code(), self.to_string(), self.span());
        match self {
            NosjError::InvalidKey { key } => {
                diag.with_context(BTreeMap::from([("key".into(), key.clone())]))
            }
            NosjError::Decode { kind, token, .. } => diag.with_context(BTreeMap::from([
                ("kind".into(), kind.to_string()),
                ("token".into(), token.clone()),
            ])),
            NosjError::DepthExceeded { limit, .. } => {
                diag.with_context(BTreeMap::from([("limit".into(), limit.to_string())]))
            }
            NosjError::Parse { .. } => diag,
        }
    }
}
