//! Leaf classification and decoding.
//!
//! A leaf token carries no type tag. Its kind is resolved late, by testing
//! the token against three patterns in a fixed order (first match wins):
//!
//! 1. **num**: `^[01]+$`, a two's-complement binary literal of its own width.
//! 2. **simple string**: `^[A-Za-z0-9 \t]+s$`; the trailing `s` is framing.
//! 3. **complex string**: anything else, percent-decoded; must contain at
//!    least one well-formed `%XY` escape.

use std::fmt;

use num_bigint::{BigInt, BigUint};

use crate::error::NosjError;
use crate::percent_escape::decode_percent_escapes;

/// The value kind a leaf token decodes as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafKind {
    /// Signed binary integer.
    Num,
    /// Restricted-alphabet string with a trailing `s`.
    SimpleString,
    /// Percent-escaped string.
    ComplexString,
}

impl LeafKind {
    /// The kind label used in trace lines: `num` or `string`.
    pub fn trace_label(self) -> &'static str {
        match self {
            LeafKind::Num => "num",
            LeafKind::SimpleString | LeafKind::ComplexString => "string",
        }
    }
}

impl fmt::Display for LeafKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LeafKind::Num => "num",
            LeafKind::SimpleString => "simple string",
            LeafKind::ComplexString => "complex string",
        })
    }
}

/// A decoded leaf value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// An integer of arbitrary width.
    Num(BigInt),
    /// A byte string; may hold any byte, including NUL.
    Str(Vec<u8>),
}

impl Decoded {
    /// Append the trace rendering of this value (decimal for nums, raw bytes
    /// for strings).
    pub fn write_to(&self, out: &mut Vec<u8>) {
        match self {
            Decoded::Num(n) => out.extend_from_slice(n.to_string().as_bytes()),
            Decoded::Str(bytes) => out.extend_from_slice(bytes),
        }
    }
}

/// Whether `key` matches `[a-z]+`.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_lowercase())
}

fn is_num_token(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b == b'0' || b == b'1')
}

fn is_simple_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b' ' || b == b'\t'
}

fn is_simple_token(token: &str) -> bool {
    match token.as_bytes().split_last() {
        Some((b's', body)) => !body.is_empty() && body.iter().copied().all(is_simple_char),
        _ => false,
    }
}

/// Decode a binary literal as a two's-complement integer of the literal's own
/// bit width.
///
/// `1010` is -6 and `01010` is 10: the width is never padded or truncated.
pub fn decode_num(token: &str) -> Result<BigInt, NosjError> {
    if !is_num_token(token) {
        return Err(NosjError::decode(
            LeafKind::Num,
            token,
            "expected one or more binary digits",
        ));
    }
    let unsigned = BigUint::parse_bytes(token.as_bytes(), 2)
        .ok_or_else(|| NosjError::decode(LeafKind::Num, token, "not a binary literal"))?;
    let value = BigInt::from(unsigned);
    if token.starts_with('1') {
        Ok(value - (BigInt::from(1u8) << token.len()))
    } else {
        Ok(value)
    }
}

/// Decode a simple string by stripping its trailing `s` sentinel.
pub fn decode_simple_str(token: &str) -> Result<Vec<u8>, NosjError> {
    if !token.ends_with('s') {
        return Err(NosjError::decode(
            LeafKind::SimpleString,
            token,
            "missing trailing 's'",
        ));
    }
    if !is_simple_token(token) {
        return Err(NosjError::decode(
            LeafKind::SimpleString,
            token,
            "expected letters, digits, spaces or tabs before the trailing 's'",
        ));
    }
    Ok(token.as_bytes()[..token.len() - 1].to_vec())
}

/// Percent-decode a complex string.
///
/// The token must contain at least one `%XY` escape and every `%` must start
/// a well-formed escape.
pub fn decode_complex_str(token: &str) -> Result<Vec<u8>, NosjError> {
    if !token.contains('%') {
        return Err(NosjError::decode(
            LeafKind::ComplexString,
            token,
            "no %XY escape present",
        ));
    }
    decode_percent_escapes(token).map_err(|errors| {
        let reason = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        NosjError::decode(LeafKind::ComplexString, token, reason)
    })
}

/// Classify `token` by the ordered pattern policy and decode it.
///
/// Tokens that are neither nums nor simple strings are decoded as complex
/// strings, so the reported error for an unrecognizable token is always the
/// complex-string decoder's.
pub fn classify(token: &str) -> Result<(LeafKind, Decoded), NosjError> {
    if is_num_token(token) {
        return Ok((LeafKind::Num, Decoded::Num(decode_num(token)?)));
    }
    if is_simple_token(token) {
        return Ok((
            LeafKind::SimpleString,
            Decoded::Str(decode_simple_str(token)?),
        ));
    }
    let bytes = decode_complex_str(token)?;
    Ok((LeafKind::ComplexString, Decoded::Str(bytes)))
}
