//! NOSJ decoder core library.
//!
//! Provides parsing of NOSJ map documents, late classification and decoding
//! of leaf tokens, and rendering of the ordered `key -- kind -- value` trace.
//! The main entry points are [`parse_str`] for parsing and [`render_document`]
//! for rendering.

#![warn(missing_docs)]

/// Failure taxonomy shared by the parser and the processor.
pub mod error;
/// NOSJ grammar: value tree and parser.
pub mod grammar;
/// Leaf classification and the num / simple-string / complex-string decoders.
pub mod leaf;
/// `%XY` escape processing for complex strings.
pub mod percent_escape;
/// Value Processor: renders a value tree into trace lines.
pub mod process;

/// Nesting depth (top-level map = 1) at which parsing and rendering give up.
pub const DEFAULT_MAX_DEPTH: usize = 512;

// ── Convenience re-exports ──────────────────────────────────────────────────

// Errors
pub use error::NosjError;

// Parser
pub use grammar::parser::{ParseConfig, parse_document, parse_str};

// Value tree
pub use grammar::ast::{Map, Value};

// Leaves
pub use leaf::{
    Decoded, LeafKind, classify, decode_complex_str, decode_num, decode_simple_str, is_valid_key,
};

// Processor
pub use process::{RenderConfig, process_leaf, process_map, render_document};
