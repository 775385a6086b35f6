//! Value Processor: renders a value tree into the ordered trace.
//!
//! Each pair produces one line:
//!
//! ```text
//! <key> -- num -- <decimal>
//! <key> -- string -- <bytes>
//! <key> -- map --
//! begin-map
//! ...pairs of the nested map...
//! end-map
//! ```
//!
//! Rendering goes into an owned buffer and the first failure returns `Err`,
//! dropping the buffer, so a caller never sees part of a rejected document.

use crate::{
    DEFAULT_MAX_DEPTH,
    error::NosjError,
    grammar::ast::{Map, Value},
    leaf::{LeafKind, classify, is_valid_key},
};

const BEGIN_MAP: &[u8] = b"begin-map\n";
const END_MAP: &[u8] = b"end-map\n";
const SEPARATOR: &[u8] = b" -- ";

// ── Configuration ───────────────────────────────────────────────────────

/// Processor settings.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Deepest map nesting rendered (top-level map = 1).
    pub max_depth: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl RenderConfig {
    /// Override the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

// ── Public API ──────────────────────────────────────────────────────────

/// Render one leaf pair as a trace line, without the line terminator.
///
/// An empty token renders as an empty string (`<key> -- string -- `). The
/// key is not validated here; see [`process_map`].
pub fn process_leaf(key: &str, raw: &str) -> Result<Vec<u8>, NosjError> {
    let mut line = Vec::with_capacity(key.len() + raw.len() + 16);
    push_leaf(&mut line, key, raw)?;
    Ok(line)
}

/// Render the pairs of `map` (and of every nested map) as `\n`-terminated
/// trace lines, without the outer `begin-map` / `end-map` markers.
pub fn process_map(map: &Map, config: &RenderConfig) -> Result<Vec<u8>, NosjError> {
    let mut out = Vec::new();
    render_pairs(&mut out, map, 1, config)?;
    Ok(out)
}

/// Render a whole document: `begin-map`, the trace of `map`, `end-map`.
pub fn render_document(map: &Map, config: &RenderConfig) -> Result<Vec<u8>, NosjError> {
    let mut out = Vec::from(BEGIN_MAP);
    render_pairs(&mut out, map, 1, config)?;
    out.extend_from_slice(END_MAP);
    tracing::debug!(bytes = out.len(), "rendered document");
    Ok(out)
}

// ── Rendering ───────────────────────────────────────────────────────────

fn render_pairs(
    out: &mut Vec<u8>,
    map: &Map,
    depth: usize,
    config: &RenderConfig,
) -> Result<(), NosjError> {
    if depth > config.max_depth {
        return Err(NosjError::DepthExceeded {
            limit: config.max_depth,
            span: None,
        });
    }

    for (key, value) in map.iter() {
        if !is_valid_key(key) {
            return Err(NosjError::InvalidKey {
                key: key.to_string(),
            });
        }
        match value {
            Value::Leaf(raw) => {
                push_leaf(out, key, raw)?;
                out.push(b'\n');
            }
            Value::Map(nested) => {
                push_header(out, key, b"map");
                out.push(b'\n');
                out.extend_from_slice(BEGIN_MAP);
                render_pairs(out, nested, depth + 1, config)?;
                out.extend_from_slice(END_MAP);
            }
        }
    }
    Ok(())
}

fn push_header(out: &mut Vec<u8>, key: &str, label: &[u8]) {
    out.extend_from_slice(key.as_bytes());
    out.extend_from_slice(SEPARATOR);
    out.extend_from_slice(label);
    out.extend_from_slice(SEPARATOR);
}

fn push_leaf(out: &mut Vec<u8>, key: &str, raw: &str) -> Result<(), NosjError> {
    if raw.is_empty() {
        push_header(out, key, LeafKind::SimpleString.trace_label().as_bytes());
        return Ok(());
    }
    let (kind, decoded) = classify(raw)?;
    push_header(out, key, kind.trace_label().as_bytes());
    decoded.write_to(out);
    Ok(())
}
