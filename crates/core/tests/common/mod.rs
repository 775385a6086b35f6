//! Shared test helpers for `nosj_core` integration tests.

#![allow(unreachable_pub)]

use nosj_core::{Map, RenderConfig, Value, process_map};

// ─── Tree helpers ────────────────────────────────────────────────────────────

/// Raw leaf token bound to `key`; panics if absent or not a leaf.
#[allow(dead_code)]
pub fn leaf<'a>(map: &'a Map, key: &str) -> &'a str {
    map.get(key)
        .and_then(Value::as_leaf)
        .unwrap_or_else(|| panic!("expected leaf at key {key:?}"))
}

/// Nested map bound to `key`; panics if absent or not a map.
#[allow(dead_code)]
pub fn nested<'a>(map: &'a Map, key: &str) -> &'a Map {
    map.get(key)
        .and_then(Value::as_map)
        .unwrap_or_else(|| panic!("expected map at key {key:?}"))
}

/// Build a map from `(key, value)` pairs, in order.
#[allow(dead_code)]
pub fn map_of<const N: usize>(pairs: [(&str, Value); N]) -> Map {
    pairs.into_iter().collect()
}

/// A map of `levels` maps nested under key `k`, innermost empty.
#[allow(dead_code)]
pub fn self_nested(levels: usize) -> Map {
    let mut map = Map::new();
    for _ in 0..levels {
        map = map_of([("k", Value::Map(map))]);
    }
    map
}

// ─── Render helpers ──────────────────────────────────────────────────────────

/// Render with default settings and split into lines (as UTF-8, lossily).
#[allow(dead_code)]
pub fn trace_lines(map: &Map) -> Vec<String> {
    let out = process_map(map, &RenderConfig::default())
        .unwrap_or_else(|e| panic!("expected map to render, got: {e}"));
    String::from_utf8_lossy(&out)
        .lines()
        .map(str::to_string)
        .collect()
}
