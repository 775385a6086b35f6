use std::collections::HashMap;

/// A NOSJ value: either a nested map or an undecoded leaf token.
///
/// Leaves carry their raw source text. Whether a leaf is a num, a simple
/// string, or a complex string is decided at render time by
/// [`classify`](crate::leaf::classify), never by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A nested map.
    Map(Map),
    /// A raw leaf token.
    Leaf(String),
}

impl Value {
    /// Shorthand for building a leaf from anything string-like.
    pub fn leaf(raw: impl Into<String>) -> Self {
        Value::Leaf(raw.into())
    }

    /// The nested map, if this value is one.
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(m) => Some(m),
            Value::Leaf(_) => None,
        }
    }

    /// The raw leaf token, if this value is one.
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Value::Leaf(raw) => Some(raw),
            Value::Map(_) => None,
        }
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

/// An insertion-ordered map from key to [`Value`].
///
/// Re-inserting an existing key replaces its value and moves the entry to the
/// last insertion position. Superseded entries stay behind as empty slots so
/// that both operations remain amortized O(1); iteration skips them.
///
/// Keys are not validated here: a `Map` built through the API may hold keys
/// the grammar would reject, and the processor reports them.
#[derive(Debug, Clone, Default)]
pub struct Map {
    slots: Vec<Option<(String, Value)>>,
    index: HashMap<String, usize>,
}

impl Map {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` under `key`, returning the value it replaced, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        let slot = self.slots.len();
        let previous = self
            .index
            .insert(key.clone(), slot)
            .and_then(|old| self.slots[old].take())
            .map(|(_, v)| v);
        self.slots.push(Some((key, value)));
        previous
    }

    /// Look up the value bound to `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let slot = *self.index.get(key)?;
        self.slots[slot].as_ref().map(|(_, v)| v)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the map has no pairs.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.slots
            .iter()
            .filter_map(|slot| slot.as_ref().map(|(k, v)| (k.as_str(), v)))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(k, _)| k)
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for Map {}

impl<K: Into<String>> FromIterator<(K, Value)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut map = Map::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let map: Map = [
            ("c", Value::leaf("1s")),
            ("a", Value::leaf("2s")),
            ("b", Value::leaf("3s")),
        ]
        .into_iter()
        .collect();
        assert_eq!(map.keys().collect::<Vec<_>>(), ["c", "a", "b"]);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn duplicate_key_last_write_wins_and_moves_to_end() {
        let mut map = Map::new();
        map.insert("a", Value::leaf("1"));
        map.insert("b", Value::leaf("0"));
        let old = map.insert("a", Value::leaf("11"));

        assert_eq!(old, Some(Value::leaf("1")));
        assert_eq!(map.len(), 2);
        assert_eq!(map.keys().collect::<Vec<_>>(), ["b", "a"]);
        assert_eq!(map.get("a"), Some(&Value::leaf("11")));
    }

    #[test]
    fn repeated_overwrites_keep_one_entry() {
        let mut map = Map::new();
        for i in 0..10 {
            map.insert("k", Value::leaf(format!("{i}s")));
        }
        assert_eq!(map.len(), 1);
        assert_eq!(map.iter().count(), 1);
        assert_eq!(map.get("k").and_then(Value::as_leaf), Some("9s"));
    }

    #[test]
    fn empty_map() {
        let map = Map::new();
        assert!(map.is_empty());
        assert_eq!(map.iter().count(), 0);
        assert_eq!(map.get("a"), None);
    }

    #[test]
    fn equality_ignores_superseded_slots() {
        let mut a = Map::new();
        a.insert("x", Value::leaf("0"));
        a.insert("x", Value::leaf("1"));
        let b: Map = [("x", Value::leaf("1"))].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn equality_is_order_sensitive() {
        let a: Map = [("x", Value::leaf("0")), ("y", Value::leaf("1"))]
            .into_iter()
            .collect();
        let b: Map = [("y", Value::leaf("1")), ("x", Value::leaf("0"))]
            .into_iter()
            .collect();
        assert_ne!(a, b);
    }
}
