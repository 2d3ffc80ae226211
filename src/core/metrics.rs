//! Per-function and per-class structural metrics

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// Structural metrics for one function definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionMetrics {
    pub lines_of_code: usize,
    pub parameter_count: usize,
    pub cyclomatic_complexity: u32,
    pub return_statements: usize,
    pub nested_functions: usize,
    pub has_docstring: bool,
    pub line_number: usize,
}

impl FunctionMetrics {
    /// Whether this function exceeds the given cyclomatic threshold
    pub fn is_complex(&self, threshold: u32) -> bool {
        self.cyclomatic_complexity > threshold
    }
}

/// Structural metrics for one class definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub method_count: usize,
    pub property_count: usize,
    pub public_methods: usize,
    pub private_methods: usize,
    pub magic_methods: usize,
    pub inheritance_depth: usize,
    pub has_docstring: bool,
    pub line_number: usize,
}

/// Name-keyed metrics map that preserves insertion order.
///
/// Re-inserting an existing name replaces the value but keeps the
/// original position (last write wins; name collisions are an accepted
/// ambiguity of name-keyed per-file metrics). Serializes as a JSON
/// object in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsMap<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for MetricsMap<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> MetricsMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: T) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}

impl<T: Serialize> Serialize for MetricsMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct MetricsMapVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for MetricsMapVisitor<T> {
    type Value = MetricsMap<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a name-keyed metrics map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = MetricsMap::new();
        while let Some((name, value)) = access.next_entry::<String, T>()? {
            map.insert(name, value);
        }
        Ok(map)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for MetricsMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MetricsMapVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_is_preserved() {
        let mut map = MetricsMap::new();
        map.insert("zeta", 1);
        map.insert("alpha", 2);
        map.insert("mid", 3);

        let names: Vec<&str> = map.names().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn reinsert_keeps_position_and_replaces_value() {
        let mut map = MetricsMap::new();
        map.insert("first", 1);
        map.insert("second", 2);
        map.insert("first", 10);

        let entries: Vec<(&str, &i32)> = map.iter().collect();
        assert_eq!(entries, vec![("first", &10), ("second", &2)]);
    }

    #[test]
    fn serializes_as_ordered_object() {
        let mut map = MetricsMap::new();
        map.insert("b", 1);
        map.insert("a", 2);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"b":1,"a":2}"#);
    }

    #[test]
    fn round_trips_through_json() {
        let mut map = MetricsMap::new();
        map.insert("f", 42);

        let json = serde_json::to_string(&map).unwrap();
        let back: MetricsMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
