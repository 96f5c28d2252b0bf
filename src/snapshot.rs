use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A point-in-time mapping from absolute file path to content fingerprint.
///
/// Fingerprints are lowercase hex BLAKE3 digests of the file bytes alone, so
/// two snapshots of an unchanged tree compare equal regardless of when they
/// were taken. Serializes transparently as a flat JSON object, e.g.
/// `{"/data/a.txt": "9f86d0..."}`. The map is ordered so that a saved
/// baseline is byte-stable across runs, but callers must not rely on
/// iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(BTreeMap<String, String>);

impl Snapshot {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, path: String, fingerprint: String) {
        self.0.insert(path, fingerprint);
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(path, fingerprint)` pairs in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(p, h)| (p.as_str(), h.as_str()))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<(String, String)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_flat_path_to_hex_object() {
        let mut snapshot = Snapshot::new();
        snapshot.insert("/data/b.bin".to_string(), "e3b0c4".to_string());
        snapshot.insert("/data/a.txt".to_string(), "9f86d0".to_string());

        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json, r#"{"/data/a.txt":"9f86d0","/data/b.bin":"e3b0c4"}"#);
    }

    #[test]
    fn deserializes_from_flat_object() {
        let snapshot: Snapshot =
            serde_json::from_str(r#"{"/d/a": "h1", "/d/b": "h2"}"#).unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("/d/a"), Some("h1"));
        assert!(snapshot.contains("/d/b"));
    }
}
