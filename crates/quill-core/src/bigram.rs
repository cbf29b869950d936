//! Previous-word → next-word model with recency ordering.
//!
//! Each key holds at most `max_next` distinct next words, most recently
//! learned first. Serialized as a JSON map for the key-value store's string
//! slot, so learned words containing `|`, `:` or `,` round-trip safely.

use std::collections::BTreeMap;

use tracing::warn;

#[derive(Debug)]
pub struct BigramModel {
    /// lowercase previous word → next words, most recent first.
    map: BTreeMap<String, Vec<String>>,
    max_next: usize,
}

impl BigramModel {
    pub fn new(max_next: usize) -> Self {
        Self {
            map: BTreeMap::new(),
            max_next,
        }
    }

    /// Record that `current` followed `prev`. Returns `false` when either
    /// side is empty after trimming.
    pub fn learn(&mut self, prev: &str, current: &str) -> bool {
        let key = prev.trim().to_lowercase();
        let value = current.trim().to_string();
        if key.is_empty() || value.is_empty() {
            return false;
        }

        let list = self.map.entry(key).or_default();
        if let Some(pos) = list.iter().position(|w| *w == value) {
            list.remove(pos);
        }
        list.insert(0, value);
        list.truncate(self.max_next);
        true
    }

    /// Next words observed after `prev`, most recent first. Empty when the
    /// (lowercased, trimmed) key is unknown.
    pub fn successors(&self, prev: &str) -> Vec<String> {
        let key = prev.trim().to_lowercase();
        self.map.get(&key).cloned().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Serialize for the store's string slot. BTreeMap keys make the output
    /// stable across runs.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.map).unwrap_or_else(|e| {
            warn!(error = %e, "bigram serialization failed");
            String::from("{}")
        })
    }

    /// Restore from a persisted JSON map. Unreadable input degrades to an
    /// empty model; oversized lists are re-capped.
    pub fn from_json(raw: &str, max_next: usize) -> Self {
        let mut map: BTreeMap<String, Vec<String>> = match serde_json::from_str(raw) {
            Ok(map) => map,
            Err(e) => {
                warn!(error = %e, "discarding unreadable bigram record");
                BTreeMap::new()
            }
        };
        map.retain(|key, _| !key.is_empty());
        for list in map.values_mut() {
            list.truncate(max_next);
        }
        Self { map, max_next }
    }
}
