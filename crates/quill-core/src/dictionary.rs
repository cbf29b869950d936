//! Case-preserving word dictionary with case-insensitive lookup.
//!
//! Words are keyed by their lowercase form; the value keeps the spelling the
//! word was first learned with. A `BTreeMap` gives deterministic iteration,
//! which the auto-correct tie-break relies on.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;

#[derive(Debug, Default)]
pub struct Dictionary {
    /// lowercase form → word as first seen.
    words: BTreeMap<String, String>,
    /// Runtime-learned words (exact spelling). Seed words never appear here;
    /// only this set is persisted.
    learned: BTreeSet<String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(seed: &[&str]) -> Self {
        let mut dict = Self::new();
        for word in seed {
            dict.words
                .entry(word.to_lowercase())
                .or_insert_with(|| (*word).to_string());
        }
        dict
    }

    /// Learn a word at runtime. Returns `true` if its lowercase form was new.
    pub fn learn(&mut self, word: &str) -> bool {
        let lower = word.to_lowercase();
        if self.words.contains_key(&lower) {
            return false;
        }
        self.words.insert(lower, word.to_string());
        self.learned.insert(word.to_string());
        true
    }

    /// Re-insert a word restored from persisted state. Always recorded as
    /// learned so it is not dropped on the next persist, even when its
    /// lowercase form collides with a seed word.
    pub fn load_learned(&mut self, word: &str) {
        self.words
            .entry(word.to_lowercase())
            .or_insert_with(|| word.to_string());
        self.learned.insert(word.to_string());
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Snapshot of the learned (persistable) words.
    pub fn learned_snapshot(&self) -> BTreeSet<String> {
        self.learned.clone()
    }

    /// All (lowercase, as-learned) pairs in lowercase order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.words.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Words starting with `prefix` (case-insensitive), excluding a word equal
    /// to the prefix itself, sorted ascending, at most `max` entries.
    pub fn prefix_matches(&self, prefix: &str, max: usize) -> Vec<String> {
        if prefix.is_empty() {
            return Vec::new();
        }
        let needle = prefix.to_lowercase();
        let mut results: Vec<String> = self
            .words
            .range::<str, _>((Bound::Included(needle.as_str()), Bound::Unbounded))
            .take_while(|(key, _)| key.starts_with(&needle))
            .filter(|(key, _)| key.as_str() != needle)
            .map(|(_, word)| word.clone())
            .collect();
        results.sort();
        results.truncate(max);
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn learn_is_case_insensitive_dedup() {
        let mut dict = Dictionary::new();
        assert!(dict.learn("Hello"));
        assert!(!dict.learn("hello"));
        assert!(!dict.learn("HELLO"));
        assert_eq!(dict.len(), 1);
        assert!(dict.contains("hElLo"));
    }

    #[test]
    fn seed_words_are_not_learned() {
        let dict = Dictionary::seeded(&["the", "and"]);
        assert_eq!(dict.len(), 2);
        assert!(dict.learned_snapshot().is_empty());
    }

    #[test]
    fn learned_snapshot_tracks_runtime_words_only() {
        let mut dict = Dictionary::seeded(&["the"]);
        dict.learn("rustacean");
        let snapshot = dict.learned_snapshot();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.contains("rustacean"));
    }

    #[test]
    fn loaded_word_colliding_with_seed_stays_persistable() {
        let mut dict = Dictionary::seeded(&["the"]);
        dict.load_learned("The");
        // Seed spelling wins the display slot, but the stored word survives.
        assert!(dict.learned_snapshot().contains("The"));
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn prefix_matches_sorted_capped_excluding_self() {
        let mut dict = Dictionary::new();
        for w in ["that", "the", "their", "there", "they", "think", "th"] {
            dict.learn(w);
        }
        let results = dict.prefix_matches("th", 5);
        assert_eq!(results, vec!["that", "the", "their", "there", "they"]);
    }

    #[test]
    fn prefix_matches_case_insensitive_both_ways() {
        let mut dict = Dictionary::new();
        dict.learn("Paris");
        dict.learn("parka");
        let results = dict.prefix_matches("PAR", 5);
        assert_eq!(results, vec!["Paris", "parka"]);
        // A match equal to the prefix (ignoring case) is excluded.
        let results = dict.prefix_matches("PARIS", 5);
        assert!(results.is_empty());
    }

    #[test]
    fn empty_prefix_yields_nothing() {
        let mut dict = Dictionary::new();
        dict.learn("word");
        assert!(dict.prefix_matches("", 5).is_empty());
    }
}
