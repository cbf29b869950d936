//! The prediction engine: dictionary suggestions, next-word prediction, and
//! auto-correction, with learned state persisted in the background.
//!
//! Constructed explicitly with [`PredictionEngine::open`] and shared into
//! sessions as `Arc<PredictionEngine>`. All methods take `&self`; the models
//! sit behind `RwLock`s so learning can happen while other sessions read.

use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use crate::bigram::BigramModel;
use crate::config::EngineConfig;
use crate::correct;
use crate::dictionary::Dictionary;
use crate::persist::{PersistJob, Persister};
use crate::seed;
use crate::store::{KeyValueStore, KEY_USER_BIGRAMS, KEY_USER_WORDS};

pub struct PredictionEngine {
    dict: RwLock<Dictionary>,
    bigrams: RwLock<BigramModel>,
    persister: Persister,
    config: EngineConfig,
}

impl PredictionEngine {
    /// Load persisted state from `store`, merge the built-in seed list, and
    /// start the persistence worker.
    pub fn open(store: Arc<dyn KeyValueStore>, config: EngineConfig) -> Self {
        Self::with_seed(store, config, seed::SEED_WORDS)
    }

    /// Like [`open`](Self::open) with a caller-supplied seed vocabulary.
    pub fn with_seed(
        store: Arc<dyn KeyValueStore>,
        config: EngineConfig,
        seed_words: &[&str],
    ) -> Self {
        let mut dict = Dictionary::seeded(seed_words);
        match store.get_string_set(KEY_USER_WORDS) {
            Ok(saved) => {
                for word in &saved {
                    dict.load_learned(word);
                }
            }
            Err(e) => warn!(error = %e, "starting with seed dictionary only"),
        }

        let max_next = config.learning.max_next_words;
        let bigrams = match store.get_string(KEY_USER_BIGRAMS) {
            Ok(Some(raw)) => BigramModel::from_json(&raw, max_next),
            Ok(None) => BigramModel::new(max_next),
            Err(e) => {
                warn!(error = %e, "starting with empty bigram model");
                BigramModel::new(max_next)
            }
        };

        debug!(
            words = dict.len(),
            bigram_keys = bigrams.len(),
            "prediction engine loaded"
        );

        Self {
            dict: RwLock::new(dict),
            bigrams: RwLock::new(bigrams),
            persister: Persister::spawn(store),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Dictionary words starting with `prefix`: case-insensitive, excluding
    /// the prefix itself, sorted ascending, capped. Empty prefix yields an
    /// empty list.
    pub fn suggestions(&self, prefix: &str) -> Vec<String> {
        let dict = self.dict.read().expect("engine lock poisoned");
        dict.prefix_matches(prefix, self.config.suggestions.max_results)
    }

    /// Next words observed after `previous`, most recent first. Empty when
    /// the word has no history.
    pub fn next_words(&self, previous: &str) -> Vec<String> {
        let bigrams = self.bigrams.read().expect("engine lock poisoned");
        bigrams.successors(previous)
    }

    /// Add `word` to the dictionary. Too-short input is ignored; re-learning
    /// a known word is a no-op.
    pub fn learn_word(&self, word: &str) {
        let word = word.trim();
        if word.chars().count() < self.config.learning.min_word_len {
            return;
        }
        let snapshot = {
            let mut dict = self.dict.write().expect("engine lock poisoned");
            if !dict.learn(word) {
                return;
            }
            dict.learned_snapshot()
        };
        debug!(word, "learned word");
        self.persister.submit(PersistJob::Words(snapshot));
    }

    /// Record that `current` followed `prev`. Empty input is ignored.
    pub fn learn_bigram(&self, prev: &str, current: &str) {
        let encoded = {
            let mut bigrams = self.bigrams.write().expect("engine lock poisoned");
            if !bigrams.learn(prev, current) {
                return;
            }
            bigrams.to_json()
        };
        self.persister.submit(PersistJob::Bigrams(encoded));
    }

    /// Closest dictionary word to `typo`, or `None` when no correction
    /// applies. See [`correct::best_match`] for the thresholds.
    pub fn best_match(&self, typo: &str) -> Option<String> {
        let dict = self.dict.read().expect("engine lock poisoned");
        correct::best_match(&dict, typo, &self.config.correction)
    }

    /// Synchronously persist the current learned state. The teardown path:
    /// call before dropping the engine when writes must not be lost.
    pub fn flush(&self) {
        let words = self
            .dict
            .read()
            .expect("engine lock poisoned")
            .learned_snapshot();
        let bigrams = self
            .bigrams
            .read()
            .expect("engine lock poisoned")
            .to_json();
        self.persister.flush(words, bigrams);
    }
}
