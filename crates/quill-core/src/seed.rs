//! Built-in seed vocabulary merged into the dictionary at engine open.
//!
//! Seed words are never written back to the store; only runtime-learned
//! words persist.

pub const SEED_WORDS: &[&str] = &[
    "the", "and", "that", "have", "for", "not", "with", "you", "but", "his", "from", "they",
    "we", "say", "her", "she", "or", "an", "will", "my", "one", "all", "would", "there",
    "their", "what", "so", "up", "out", "if", "about", "who", "get", "which", "go", "me",
    "when", "make", "can", "like", "time", "no", "just", "him", "know", "take", "people",
    "into", "year", "your", "good", "some", "could", "see", "other", "now", "look", "only",
    "come", "its", "over", "think", "also", "back", "after", "use", "two", "how", "our",
    "work", "first", "well", "way", "even", "new", "want", "because", "any", "give", "day",
    "most", "are", "love", "keyboard", "translate", "message", "today",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_words_are_lowercase_and_distinct() {
        let mut seen = std::collections::BTreeSet::new();
        for word in SEED_WORDS {
            assert_eq!(*word, word.to_lowercase());
            assert!(seen.insert(*word), "duplicate seed word: {word}");
        }
    }

    // The suggestion row shows at most five "th" completions; the seed is
    // curated so the common demonstratives win those slots.
    #[test]
    fn seed_th_words_are_the_curated_six() {
        let mut th: Vec<&str> = SEED_WORDS
            .iter()
            .copied()
            .filter(|w| w.starts_with("th"))
            .collect();
        th.sort_unstable();
        assert_eq!(th, vec!["that", "the", "their", "there", "they", "think"]);
    }
}
