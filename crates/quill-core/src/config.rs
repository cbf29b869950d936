//! Engine configuration loaded from TOML.
//!
//! Defaults are embedded via `include_str!("default_config.toml")`. The
//! parsed [`EngineConfig`] is passed into constructors rather than held in a
//! process-wide global, so two engines with different tuning can coexist.

use serde::Deserialize;

pub const DEFAULT_CONFIG_TOML: &str = include_str!("default_config.toml");

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    pub suggestions: SuggestionConfig,
    pub learning: LearningConfig,
    pub correction: CorrectionConfig,
    pub input: InputConfig,
    pub translation: TranslationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionConfig {
    pub max_results: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LearningConfig {
    /// Words shorter than this (trimmed, in chars) are not learned.
    pub min_word_len: usize,
    /// Cap on the next-word list kept per previous word.
    pub max_next_words: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorrectionConfig {
    /// Typos shorter than this (trimmed, in chars) are never corrected.
    pub min_typo_len: usize,
    /// Maximum accepted edit distance.
    pub max_distance: usize,
    /// Maximum accepted |candidate length - typo length|.
    pub max_length_delta: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Space long-press delay before the input-method picker fires.
    pub long_press_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslationConfig {
    pub source_lang: String,
    pub target_lang: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        parse_config_toml(DEFAULT_CONFIG_TOML).expect("embedded default config must be valid")
    }
}

pub fn parse_config_toml(toml_str: &str) -> Result<EngineConfig, ConfigError> {
    let config: EngineConfig =
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

fn validate(c: &EngineConfig) -> Result<(), ConfigError> {
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if c.$section.$field == 0 {
                return Err(ConfigError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)),
                    reason: "must be positive",
                });
            }
        };
    }

    check_positive!(suggestions.max_results);
    check_positive!(learning.min_word_len);
    check_positive!(learning.max_next_words);
    check_positive!(correction.min_typo_len);
    check_positive!(correction.max_distance);
    check_positive!(input.long_press_ms);

    if c.translation.source_lang.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "translation.source_lang",
            reason: "must be a language code",
        });
    }
    if c.translation.target_lang.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "translation.target_lang",
            reason: "must be a language code",
        });
    }

    Ok(())
}
