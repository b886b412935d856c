// Central configuration, loaded from environment variables.
//
// Every knob has a compiled default tuned for French legal-software
// audits; BALISE_* variables override them. The .env file is loaded at
// startup via dotenvy (in main, not here).

use std::env;

use anyhow::{Context, Result};

use crate::scoring::ranker::WeightConfig;

#[derive(Debug, Clone)]
pub struct Config {
    /// Signal weights for the aggregate score (should sum to ~1.0)
    pub weights: WeightConfig,
    /// Smallest n-gram window (tokens)
    pub ngram_min: usize,
    /// Largest n-gram window (tokens)
    pub ngram_max: usize,
    /// Candidates must occur at least this often across the page set
    pub min_frequency: usize,
    /// Suggestions below this aggregate score are dropped
    pub min_score: f64,
    /// Token-overlap ratio above which two keywords are near-duplicates
    pub diversity_threshold: f64,
    /// Hard cap on candidates entering the scoring stage
    pub max_candidates: usize,
    /// How many topics the modeler is asked for
    pub num_topics: usize,
    /// Default suggestion limit when the caller supplies none
    pub suggestion_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weights: WeightConfig::default(),
            ngram_min: 2,
            ngram_max: 5,
            min_frequency: 2,
            min_score: 0.3,
            diversity_threshold: 0.6,
            max_candidates: 300,
            num_topics: 5,
            suggestion_limit: 20,
        }
    }
}

impl Config {
    /// Load configuration from the environment, falling back to the
    /// compiled defaults for anything unset.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            weights: WeightConfig {
                thematic: env_f64("BALISE_WEIGHT_THEMATIC", defaults.weights.thematic)?,
                intent: env_f64("BALISE_WEIGHT_INTENT", defaults.weights.intent)?,
                mesh: env_f64("BALISE_WEIGHT_MESH", defaults.weights.mesh)?,
                readability: env_f64("BALISE_WEIGHT_READABILITY", defaults.weights.readability)?,
            },
            ngram_min: env_usize("BALISE_NGRAM_MIN", defaults.ngram_min)?,
            ngram_max: env_usize("BALISE_NGRAM_MAX", defaults.ngram_max)?,
            min_frequency: env_usize("BALISE_MIN_FREQUENCY", defaults.min_frequency)?,
            min_score: env_f64("BALISE_MIN_SCORE", defaults.min_score)?,
            diversity_threshold: env_f64(
                "BALISE_DIVERSITY_THRESHOLD",
                defaults.diversity_threshold,
            )?,
            max_candidates: env_usize("BALISE_MAX_CANDIDATES", defaults.max_candidates)?,
            num_topics: env_usize("BALISE_NUM_TOPICS", defaults.num_topics)?,
            suggestion_limit: env_usize("BALISE_SUGGESTION_LIMIT", defaults.suggestion_limit)?,
        })
    }
}

fn env_f64(key: &str, default: f64) -> Result<f64> {
    match env::var(key) {
        Ok(raw) => raw
            .parse::<f64>()
            .with_context(|| format!("{key} is not a valid number: {raw:?}")),
        Err(_) => Ok(default),
    }
}

fn env_usize(key: &str, default: usize) -> Result<usize> {
    match env::var(key) {
        Ok(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("{key} is not a valid integer: {raw:?}")),
        Err(_) => Ok(default),
    }
}
