// The topic modeler: an ordered fallback chain of strategies.
//
// Chain order: clustering (only when an encoder is configured) →
// lexical tf-idf → raw frequency. Each tier is a full replacement for
// the previous one; the modeler advances only when a tier reports
// failure, and the final tier cannot fail. extract_topics therefore
// never errors and never panics.

use std::sync::Arc;

use tracing::{debug, warn};

use super::clustering::EmbeddingClusterStrategy;
use super::frequency::FrequencyFallbackStrategy;
use super::lexical::LexicalTfIdfStrategy;
use super::traits::{TextEncoder, TopicStrategy};
use crate::model::Topic;

pub struct TopicModeler {
    strategies: Vec<Box<dyn TopicStrategy>>,
}

impl TopicModeler {
    /// Standard chain: lexical tf-idf with a frequency fallback. This
    /// is the configuration the engine runs in production — no
    /// embedding encoder is loaded.
    pub fn new() -> Self {
        Self {
            strategies: vec![
                Box::new(LexicalTfIdfStrategy::default()),
                Box::new(FrequencyFallbackStrategy),
            ],
        }
    }

    /// Chain with the embedding tier in front, for callers that supply
    /// a text encoder.
    pub fn with_encoder(encoder: Arc<dyn TextEncoder>) -> Self {
        Self {
            strategies: vec![
                Box::new(EmbeddingClusterStrategy::new(encoder)),
                Box::new(LexicalTfIdfStrategy::default()),
                Box::new(FrequencyFallbackStrategy),
            ],
        }
    }

    /// Discover up to `num_topics` labeled topics.
    ///
    /// Empty input short-circuits to no topics. Strategy failures are
    /// logged and absorbed; the caller only ever sees a (possibly
    /// empty) topic list.
    pub fn extract_topics(&self, texts: &[String], num_topics: usize) -> Vec<Topic> {
        if texts.iter().all(|t| t.trim().is_empty()) {
            return Vec::new();
        }

        for strategy in &self.strategies {
            match strategy.extract(texts, num_topics) {
                Ok(mut topics) => {
                    topics.truncate(num_topics);
                    debug!(
                        strategy = strategy.name(),
                        topics = topics.len(),
                        "topic extraction succeeded"
                    );
                    return topics;
                }
                Err(e) => {
                    warn!(
                        strategy = strategy.name(),
                        error = %e,
                        "topic strategy failed, falling back to the next tier"
                    );
                }
            }
        }

        Vec::new()
    }
}

impl Default for TopicModeler {
    fn default() -> Self {
        Self::new()
    }
}
