// Lexical tier: weighted term frequency over the whole corpus.
//
// This is the default active path — the clustering tier only runs when
// a text encoder is plugged in. The corpus is vectorized with tf-idf
// over 1-3-word terms (document frequency >= 2, at most 1000 distinct
// terms, no stopword removal), the mean weight per term is taken across
// documents, and the top terms are partitioned into contiguous slices
// that become the topics.

use std::collections::{HashMap, HashSet};

use anyhow::Result;

use super::traits::TopicStrategy;
use super::{make_label, MAX_TOPIC_TERMS};
use crate::model::Topic;
use crate::text::normalize::tokenize;

pub struct LexicalTfIdfStrategy {
    /// Vocabulary cap (most frequent terms kept)
    max_terms: usize,
    /// Minimum number of documents a term must appear in
    min_document_freq: usize,
    /// How many top mean-weight terms feed the slices
    top_terms: usize,
}

impl Default for LexicalTfIdfStrategy {
    fn default() -> Self {
        Self {
            max_terms: 1000,
            min_document_freq: 2,
            top_terms: 50,
        }
    }
}

impl TopicStrategy for LexicalTfIdfStrategy {
    fn name(&self) -> &'static str {
        "lexical"
    }

    fn extract(&self, texts: &[String], num_topics: usize) -> Result<Vec<Topic>> {
        if num_topics == 0 {
            return Ok(Vec::new());
        }

        // Term counts per document, over 1-3-token windows.
        // No stopword removal here: common glue words get downweighted
        // by idf instead.
        let doc_counts: Vec<HashMap<String, usize>> = texts
            .iter()
            .map(|text| term_counts(&tokenize(text)))
            .collect();

        // Document frequency per term
        let mut document_freq: HashMap<&str, usize> = HashMap::new();
        for counts in &doc_counts {
            for term in counts.keys() {
                *document_freq.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        // Vocabulary: min-df filter, then cap to the most frequent terms
        let mut corpus_freq: HashMap<&str, usize> = HashMap::new();
        for counts in &doc_counts {
            for (term, count) in counts {
                *corpus_freq.entry(term.as_str()).or_insert(0) += count;
            }
        }
        let mut vocabulary: Vec<&str> = document_freq
            .iter()
            .filter(|(_, df)| **df >= self.min_document_freq)
            .map(|(term, _)| *term)
            .collect();
        if vocabulary.is_empty() {
            // Mirrors the vectorizer contract: an empty vocabulary is a
            // failure of this tier, not an empty answer
            anyhow::bail!(
                "empty vocabulary: no term appears in at least {} documents",
                self.min_document_freq
            );
        }
        vocabulary.sort_by(|a, b| {
            corpus_freq[b]
                .cmp(&corpus_freq[a])
                .then_with(|| a.cmp(b))
        });
        vocabulary.truncate(self.max_terms);
        let vocab_set: HashSet<&str> = vocabulary.iter().copied().collect();

        // Mean tf-idf weight per term across all documents
        let n_docs = texts.len() as f64;
        let mut mean_weight: HashMap<&str, f64> = HashMap::new();
        for counts in &doc_counts {
            // L2 norm over this document's in-vocabulary weights
            let mut doc_weights: Vec<(&str, f64)> = Vec::new();
            for (term, count) in counts {
                if !vocab_set.contains(term.as_str()) {
                    continue;
                }
                let df = document_freq[term.as_str()] as f64;
                let idf = ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0;
                doc_weights.push((term.as_str(), *count as f64 * idf));
            }
            let norm = doc_weights
                .iter()
                .map(|(_, w)| w * w)
                .sum::<f64>()
                .sqrt();
            if norm <= f64::EPSILON {
                continue;
            }
            for (term, weight) in doc_weights {
                *mean_weight.entry(term).or_insert(0.0) += weight / norm / n_docs;
            }
        }

        // Top terms by mean weight (ties alphabetical for determinism)
        let mut ranked: Vec<(&str, f64)> = mean_weight.into_iter().collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        let top: Vec<&str> = ranked
            .into_iter()
            .take(self.top_terms)
            .map(|(t, _)| t)
            .collect();

        Ok(slice_into_topics(&top, num_topics))
    }
}

/// Counts of 1-3-token windows in one document.
fn term_counts(tokens: &[String]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for n in 1..=3 {
        if tokens.len() < n {
            break;
        }
        for window in tokens.windows(n) {
            *counts.entry(window.join(" ")).or_insert(0) += 1;
        }
    }
    counts
}

/// Partition the ranked terms into `num_topics` contiguous slices of
/// roughly equal size (remainder appended to the last slice); terms of
/// length <= 2 are dropped inside each slice, and slices left with no
/// terms are skipped.
fn slice_into_topics(top: &[&str], num_topics: usize) -> Vec<Topic> {
    if top.is_empty() {
        return Vec::new();
    }

    let chunk = (top.len() / num_topics).max(1);
    let mut topics = Vec::new();

    for i in 0..num_topics {
        let start = i * chunk;
        if start >= top.len() {
            break;
        }
        let end = if i == num_topics - 1 {
            top.len()
        } else {
            ((i + 1) * chunk).min(top.len())
        };

        let terms: Vec<String> = top[start..end]
            .iter()
            .filter(|t| t.chars().count() > 2)
            .map(|t| (*t).to_string())
            .collect();
        if terms.is_empty() {
            continue;
        }

        topics.push(Topic {
            id: topics.len(),
            label: make_label(&terms),
            terms: terms.into_iter().take(MAX_TOPIC_TERMS).collect(),
        });
    }

    topics
}
