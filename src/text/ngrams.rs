// N-gram candidate generation and frequency counting.
//
// Candidates are contiguous windows of 2-5 surviving tokens (stopwords
// and very short tokens removed first). Duplicates are deliberately
// preserved so the pipeline can count occurrences across the page set.

use std::collections::{HashMap, HashSet};

use super::normalize::tokenize;
use super::stopwords::french_stopwords;

/// Generates keyword candidates (n-grams) from raw text.
///
/// Immutable after construction; safe to share across requests.
#[derive(Debug, Clone)]
pub struct NgramAnalyzer {
    min_len: usize,
    max_len: usize,
    stopwords: HashSet<String>,
}

impl Default for NgramAnalyzer {
    fn default() -> Self {
        Self::new(2, 5, french_stopwords())
    }
}

impl NgramAnalyzer {
    pub fn new(min_len: usize, max_len: usize, stopwords: HashSet<String>) -> Self {
        // Inverted bounds would make every window empty; normalize them
        let (min_len, max_len) = if min_len <= max_len {
            (min_len, max_len)
        } else {
            (max_len, min_len)
        };
        Self {
            min_len: min_len.max(1),
            max_len: max_len.max(1),
            stopwords,
        }
    }

    /// Tokens that survive stopword and length filtering.
    fn filtered_tokens(&self, text: &str) -> Vec<String> {
        tokenize(text)
            .into_iter()
            .filter(|t| t.chars().count() > 2 && !self.stopwords.contains(t))
            .collect()
    }

    /// Every contiguous n-gram of the surviving tokens, for each window
    /// size from min to max. Lazy and restartable (the iterator is
    /// Clone); duplicates are preserved for frequency counting.
    pub fn extract_ngrams(&self, text: &str) -> Ngrams {
        Ngrams {
            tokens: self.filtered_tokens(text),
            window: self.min_len,
            max_window: self.max_len,
            start: 0,
        }
    }

    /// Union n-grams from every text into an occurrence count map.
    pub fn count_frequencies(&self, texts: &[String]) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for text in texts {
            for gram in self.extract_ngrams(text) {
                *counts.entry(gram).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Drop entries occurring fewer than `min_freq` times.
    pub fn filter_by_frequency(
        counts: HashMap<String, usize>,
        min_freq: usize,
    ) -> HashMap<String, usize> {
        counts.into_iter().filter(|(_, c)| *c >= min_freq).collect()
    }
}

/// Iterator over the n-grams of one text.
///
/// Walks every window position of the current size before moving to the
/// next size. A window size larger than the token count contributes
/// nothing.
#[derive(Debug, Clone)]
pub struct Ngrams {
    tokens: Vec<String>,
    window: usize,
    max_window: usize,
    start: usize,
}

impl Iterator for Ngrams {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while self.window <= self.max_window {
            if self.start + self.window <= self.tokens.len() {
                let gram = self.tokens[self.start..self.start + self.window].join(" ");
                self.start += 1;
                return Some(gram);
            }
            self.window += 1;
            self.start = 0;
        }
        None
    }
}
