// The analysis pipeline: candidates → signals → ranking → filtering →
// diversity → limit, plus topic extraction over the same corpus.
//
// Candidate volume grows with pages × tokens × window sizes, so the
// candidate list is capped by corpus frequency before the scoring
// stage — scoring is the expensive part.

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::config::Config;
use crate::error::AnalysisError;
use crate::model::{AnalysisReport, Candidate, Evidence, Page, SignalScores, Suggestion};
use crate::scoring::ranker::KeywordRanker;
use crate::scoring::signals;
use crate::text::ngrams::NgramAnalyzer;
use crate::text::normalize::tokenize;
use crate::text::stopwords::french_stopwords;
use crate::topics::modeler::TopicModeler;

/// Evidence entries kept per suggestion.
const MAX_EVIDENCE: usize = 5;

/// The whole engine behind one audit: n-gram generation, signal
/// scoring, ranking, and topic discovery.
///
/// Immutable after construction — build one and share it by reference
/// across concurrent requests.
pub struct Analyzer {
    ngrams: NgramAnalyzer,
    ranker: KeywordRanker,
    modeler: TopicModeler,
    min_frequency: usize,
    min_score: f64,
    diversity_threshold: f64,
    max_candidates: usize,
    num_topics: usize,
    show_progress: bool,
}

impl Analyzer {
    pub fn new(config: &Config) -> Self {
        Self {
            ngrams: NgramAnalyzer::new(config.ngram_min, config.ngram_max, french_stopwords()),
            ranker: KeywordRanker::new(config.weights),
            modeler: TopicModeler::new(),
            min_frequency: config.min_frequency,
            min_score: config.min_score,
            diversity_threshold: config.diversity_threshold,
            max_candidates: config.max_candidates,
            num_topics: config.num_topics,
            show_progress: true,
        }
    }

    /// Swap in a modeler with a different strategy chain (e.g. one
    /// carrying an embedding encoder).
    pub fn with_modeler(mut self, modeler: TopicModeler) -> Self {
        self.modeler = modeler;
        self
    }

    /// Disable the scoring progress bar. The terminal bar belongs to
    /// the CLI; concurrent server requests must not draw to stderr.
    pub fn silent(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Run the full analysis for one audit.
    ///
    /// Empty page sets and pages with empty fields produce an empty
    /// report; a page whose non-empty content cannot be tokenized at
    /// all is a caller-side defect and surfaces as `MalformedPage`.
    pub fn analyze(
        &self,
        audit_id: &str,
        pages: &[Page],
        limit: usize,
    ) -> Result<AnalysisReport, AnalysisError> {
        validate_pages(pages)?;

        let content_texts: Vec<String> = pages.iter().map(page_corpus_text).collect();

        let candidates = self.generate_candidates(pages);
        info!(
            audit_id,
            pages = pages.len(),
            candidates = candidates.len(),
            "candidate generation complete"
        );

        let scored = self.score_candidates(candidates, pages, &content_texts);
        let ranked = self.ranker.rank_keywords(scored);

        let filtered: Vec<Candidate> = ranked
            .into_iter()
            .filter(|c| c.score >= self.min_score)
            .collect();
        let diverse = self.apply_diversity_filter(filtered);

        let suggestions: Vec<Suggestion> = diverse
            .into_iter()
            .take(limit)
            .map(|c| Suggestion {
                reason: build_reason(&c.signals),
                keyword: c.keyword,
                score: c.score,
                evidence: c.evidence,
            })
            .collect();

        let topics = self.modeler.extract_topics(&content_texts, self.num_topics);
        info!(
            audit_id,
            suggestions = suggestions.len(),
            topics = topics.len(),
            "analysis complete"
        );

        Ok(AnalysisReport {
            audit_id: audit_id.to_string(),
            generated_at: chrono::Utc::now(),
            page_count: pages.len(),
            topics,
            suggestions,
        })
    }

    /// N-gram candidates from every textual field of every page,
    /// deduplicated by keyword text with per-page evidence retained.
    fn generate_candidates(&self, pages: &[Page]) -> Vec<Candidate> {
        use std::collections::HashMap;

        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut evidence: HashMap<String, Vec<Evidence>> = HashMap::new();

        for page in pages {
            for (field, text) in page_fields(page) {
                let mut seen_here = std::collections::HashSet::new();
                for gram in self.ngrams.extract_ngrams(&text) {
                    *counts.entry(gram.clone()).or_insert(0) += 1;
                    // One evidence entry per (page, field, keyword)
                    if seen_here.insert(gram.clone()) {
                        let entries = evidence.entry(gram).or_default();
                        if entries.len() < MAX_EVIDENCE {
                            entries.push(Evidence {
                                url: page.url.clone(),
                                field: field.to_string(),
                            });
                        }
                    }
                }
            }
        }

        let counts = NgramAnalyzer::filter_by_frequency(counts, self.min_frequency);

        let mut candidates: Vec<Candidate> = counts
            .into_iter()
            .map(|(keyword, frequency)| {
                let mut candidate = Candidate::new(keyword, frequency);
                candidate.evidence = evidence.remove(&candidate.keyword).unwrap_or_default();
                candidate
            })
            .collect();

        // Cap before scoring: most frequent first, alphabetical on ties
        // so the cut is deterministic
        candidates.sort_by(|a, b| {
            b.frequency
                .cmp(&a.frequency)
                .then_with(|| a.keyword.cmp(&b.keyword))
        });
        candidates.truncate(self.max_candidates);
        candidates
    }

    /// Compute the four signals for every candidate.
    fn score_candidates(
        &self,
        mut candidates: Vec<Candidate>,
        pages: &[Page],
        content_texts: &[String],
    ) -> Vec<Candidate> {
        let pb = if self.show_progress {
            ProgressBar::new(candidates.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  Scoring [{bar:30}] {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        for candidate in &mut candidates {
            candidate.signals = SignalScores {
                thematic: signals::thematic_score(&candidate.keyword, content_texts),
                intent: signals::intent_score(&candidate.keyword),
                mesh: signals::mesh_evidence_score(&candidate.keyword, pages),
                readability: signals::readability_score(&candidate.keyword),
            };
            pb.inc(1);
        }
        pb.finish_and_clear();

        candidates
    }

    /// Suppress near-duplicates of already-accepted candidates.
    ///
    /// Input must be ranked: the higher-scored candidate is accepted
    /// first, so on conflict it always wins.
    fn apply_diversity_filter(&self, ranked: Vec<Candidate>) -> Vec<Candidate> {
        let mut accepted: Vec<Candidate> = Vec::new();

        'next: for candidate in ranked {
            let tokens: std::collections::HashSet<String> =
                tokenize(&candidate.keyword).into_iter().collect();

            for kept in &accepted {
                if kept.keyword.contains(&candidate.keyword)
                    || candidate.keyword.contains(&kept.keyword)
                {
                    continue 'next;
                }
                let kept_tokens: std::collections::HashSet<String> =
                    tokenize(&kept.keyword).into_iter().collect();
                let union = tokens.union(&kept_tokens).count();
                if union > 0 {
                    let shared = tokens.intersection(&kept_tokens).count();
                    if shared as f64 / union as f64 >= self.diversity_threshold {
                        continue 'next;
                    }
                }
            }
            accepted.push(candidate);
        }

        accepted
    }
}

/// Reject pages whose non-empty content yields no tokens anywhere.
fn validate_pages(pages: &[Page]) -> Result<(), AnalysisError> {
    for page in pages {
        let raw_len: usize = page_fields(page).iter().map(|(_, t)| t.trim().len()).sum();
        if raw_len == 0 {
            // Merely empty: contributes nothing, but is not an error
            continue;
        }
        let has_tokens = page_fields(page)
            .iter()
            .any(|(_, text)| !tokenize(text).is_empty());
        if !has_tokens {
            return Err(AnalysisError::MalformedPage {
                url: page.url.clone(),
            });
        }
    }
    Ok(())
}

/// The textual fields of a page, tagged with their field name.
fn page_fields(page: &Page) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("title", page.title.clone()),
        ("h1", page.h1.clone()),
        ("content", page.content.clone()),
    ];
    for h2 in &page.h2 {
        fields.push(("h2", h2.clone()));
    }
    for h3 in &page.h3 {
        fields.push(("h3", h3.clone()));
    }
    for anchor in &page.anchors {
        fields.push(("anchor", anchor.text.clone()));
    }
    fields
}

/// One combined text per page for thematic scoring and topic modeling.
/// Empty fields are dropped so they never pad the joined text.
pub fn page_corpus_text(page: &Page) -> String {
    let mut parts = vec![page.title.clone(), page.h1.clone()];
    parts.extend(page.h2.iter().cloned());
    parts.extend(page.h3.iter().cloned());
    parts.push(page.content.clone());
    parts.retain(|p| !p.trim().is_empty());
    parts.join(" ")
}

/// Short French explanation derived from the dominant signals.
fn build_reason(signals: &SignalScores) -> String {
    let mut reasons = Vec::new();
    if signals.thematic >= 0.5 {
        reasons.push("forte pertinence thématique");
    }
    if signals.intent >= 0.5 {
        reasons.push("intention de recherche marquée");
    }
    if signals.mesh >= 0.5 {
        reasons.push("corroboré par le maillage interne");
    }
    if signals.readability >= 0.5 {
        reasons.push("formulation naturelle");
    }
    if reasons.is_empty() {
        "correspondance générale avec le contenu du site".to_string()
    } else {
        reasons.join(", ")
    }
}
