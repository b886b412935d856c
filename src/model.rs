// Core data records for a single analysis request.
//
// Everything here lives for exactly one audit: pages come in, ranked
// suggestions and labeled topics go out. Nothing is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A link found on a crawled page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anchor {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub href: String,
}

/// One crawled page, as delivered by the crawl agent.
///
/// Immutable input — the engine never mutates a page. Most fields are
/// optional in the crawl JSON, so they all default to empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub url: String,
    /// BCP 47 language tag reported by the crawler (usually "fr").
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub h1: String,
    #[serde(default)]
    pub h2: Vec<String>,
    #[serde(default)]
    pub h3: Vec<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub anchors: Vec<Anchor>,
    #[serde(default)]
    pub depth: u32,
    #[serde(default)]
    pub outgoing_links: u32,
    #[serde(default)]
    pub incoming_links: u32,
    #[serde(default)]
    pub canonical_url: Option<String>,
}

fn default_language() -> String {
    "fr".to_string()
}

/// The four ranking signals, each in [0.0, 1.0].
///
/// A typed record rather than a map: a signal that was never computed
/// stays at 0.0, which preserves the "missing signal contributes zero"
/// aggregation contract.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SignalScores {
    pub thematic: f64,
    pub intent: f64,
    pub mesh: f64,
    pub readability: f64,
}

/// Where a candidate keyword was observed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evidence {
    /// URL of the page the keyword came from
    pub url: String,
    /// Which textual field produced it ("title", "h1", "content", ...)
    pub field: String,
}

/// A keyword candidate moving through the scoring pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub keyword: String,
    /// How many times the n-gram occurred across the whole page set
    pub frequency: usize,
    pub signals: SignalScores,
    /// Weighted aggregate, attached by the ranker
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub evidence: Vec<Evidence>,
}

impl Candidate {
    pub fn new(keyword: impl Into<String>, frequency: usize) -> Self {
        Self {
            keyword: keyword.into(),
            frequency,
            signals: SignalScores::default(),
            score: 0.0,
            evidence: Vec::new(),
        }
    }
}

/// A discovered topic cluster with a human-readable label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub id: usize,
    pub label: String,
    /// Representative terms, most significant first (at most 10)
    pub terms: Vec<String>,
}

/// A ranked keyword suggestion, ready for the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub keyword: String,
    pub score: f64,
    /// Short French phrase explaining why the keyword was retained
    pub reason: String,
    pub evidence: Vec<Evidence>,
}

/// An analysis request: an audit identifier plus the crawled pages.
///
/// This is the shape of the crawl JSON file the CLI reads and the body
/// the web surface accepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRequest {
    #[serde(default)]
    pub audit_id: String,
    #[serde(default)]
    pub pages: Vec<Page>,
}

/// The full result of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub audit_id: String,
    pub generated_at: DateTime<Utc>,
    pub page_count: usize,
    pub topics: Vec<Topic>,
    pub suggestions: Vec<Suggestion>,
}
