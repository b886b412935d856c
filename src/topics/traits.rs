// Strategy seams for topic discovery.
//
// The modeler walks an ordered list of strategies and advances to the
// next one only when the current one fails — an explicit chain instead
// of exception-driven fallback.

use anyhow::Result;

use crate::model::Topic;

/// One tier of the topic-discovery fallback chain.
pub trait TopicStrategy: Send + Sync {
    /// Short name for logging ("clustering", "lexical", "frequency").
    fn name(&self) -> &'static str;

    /// Discover up to `num_topics` topics in the given texts.
    ///
    /// An `Err` means this tier cannot handle the corpus and the next
    /// tier should try; `Ok(vec![])` is a real "nothing found" answer.
    fn extract(&self, texts: &[String], num_topics: usize) -> Result<Vec<Topic>>;
}

/// Turns texts into dense vectors for the clustering tier.
///
/// No encoder ships with the crate — the reference deployment never
/// loads one — but the seam lets a caller plug in a real embedding
/// model without touching the modeler.
pub trait TextEncoder: Send + Sync {
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}
