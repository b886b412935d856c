// Failure-fallback tier: raw token frequency over the whole corpus.
//
// Runs when both richer tiers have failed. It cannot itself fail: at
// worst it finds nothing frequent and reports zero topics.

use anyhow::Result;

use super::traits::TopicStrategy;
use super::{frequent_terms, make_label, MAX_TOPIC_TERMS};
use crate::model::Topic;

pub struct FrequencyFallbackStrategy;

impl TopicStrategy for FrequencyFallbackStrategy {
    fn name(&self) -> &'static str {
        "frequency"
    }

    fn extract(&self, texts: &[String], _num_topics: usize) -> Result<Vec<Topic>> {
        let joined = texts.join(" ");
        let terms = frequent_terms(&joined, 4, 2, MAX_TOPIC_TERMS);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        // One topic, labeled from the single most frequent term
        Ok(vec![Topic {
            id: 0,
            label: make_label(&terms[..1]),
            terms,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_one_topic_from_most_frequent_term() {
        let texts = vec![
            "avocat avocat cabinet cabinet cabinet".to_string(),
            "avocat dossier dossier".to_string(),
        ];
        let topics = FrequencyFallbackStrategy.extract(&texts, 5).unwrap();
        assert_eq!(topics.len(), 1);
        // avocat and cabinet both occur three times; the alphabetical
        // tie-break makes avocat the label term
        assert_eq!(topics[0].label, "Avocat");
        assert!(topics[0].terms.contains(&"cabinet".to_string()));
        assert!(topics[0].terms.len() <= MAX_TOPIC_TERMS);
    }

    #[test]
    fn nothing_frequent_means_no_topics() {
        let texts = vec!["chaque mot apparaît seulement une fois".to_string()];
        let topics = FrequencyFallbackStrategy.extract(&texts, 5).unwrap();
        assert!(topics.is_empty());
    }

    #[test]
    fn short_tokens_are_ignored() {
        // "loi" repeats but is under the 4-character floor
        let texts = vec!["loi loi loi loi".to_string()];
        let topics = FrequencyFallbackStrategy.extract(&texts, 5).unwrap();
        assert!(topics.is_empty());
    }
}
