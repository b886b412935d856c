// Embedding tier: density-based clustering over encoded texts.
//
// Classic DBSCAN with euclidean distance: points with at least
// `min_neighbors` points within `eps` seed a cluster, density-reachable
// points join it, everything else is noise and gets discarded. Clusters
// need two members to count — a topic backed by a single page isn't a
// topic.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;

use super::traits::{TextEncoder, TopicStrategy};
use super::{frequent_terms, make_label, MAX_TOPIC_TERMS};
use crate::model::Topic;

const NOISE: i32 = -1;
const UNVISITED: i32 = -2;

pub struct EmbeddingClusterStrategy {
    encoder: Arc<dyn TextEncoder>,
    /// Neighborhood radius for density reachability
    eps: f64,
    /// Minimum points (self included) to seed a cluster
    min_neighbors: usize,
}

impl EmbeddingClusterStrategy {
    pub fn new(encoder: Arc<dyn TextEncoder>) -> Self {
        Self {
            encoder,
            eps: 0.5,
            min_neighbors: 2,
        }
    }
}

impl TopicStrategy for EmbeddingClusterStrategy {
    fn name(&self) -> &'static str {
        "clustering"
    }

    fn extract(&self, texts: &[String], num_topics: usize) -> Result<Vec<Topic>> {
        let vectors = self.encoder.encode(texts)?;
        if vectors.len() != texts.len() {
            anyhow::bail!(
                "encoder returned {} vectors for {} texts",
                vectors.len(),
                texts.len()
            );
        }

        let labels = dbscan(&vectors, self.eps, self.min_neighbors);

        // Group member indices by cluster id, discarding noise.
        // Iterate in index order so clusters come out in discovery order.
        let mut members: HashMap<i32, Vec<usize>> = HashMap::new();
        let mut discovery_order: Vec<i32> = Vec::new();
        for (idx, &label) in labels.iter().enumerate() {
            if label == NOISE {
                continue;
            }
            let entry = members.entry(label).or_default();
            if entry.is_empty() {
                discovery_order.push(label);
            }
            entry.push(idx);
        }

        let mut topics = Vec::new();
        for label in discovery_order {
            if topics.len() >= num_topics {
                break;
            }
            let indices = &members[&label];
            if indices.len() < 2 {
                continue;
            }

            let joined: String = indices
                .iter()
                .map(|&i| texts[i].as_str())
                .collect::<Vec<_>>()
                .join(" ");
            let terms = frequent_terms(&joined, 3, 2, 20);
            if terms.is_empty() {
                continue;
            }

            topics.push(Topic {
                id: topics.len(),
                label: make_label(&terms),
                terms: terms.into_iter().take(MAX_TOPIC_TERMS).collect(),
            });
        }

        Ok(topics)
    }
}

fn euclidean(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = (*x - *y) as f64;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

fn neighbors(vectors: &[Vec<f32>], idx: usize, eps: f64) -> Vec<usize> {
    (0..vectors.len())
        .filter(|&j| euclidean(&vectors[idx], &vectors[j]) <= eps)
        .collect()
}

/// DBSCAN labeling: cluster id per point, -1 for noise.
fn dbscan(vectors: &[Vec<f32>], eps: f64, min_pts: usize) -> Vec<i32> {
    let mut labels = vec![UNVISITED; vectors.len()];
    let mut next_cluster = 0;

    for point in 0..vectors.len() {
        if labels[point] != UNVISITED {
            continue;
        }

        let seed_neighbors = neighbors(vectors, point, eps);
        if seed_neighbors.len() < min_pts {
            labels[point] = NOISE;
            continue;
        }

        let cluster = next_cluster;
        next_cluster += 1;
        labels[point] = cluster;

        let mut queue = seed_neighbors;
        let mut head = 0;
        while head < queue.len() {
            let q = queue[head];
            head += 1;

            if labels[q] == NOISE {
                labels[q] = cluster;
            }
            if labels[q] != UNVISITED {
                continue;
            }
            labels[q] = cluster;

            let q_neighbors = neighbors(vectors, q, eps);
            if q_neighbors.len() >= min_pts {
                queue.extend(q_neighbors);
            }
        }
    }

    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic stub encoder: maps each text to a fixed 2-d point.
    struct StubEncoder {
        points: Vec<Vec<f32>>,
    }

    impl TextEncoder for StubEncoder {
        fn encode(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(self.points.clone())
        }
    }

    struct FailingEncoder;

    impl TextEncoder for FailingEncoder {
        fn encode(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
            anyhow::bail!("model not loaded")
        }
    }

    #[test]
    fn dbscan_separates_two_dense_groups() {
        let vectors = vec![
            vec![0.0, 0.0],
            vec![0.1, 0.0],
            vec![0.2, 0.1],
            vec![5.0, 5.0],
            vec![5.1, 5.0],
            // Far from everything: noise
            vec![10.0, -10.0],
        ];
        let labels = dbscan(&vectors, 0.5, 2);
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[1], labels[2]);
        assert_eq!(labels[3], labels[4]);
        assert_ne!(labels[0], labels[3]);
        assert_eq!(labels[5], NOISE);
    }

    #[test]
    fn clusters_become_labeled_topics() {
        let texts = vec![
            "gestion cabinet avocat gestion cabinet".to_string(),
            "gestion cabinet avocat dossier gestion cabinet".to_string(),
            "facturation honoraires facturation honoraires".to_string(),
            "facturation honoraires juriste facturation honoraires".to_string(),
        ];
        let encoder = Arc::new(StubEncoder {
            points: vec![
                vec![0.0, 0.0],
                vec![0.1, 0.1],
                vec![4.0, 4.0],
                vec![4.1, 4.1],
            ],
        });
        let topics = EmbeddingClusterStrategy::new(encoder)
            .extract(&texts, 5)
            .unwrap();

        assert_eq!(topics.len(), 2);
        assert!(topics[0].label.contains("Gestion") || topics[0].label.contains("Cabinet"));
        assert!(topics[1].label.contains("Facturation") || topics[1].label.contains("Honoraires"));
        for topic in &topics {
            assert!(topic.terms.len() <= MAX_TOPIC_TERMS);
        }
    }

    #[test]
    fn encoder_failure_propagates() {
        let strategy = EmbeddingClusterStrategy::new(Arc::new(FailingEncoder));
        assert!(strategy
            .extract(&["texte".to_string()], 5)
            .is_err());
    }

    #[test]
    fn respects_num_topics_cap() {
        // Three dense pairs, but only 1 topic requested
        let texts: Vec<String> = (0..6)
            .map(|i| format!("terme{i} commun terme{i} commun terme{i}"))
            .collect();
        let encoder = Arc::new(StubEncoder {
            points: vec![
                vec![0.0, 0.0],
                vec![0.1, 0.0],
                vec![3.0, 3.0],
                vec![3.1, 3.0],
                vec![6.0, 6.0],
                vec![6.1, 6.0],
            ],
        });
        let topics = EmbeddingClusterStrategy::new(encoder)
            .extract(&texts, 1)
            .unwrap();
        assert_eq!(topics.len(), 1);
    }
}
