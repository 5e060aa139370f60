use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::normalizer::{query_terms, NormalizerConfig};
use crate::{DocId, InvertedIndex};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredDoc {
    pub doc_id: DocId,
    pub score: f64,
}

/// Ranks documents against a query. Query terms are weighted
/// `log10(1 + tf_q) * idf`; each document accumulates
/// `weight * tf_d` over the query terms it contains, divided by its
/// indexed token count.
pub struct VectorRanker<'a> {
    index: &'a InvertedIndex,
    doc_lengths: HashMap<DocId, u32>,
}

impl<'a> VectorRanker<'a> {
    pub fn new(index: &'a InvertedIndex) -> Self {
        Self { index, doc_lengths: index.doc_lengths() }
    }

    /// Top `k` documents sharing at least one term with the query, best
    /// first, ties by ascending doc id.
    pub fn rank(&self, config: &NormalizerConfig, query: &str, k: usize) -> Vec<ScoredDoc> {
        let mut tf_query: BTreeMap<String, u32> = BTreeMap::new();
        for term in query_terms(config, query) {
            *tf_query.entry(term).or_insert(0) += 1;
        }
        self.rank_terms(&tf_query, k)
    }

    pub fn rank_terms(&self, tf_query: &BTreeMap<String, u32>, k: usize) -> Vec<ScoredDoc> {
        let mut scores: HashMap<DocId, f64> = HashMap::new();
        for (term, tf_q) in tf_query {
            let Some(item) = self.index.find(term) else { continue };
            let weight = (1.0 + *tf_q as f64).log10() * self.index.idf(term);
            for (doc_id, posting) in &item.postings {
                *scores.entry(*doc_id).or_insert(0.0) += weight * posting.term_freq() as f64;
            }
        }

        let mut ranked: Vec<ScoredDoc> = scores
            .into_iter()
            .map(|(doc_id, dot)| {
                let len = self.doc_lengths.get(&doc_id).copied().unwrap_or(1).max(1);
                ScoredDoc { doc_id, score: dot / len as f64 }
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.doc_id.cmp(&b.doc_id))
        });
        ranked.truncate(k);
        tracing::debug!(terms = tf_query.len(), returned = ranked.len(), "vector query");
        ranked
    }
}
