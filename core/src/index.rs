use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::normalizer::{tokenize, NormalizerConfig};
use crate::{DocId, Document, IndexItem};

/// Single-pass in-memory index. Build with `index_doc`, then call `sort`
/// once before querying or saving.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvertedIndex {
    items: HashMap<String, IndexItem>,
    num_docs: u32,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Indexes title and body of one document. Each document id must be
    /// indexed at most once.
    pub fn index_doc(&mut self, config: &NormalizerConfig, doc: &Document) {
        self.num_docs += 1;
        for (term, pos) in tokenize(config, &doc.indexable_text()) {
            self.items
                .entry(term)
                .or_insert_with_key(|t| IndexItem::new(t.as_str()))
                .add(doc.doc_id, pos as u32);
        }
    }

    pub fn index_all<'a, I>(&mut self, config: &NormalizerConfig, docs: I)
    where
        I: IntoIterator<Item = &'a Document>,
    {
        for doc in docs {
            self.index_doc(config, doc);
        }
        tracing::info!(num_docs = self.num_docs, num_terms = self.items.len(), "indexed documents");
    }

    /// Sorts every posting list by doc id and every position list ascending.
    pub fn sort(&mut self) {
        for item in self.items.values_mut() {
            item.sort();
        }
        tracing::debug!(num_terms = self.items.len(), "index finalized");
    }

    pub fn find(&self, term: &str) -> Option<&IndexItem> {
        self.items.get(term)
    }

    /// `log10(N / df)`, or 0 for a term that was never indexed.
    pub fn idf(&self, term: &str) -> f64 {
        match self.find(term) {
            Some(item) if item.doc_freq() > 0 => {
                (self.num_docs as f64 / item.doc_freq() as f64).log10()
            }
            _ => 0.0,
        }
    }

    pub fn num_docs(&self) -> u32 {
        self.num_docs
    }

    pub fn num_terms(&self) -> usize {
        self.items.len()
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.keys().map(String::as_str)
    }

    /// Indexed (non-stopword) token count per document, derived from postings.
    pub fn doc_lengths(&self) -> HashMap<DocId, u32> {
        let mut lengths: HashMap<DocId, u32> = HashMap::new();
        for item in self.items.values() {
            for (doc_id, posting) in &item.postings {
                *lengths.entry(*doc_id).or_insert(0) += posting.term_freq();
            }
        }
        lengths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy() -> InvertedIndex {
        let config = NormalizerConfig::english();
        let mut idx = InvertedIndex::new();
        idx.index_doc(&config, &Document::new(1, "alpha", "", "beta"));
        idx.index_doc(&config, &Document::new(2, "beta", "", "gamma"));
        idx.index_doc(&config, &Document::new(3, "alpha", "", "gamma"));
        idx.sort();
        idx
    }

    #[test]
    fn counts_documents() {
        assert_eq!(toy().num_docs(), 3);
        assert_eq!(toy().num_terms(), 3);
    }

    #[test]
    fn idf_is_zero_for_absent_term() {
        assert_eq!(toy().idf("delta"), 0.0);
    }

    #[test]
    fn idf_uses_log10() {
        let idx = toy();
        assert!((idx.idf("beta") - (1.5f64).log10()).abs() < 1e-12);
    }

    #[test]
    fn doc_lengths_skip_stopwords() {
        let config = NormalizerConfig::english();
        let mut idx = InvertedIndex::new();
        idx.index_doc(&config, &Document::new(1, "the wing", "", "of the aircraft wing"));
        assert_eq!(idx.doc_lengths()[&1], 3);
    }
}
