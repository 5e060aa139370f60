use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::DocId;

/// Occurrences of one term in one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub positions: Vec<u32>, // token positions, ascending once sorted
}

impl Posting {
    pub fn new(doc_id: DocId) -> Self {
        Self { doc_id, positions: Vec::new() }
    }

    pub fn append(&mut self, pos: u32) {
        self.positions.push(pos);
    }

    pub fn sort(&mut self) {
        self.positions.sort_unstable();
    }

    /// Appends positions from another posting of the same term and document.
    pub fn merge(&mut self, positions: &[u32]) {
        self.positions.extend_from_slice(positions);
    }

    pub fn term_freq(&self) -> u32 {
        self.positions.len() as u32
    }
}

/// Term record: every document the term occurs in, plus the sorted
/// posting list derived from it on finalize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexItem {
    pub term: String,
    pub postings: HashMap<DocId, Posting>,
    pub posting_list: Vec<DocId>,
}

impl IndexItem {
    pub fn new(term: impl Into<String>) -> Self {
        Self { term: term.into(), postings: HashMap::new(), posting_list: Vec::new() }
    }

    pub fn add(&mut self, doc_id: DocId, pos: u32) {
        self.postings
            .entry(doc_id)
            .or_insert_with(|| Posting::new(doc_id))
            .append(pos);
    }

    /// Rebuilds the posting list in doc id order and sorts every position list.
    pub fn sort(&mut self) {
        for posting in self.postings.values_mut() {
            posting.sort();
        }
        let mut ids: Vec<DocId> = self.postings.keys().copied().collect();
        ids.sort_unstable();
        self.posting_list = ids;
    }

    pub fn posting(&self, doc_id: DocId) -> Option<&Posting> {
        self.postings.get(&doc_id)
    }

    /// Zero when the term does not occur in `doc_id`.
    pub fn term_freq(&self, doc_id: DocId) -> u32 {
        self.posting(doc_id).map_or(0, Posting::term_freq)
    }

    pub fn doc_freq(&self) -> usize {
        self.postings.len()
    }

    /// Postings in posting-list order. Only meaningful after `sort`.
    pub fn sorted_postings(&self) -> impl Iterator<Item = &Posting> + '_ {
        self.posting_list.iter().filter_map(move |id| self.postings.get(id))
    }
}
