#![allow(dead_code)]

use ircore::{Document, InvertedIndex, NormalizerConfig};

/// doc 1 "alpha beta", doc 2 "beta gamma", doc 3 "alpha gamma"
pub fn toy_docs() -> Vec<Document> {
    vec![
        Document::new(1, "alpha", "a. author", "beta"),
        Document::new(2, "beta", "b. author", "gamma"),
        Document::new(3, "alpha", "c. author", "gamma"),
    ]
}

pub fn build(docs: &[Document]) -> InvertedIndex {
    let config = NormalizerConfig::english();
    let mut idx = InvertedIndex::new();
    idx.index_all(&config, docs);
    idx.sort();
    idx
}

pub fn toy_index() -> InvertedIndex {
    build(&toy_docs())
}

/// Six documents with nested and overlapping term sets:
/// wing ⊂ {1..4}, flutter = {3,4,5}, drag = {2,6}, panel = {4}
pub fn aero_docs() -> Vec<Document> {
    vec![
        Document::new(1, "wing loads", "", "static wing loads"),
        Document::new(2, "wing drag", "", "induced drag of a wing"),
        Document::new(3, "wing flutter", "", "flutter of a swept wing"),
        Document::new(4, "panel flutter", "", "wing panel flutter"),
        Document::new(5, "flutter", "", "flutter boundaries"),
        Document::new(6, "drag", "", "skin friction drag"),
    ]
}
