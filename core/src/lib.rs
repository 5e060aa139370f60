pub mod boolean;
pub mod cranfield;
pub mod error;
pub mod index;
pub mod merge;
pub mod normalizer;
pub mod persist;
pub mod posting;
pub mod processor;
pub mod spelling;
pub mod vector;

pub use error::QueryError;
pub use index::InvertedIndex;
pub use normalizer::NormalizerConfig;
pub use posting::{IndexItem, Posting};
pub use processor::QueryProcessor;
pub use spelling::SpellCorrector;

pub type DocId = u32;

/// A document as supplied by the collection loader. The index never stores
/// any of this content, only the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub doc_id: DocId,
    pub title: String,
    pub author: String,
    pub body: String,
}

impl Document {
    pub fn new(doc_id: DocId, title: impl Into<String>, author: impl Into<String>, body: impl Into<String>) -> Self {
        Self { doc_id, title: title.into(), author: author.into(), body: body.into() }
    }

    /// Text that gets indexed: title and body joined by a single space.
    pub fn indexable_text(&self) -> String {
        format!("{} {}", self.title, self.body)
    }
}
