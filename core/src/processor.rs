use crate::boolean::boolean_query;
use crate::error::QueryResult;
use crate::normalizer::NormalizerConfig;
use crate::vector::{ScoredDoc, VectorRanker};
use crate::{DocId, InvertedIndex};

/// Runs many queries against one finalized index with one normalizer
/// config. Document lengths for ranking are computed once up front.
pub struct QueryProcessor<'a> {
    config: &'a NormalizerConfig,
    index: &'a InvertedIndex,
    ranker: VectorRanker<'a>,
}

impl<'a> QueryProcessor<'a> {
    pub fn new(index: &'a InvertedIndex, config: &'a NormalizerConfig) -> Self {
        Self { config, index, ranker: VectorRanker::new(index) }
    }

    pub fn boolean_query(&self, raw: &str) -> QueryResult<Vec<DocId>> {
        boolean_query(self.index, self.config, raw)
    }

    pub fn vector_query(&self, raw: &str, k: usize) -> Vec<ScoredDoc> {
        self.ranker.rank(self.config, raw, k)
    }
}
