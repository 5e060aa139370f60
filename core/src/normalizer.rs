use anyhow::{Context, Result};
use lazy_static::lazy_static;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_normalization::UnicodeNormalization;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::cranfield::load_collection;
use crate::spelling::SpellCorrector;

lazy_static! {
    static ref ENGLISH_STOPWORDS: Vec<&'static str> = vec![
        "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
        "be","because","been","before","being","below","between","both","but","by",
        "can","can't","cannot","could","couldn't",
        "did","didn't","do","does","doesn't","doing","don't","down","during",
        "each","few","for","from","further",
        "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
        "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
        "let's","me","more","most","mustn't","my","myself",
        "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
        "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
        "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
        "under","until","up","very",
        "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
        "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
    ];
}

/// Which side of the engine is normalizing. Only queries get spelling correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Document,
    Query,
}

/// Immutable normalization settings, built once and shared by reference
/// between indexing and querying.
pub struct NormalizerConfig {
    stopwords: HashSet<String>,
    stemmer: Stemmer,
    speller: Option<SpellCorrector>,
}

impl NormalizerConfig {
    pub fn new<I, S>(stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stopwords: stopwords
                .into_iter()
                .map(|w| {
                    let w: String = w.into();
                    w.to_lowercase()
                })
                .collect(),
            stemmer: Stemmer::create(Algorithm::English),
            speller: None,
        }
    }

    /// Built-in English stopword list.
    pub fn english() -> Self {
        Self::new(ENGLISH_STOPWORDS.iter().copied())
    }

    /// Reads a whitespace-separated stopword list.
    pub fn from_stopword_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading stopword list {}", path.display()))?;
        let config = Self::new(text.split_whitespace());
        tracing::debug!(path = %path.display(), stopwords = config.stopwords.len(), "loaded stopwords");
        Ok(config)
    }

    /// English defaults unless a stopword file is given.
    pub fn load(stopwords: Option<&Path>) -> Result<Self> {
        match stopwords {
            Some(path) => Self::from_stopword_file(path),
            None => Ok(Self::english()),
        }
    }

    /// Config for the query side: stopwords as in [`load`](Self::load) plus a
    /// spelling corrector over the built-in vocabulary, the stopwords, and,
    /// when given, every title and body of the collection.
    pub fn load_for_queries(stopwords: Option<&Path>, corpus: Option<&Path>) -> Result<Self> {
        let config = Self::load(stopwords)?;
        let mut speller = SpellCorrector::builtin();
        for word in &config.stopwords {
            speller.train(word);
        }
        if let Some(path) = corpus {
            for doc in load_collection(path)? {
                speller.train(&doc.indexable_text());
            }
        }
        tracing::info!(vocabulary = speller.vocabulary_len(), "spelling corrector ready");
        Ok(config.with_speller(speller))
    }

    pub fn with_speller(mut self, speller: SpellCorrector) -> Self {
        self.speller = Some(speller);
        self
    }

    pub fn speller(&self) -> Option<&SpellCorrector> {
        self.speller.as_ref()
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    pub fn stem(&self, token: &str) -> String {
        self.stemmer.stem(token).into_owned()
    }

    /// Runs a single raw token through the pipeline. `None` is the empty
    /// marker: a stopword or a token with nothing left after cleanup.
    pub fn normalize_token(&self, raw: &str, source: Source) -> Option<String> {
        let cleaned = clean_token(raw);
        if cleaned.is_empty() {
            return None;
        }
        let word = match (source, &self.speller) {
            (Source::Query, Some(speller)) => speller.correction(&cleaned),
            _ => cleaned,
        };
        if self.is_stopword(&word) {
            return None;
        }
        Some(self.stem(&word))
    }
}

/// NFKC, lowercase, then trim punctuation off both ends.
fn clean_token(raw: &str) -> String {
    let lowered = raw.nfkc().collect::<String>().to_lowercase();
    lowered.trim_matches(|c: char| !c.is_alphanumeric()).to_string()
}

/// Whitespace split. Boolean operator positions are indices into this.
pub fn split_raw(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// One slot per whitespace token. Stopwords stay as `None` so slot `i`
/// always lines up with raw token `i`.
pub fn normalize(config: &NormalizerConfig, text: &str, source: Source) -> Vec<Option<String>> {
    split_raw(text).into_iter().map(|raw| config.normalize_token(raw, source)).collect()
}

/// Document-side terms with their positions. Markers are dropped before
/// numbering, so positions count indexed terms only.
pub fn tokenize(config: &NormalizerConfig, text: &str) -> Vec<(String, usize)> {
    normalize(config, text, Source::Document)
        .into_iter()
        .flatten()
        .enumerate()
        .map(|(pos, term)| (term, pos))
        .collect()
}

/// Query-side terms, spelling corrected, markers dropped.
pub fn query_terms(config: &NormalizerConfig, text: &str) -> Vec<String> {
    normalize(config, text, Source::Query).into_iter().flatten().collect()
}
