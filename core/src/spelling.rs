use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{HashMap, HashSet};

use crate::Document;

const LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";

/// General and aeronautical English, one word per line.
const BUILTIN_VOCABULARY: &str = include_str!("../data/vocabulary.txt");

lazy_static! {
    static ref WORD: Regex = Regex::new(r"[a-z]+").expect("valid regex");
}

/// Word-frequency spelling corrector. Candidates within edit distance 1 win
/// over distance 2; among candidates the most frequent word wins.
#[derive(Debug, Clone, Default)]
pub struct SpellCorrector {
    counts: HashMap<String, u64>,
}

impl SpellCorrector {
    pub fn from_text(text: &str) -> Self {
        let mut speller = Self::default();
        speller.train(text);
        speller
    }

    /// The embedded default vocabulary. Queries are corrected against this
    /// even when no collection is at hand.
    pub fn builtin() -> Self {
        Self::from_text(BUILTIN_VOCABULARY)
    }

    /// Vocabulary built from the title and body of every document.
    pub fn from_documents<'a, I>(docs: I) -> Self
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let mut speller = Self::default();
        for doc in docs {
            speller.train(&doc.indexable_text());
        }
        tracing::debug!(vocabulary = speller.vocabulary_len(), "trained spelling corrector");
        speller
    }

    pub fn train(&mut self, text: &str) {
        let lowered = text.to_lowercase();
        for m in WORD.find_iter(&lowered) {
            *self.counts.entry(m.as_str().to_string()).or_insert(0) += 1;
        }
    }

    pub fn is_known(&self, word: &str) -> bool {
        self.counts.contains_key(word)
    }

    pub fn vocabulary_len(&self) -> usize {
        self.counts.len()
    }

    /// Tokens with anything other than ascii letters pass through untouched.
    pub fn correction(&self, word: &str) -> String {
        if word.is_empty() || !word.bytes().all(|b| b.is_ascii_lowercase()) || self.is_known(word) {
            return word.to_string();
        }
        let first = edits1(word);
        if let Some(best) = self.best_of(first.iter()) {
            return best;
        }
        let second: HashSet<String> = first.iter().flat_map(|e| edits1(e)).collect();
        self.best_of(second.iter()).unwrap_or_else(|| word.to_string())
    }

    fn best_of<'a, I>(&self, candidates: I) -> Option<String>
    where
        I: Iterator<Item = &'a String>,
    {
        candidates
            .filter_map(|c| self.counts.get(c).map(|&n| (n, c)))
            .max_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.cmp(a.1)))
            .map(|(_, c)| c.clone())
    }
}

/// Every string one deletion, transposition, replacement or insertion away.
fn edits1(word: &str) -> HashSet<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut out = HashSet::new();
    for i in 0..=chars.len() {
        let (left, right) = chars.split_at(i);
        let left: String = left.iter().collect();
        if !right.is_empty() {
            let rest: String = right[1..].iter().collect();
            out.insert(format!("{left}{rest}"));
            if right.len() > 1 {
                let tail: String = right[2..].iter().collect();
                out.insert(format!("{left}{}{}{tail}", right[1], right[0]));
            }
            for c in LETTERS.chars() {
                out.insert(format!("{left}{c}{rest}"));
            }
        }
        let right: String = right.iter().collect();
        for c in LETTERS.chars() {
            out.insert(format!("{left}{c}{right}"));
        }
    }
    out
}
