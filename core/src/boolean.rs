//! Boolean retrieval with `OR`, `NOT` and parentheses; adjacent operands are
//! intersected. There is no precedence: each operand is folded into the
//! running result left to right, and only the slot directly in front of it
//! decides how. `OR` there means union, `NOT` means complement, anything
//! else (a term, a stopword, a group) means intersection.

use std::fmt;

use crate::error::{QueryError, QueryResult};
use crate::merge::{complement_sorted, intersect_sorted, union_sorted};
use crate::normalizer::{split_raw, NormalizerConfig, Source};
use crate::{DocId, InvertedIndex};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Lexeme {
    Open,
    Close,
    Or,
    Not,
    Term(String),
    /// Stopword or punctuation. Contributes nothing, but it separates an
    /// operator from the operand after it.
    Blank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Term(String),
    Group(Vec<Clause>),
}

/// One operand and how it combines with everything to its left. The
/// connective of the first clause in a sequence is ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub connective: Connective,
    pub negated: bool,
    pub operand: Operand,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanQuery {
    clauses: Vec<Clause>,
}

impl BooleanQuery {
    /// Parses a raw query. `or` and `not` are recognized case-insensitively
    /// before normalization; every other word goes through the query-side
    /// normalizer (spelling correction, stopwords, stemming).
    pub fn parse(config: &NormalizerConfig, raw: &str) -> QueryResult<Self> {
        let lexemes = lex(config, raw);
        let open = lexemes.iter().filter(|(_, l)| *l == Lexeme::Open).count();
        let close = lexemes.iter().filter(|(_, l)| *l == Lexeme::Close).count();
        let mut parser = Parser { tokens: lexemes.into_iter(), open, close };
        let clauses = parser.sequence(0)?;
        Ok(Self { clauses })
    }

    /// True when the query has no term at all.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Ascending, duplicate-free ids of matching documents. Requires a
    /// finalized index.
    pub fn evaluate(&self, index: &InvertedIndex) -> Vec<DocId> {
        evaluate_clauses(&self.clauses, index)
    }
}

/// Parse and evaluate in one go.
pub fn boolean_query(index: &InvertedIndex, config: &NormalizerConfig, raw: &str) -> QueryResult<Vec<DocId>> {
    let query = BooleanQuery::parse(config, raw)?;
    tracing::debug!(%query, "boolean query");
    Ok(query.evaluate(index))
}

fn lex(config: &NormalizerConfig, raw: &str) -> Vec<(usize, Lexeme)> {
    let mut out = Vec::new();
    for (pos, token) in split_raw(raw).into_iter().enumerate() {
        let mut word = String::new();
        for c in token.chars() {
            match c {
                '(' | ')' => {
                    if !word.is_empty() {
                        out.push((pos, classify(config, &word)));
                        word.clear();
                    }
                    out.push((pos, if c == '(' { Lexeme::Open } else { Lexeme::Close }));
                }
                _ => word.push(c),
            }
        }
        if !word.is_empty() {
            out.push((pos, classify(config, &word)));
        }
    }
    out
}

fn classify(config: &NormalizerConfig, word: &str) -> Lexeme {
    if word.eq_ignore_ascii_case("or") {
        Lexeme::Or
    } else if word.eq_ignore_ascii_case("not") {
        Lexeme::Not
    } else {
        match config.normalize_token(word, Source::Query) {
            Some(term) => Lexeme::Term(term),
            None => Lexeme::Blank,
        }
    }
}

struct Parser {
    tokens: std::vec::IntoIter<(usize, Lexeme)>,
    open: usize,
    close: usize,
}

impl Parser {
    fn sequence(&mut self, depth: usize) -> QueryResult<Vec<Clause>> {
        let mut clauses = Vec::new();
        let mut connective = None;
        let mut negated = false;
        while let Some((pos, lexeme)) = self.tokens.next() {
            let operand = match lexeme {
                Lexeme::Close if depth == 0 => return Err(QueryError::UnexpectedClose { position: pos }),
                Lexeme::Close => return Ok(clauses),
                Lexeme::Open => {
                    let inner = self.sequence(depth + 1)?;
                    if inner.is_empty() {
                        connective = None;
                        negated = false;
                        continue;
                    }
                    Operand::Group(inner)
                }
                Lexeme::Or => {
                    connective = Some(Connective::Or);
                    continue;
                }
                Lexeme::Not => {
                    negated = !negated;
                    continue;
                }
                Lexeme::Blank => {
                    connective = None;
                    negated = false;
                    continue;
                }
                Lexeme::Term(term) => Operand::Term(term),
            };
            clauses.push(Clause {
                connective: connective.take().unwrap_or(Connective::And),
                negated: std::mem::take(&mut negated),
                operand,
            });
        }
        if depth > 0 {
            return Err(QueryError::Unclosed { open: self.open, close: self.close });
        }
        Ok(clauses)
    }
}

fn evaluate_clauses(clauses: &[Clause], index: &InvertedIndex) -> Vec<DocId> {
    let mut acc: Option<Vec<DocId>> = None;
    for clause in clauses {
        let mut ids = match &clause.operand {
            Operand::Term(term) => index.find(term).map(|item| item.posting_list.clone()).unwrap_or_default(),
            Operand::Group(inner) => evaluate_clauses(inner, index),
        };
        if clause.negated {
            ids = complement_sorted(&ids, index.num_docs());
        }
        acc = Some(match acc {
            None => ids,
            Some(prev) => match clause.connective {
                Connective::And => intersect_sorted(&prev, &ids),
                Connective::Or => union_sorted(&prev, &ids),
            },
        });
    }
    acc.unwrap_or_default()
}

impl fmt::Display for BooleanQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_clauses(f, &self.clauses)
    }
}

fn write_clauses(f: &mut fmt::Formatter<'_>, clauses: &[Clause]) -> fmt::Result {
    for (i, clause) in clauses.iter().enumerate() {
        if i > 0 {
            match clause.connective {
                Connective::And => f.write_str(" AND ")?,
                Connective::Or => f.write_str(" OR ")?,
            }
        }
        if clause.negated {
            f.write_str("NOT ")?;
        }
        match &clause.operand {
            Operand::Term(term) => f.write_str(term)?,
            Operand::Group(inner) => {
                f.write_str("(")?;
                write_clauses(f, inner)?;
                f.write_str(")")?;
            }
        }
    }
    Ok(())
}
