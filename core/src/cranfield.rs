//! Readers for the Cranfield collection files: documents (`cran.all`),
//! queries (`query.text`) and relevance judgments (`qrels.text`).

use anyhow::{bail, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::{DocId, Document};

lazy_static! {
    static ref ID_LINE: Regex = Regex::new(r"^\.I\s+(\d+)\s*$").expect("valid regex");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Preamble,
    Title,
    Author,
    Bibliography,
    Body,
}

#[derive(Default)]
struct Record {
    id: u32,
    title: String,
    author: String,
    body: String,
}

impl Record {
    fn push(&mut self, field: Field, line: &str) {
        let buf = match field {
            Field::Title => &mut self.title,
            Field::Author => &mut self.author,
            Field::Body => &mut self.body,
            Field::Preamble | Field::Bibliography => return,
        };
        if !buf.is_empty() {
            buf.push('\n');
        }
        buf.push_str(line);
    }

    fn into_document(self) -> Document {
        Document::new(self.id, self.title.trim(), self.author.trim(), self.body.trim())
    }
}

/// Walks `.I`-delimited records, tracking which field each line belongs to.
fn parse_records(text: &str, what: &str) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut current: Option<Record> = None;
    let mut field = Field::Preamble;
    for (lineno, line) in text.lines().enumerate() {
        if let Some(caps) = ID_LINE.captures(line) {
            records.extend(current.take());
            let id = caps[1]
                .parse()
                .with_context(|| format!("{what} line {}: bad id", lineno + 1))?;
            current = Some(Record { id, ..Record::default() });
            field = Field::Preamble;
            continue;
        }
        match line.trim_end() {
            ".T" => field = Field::Title,
            ".A" => field = Field::Author,
            ".B" => field = Field::Bibliography,
            ".W" => field = Field::Body,
            _ => match current.as_mut() {
                Some(record) => record.push(field, line),
                None if line.trim().is_empty() => {}
                None => bail!("{what} line {}: text before the first .I record", lineno + 1),
            },
        }
    }
    records.extend(current);
    Ok(records)
}

pub fn parse_collection(text: &str) -> Result<Vec<Document>> {
    Ok(parse_records(text, "collection")?.into_iter().map(Record::into_document).collect())
}

pub fn load_collection<P: AsRef<Path>>(path: P) -> Result<Vec<Document>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("reading collection {}", path.display()))?;
    let docs = parse_collection(&text)?;
    tracing::info!(path = %path.display(), docs = docs.len(), "loaded collection");
    Ok(docs)
}

/// Zero-padded three digit form used as the query key everywhere.
pub fn query_key(id: u32) -> String {
    format!("{id:03}")
}

/// Query id -> query text.
pub fn parse_queries(text: &str) -> Result<BTreeMap<String, String>> {
    Ok(parse_records(text, "query file")?
        .into_iter()
        .map(|r| (query_key(r.id), r.body.split_whitespace().collect::<Vec<_>>().join(" ")))
        .collect())
}

pub fn load_queries<P: AsRef<Path>>(path: P) -> Result<BTreeMap<String, String>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("reading queries {}", path.display()))?;
    let queries = parse_queries(&text)?;
    tracing::info!(path = %path.display(), queries = queries.len(), "loaded queries");
    Ok(queries)
}

/// Query id -> relevant doc ids in file order. Columns after the doc id
/// are ignored.
pub fn parse_qrels(text: &str) -> Result<BTreeMap<String, Vec<DocId>>> {
    let mut qrels: BTreeMap<String, Vec<DocId>> = BTreeMap::new();
    for (lineno, line) in text.lines().enumerate() {
        let mut fields = line.split_whitespace();
        let (Some(qid), Some(doc)) = (fields.next(), fields.next()) else {
            if line.trim().is_empty() {
                continue;
            }
            bail!("qrels line {}: expected '<query-id> <doc-id>'", lineno + 1);
        };
        let qid: u32 = qid.parse().with_context(|| format!("qrels line {}: bad query id", lineno + 1))?;
        let doc: DocId = doc.parse().with_context(|| format!("qrels line {}: bad doc id", lineno + 1))?;
        let relevant = qrels.entry(query_key(qid)).or_default();
        if !relevant.contains(&doc) {
            relevant.push(doc);
        }
    }
    Ok(qrels)
}

pub fn load_qrels<P: AsRef<Path>>(path: P) -> Result<BTreeMap<String, Vec<DocId>>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("reading qrels {}", path.display()))?;
    parse_qrels(&text)
}
