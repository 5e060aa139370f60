use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ircore::cranfield::load_queries;
use ircore::vector::ScoredDoc;
use ircore::{DocId, InvertedIndex, NormalizerConfig, QueryProcessor};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use std::io::Read;
use std::path::PathBuf;

#[derive(Clone, Copy, ValueEnum)]
enum Algorithm {
    /// Exact AND / OR / NOT matching
    #[value(alias = "0")]
    Boolean,
    /// Ranked TF-IDF retrieval
    #[value(alias = "1")]
    Vector,
}

/// Run one query against a saved index. The query is read from stdin
/// unless --queries and --qid pick one from a query collection.
#[derive(Parser)]
#[command(name = "query")]
struct Args {
    /// Index file written by `indexer build`
    index: PathBuf,
    /// boolean (0) or vector (1)
    algorithm: Algorithm,
    /// Number of ranked results for vector queries
    #[arg(long, default_value_t = 3)]
    top_k: usize,
    /// Stopword list; must match the one used for indexing
    #[arg(long)]
    stopwords: Option<PathBuf>,
    /// Collection whose words extend the built-in spelling vocabulary
    #[arg(long)]
    corpus: Option<PathBuf>,
    /// Query collection (query.text)
    #[arg(long, requires = "qid")]
    queries: Option<PathBuf>,
    /// Query id inside --queries, e.g. 001
    #[arg(long, requires = "queries")]
    qid: Option<String>,
    /// Print JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Output {
    Boolean { query: String, total: usize, doc_ids: Vec<DocId> },
    Vector { query: String, results: Vec<ScoredDoc> },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let args = Args::parse();

    let config = NormalizerConfig::load_for_queries(args.stopwords.as_deref(), args.corpus.as_deref())?;
    let index = InvertedIndex::load(&args.index)?;
    let raw = read_query(&args)?;
    let processor = QueryProcessor::new(&index, &config);

    let output = match args.algorithm {
        Algorithm::Boolean => {
            let doc_ids = processor.boolean_query(&raw).with_context(|| format!("query {raw:?}"))?;
            Output::Boolean { query: raw, total: doc_ids.len(), doc_ids }
        }
        Algorithm::Vector => {
            let results = processor.vector_query(&raw, args.top_k);
            Output::Vector { query: raw, results }
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }
    match output {
        Output::Boolean { total, doc_ids, .. } => {
            println!("{total} documents");
            let ids: Vec<String> = doc_ids.iter().map(|id| id.to_string()).collect();
            println!("{}", ids.join(" "));
        }
        Output::Vector { results, .. } => {
            for r in results {
                println!("{:>5}  {:.6}", r.doc_id, r.score);
            }
        }
    }
    Ok(())
}

fn read_query(args: &Args) -> Result<String> {
    if let (Some(path), Some(qid)) = (&args.queries, &args.qid) {
        let queries = load_queries(path)?;
        let key = match qid.parse::<u32>() {
            Ok(n) => ircore::cranfield::query_key(n),
            Err(_) => qid.clone(),
        };
        return Ok(match queries.get(&key) {
            Some(text) => text.clone(),
            None => {
                tracing::warn!(qid = %key, path = %path.display(), "query id not found, running an empty query");
                String::new()
            }
        });
    }
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf.trim().to_string())
}
