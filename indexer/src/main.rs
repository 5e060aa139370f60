use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use ircore::cranfield::load_collection;
use ircore::{DocId, InvertedIndex, NormalizerConfig};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build and inspect a positional inverted index over a Cranfield collection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index every document of a collection file and save the index
    Build {
        /// Collection in Cranfield format (cran.all)
        input: PathBuf,
        /// Output index file
        output: PathBuf,
        /// Stopword list (whitespace separated); built-in English list when omitted
        #[arg(long)]
        stopwords: Option<PathBuf>,
    },
    /// Show document frequency, IDF and postings of one term
    Inspect {
        /// Index file written by `build`
        index: PathBuf,
        /// Raw word; normalized the same way documents are
        term: String,
        #[arg(long)]
        stopwords: Option<PathBuf>,
        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Serialize)]
struct TermReport {
    term: String,
    doc_freq: usize,
    idf: f64,
    postings: Vec<PostingReport>,
}

#[derive(Serialize)]
struct PostingReport {
    doc_id: DocId,
    term_freq: u32,
    positions: Vec<u32>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, stopwords } => build_index(&input, &output, stopwords),
        Commands::Inspect { index, term, stopwords, json } => inspect(&index, &term, stopwords, json),
    }
}

fn build_index(input: &Path, output: &Path, stopwords: Option<PathBuf>) -> Result<()> {
    let config = NormalizerConfig::load(stopwords.as_deref())?;
    let docs = load_collection(input)?;

    let mut index = InvertedIndex::new();
    index.index_all(&config, &docs);
    index.sort();
    index.save(output)?;

    tracing::info!(output = %output.display(), "index build complete");
    println!("indexed {} documents, {} terms -> {}", index.num_docs(), index.num_terms(), output.display());
    Ok(())
}

fn inspect(index: &Path, raw: &str, stopwords: Option<PathBuf>, json: bool) -> Result<()> {
    let config = NormalizerConfig::load(stopwords.as_deref())?;
    let Some(term) = config.normalize_token(raw, ircore::normalizer::Source::Document) else {
        bail!("'{raw}' normalizes to nothing (stopword or punctuation)");
    };
    let index = InvertedIndex::load(index)?;

    let report = match index.find(&term) {
        Some(item) => TermReport {
            term: item.term.clone(),
            doc_freq: item.doc_freq(),
            idf: index.idf(&term),
            postings: item
                .sorted_postings()
                .map(|p| PostingReport { doc_id: p.doc_id, term_freq: p.term_freq(), positions: p.positions.clone() })
                .collect(),
        },
        None => TermReport { term, doc_freq: 0, idf: 0.0, postings: Vec::new() },
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}  df={}  idf={:.4}", report.term, report.doc_freq, report.idf);
        for p in &report.postings {
            println!("  {:>5}  tf={:<3} {:?}", p.doc_id, p.term_freq, p.positions);
        }
    }
    Ok(())
}
