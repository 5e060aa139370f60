//! Compares boolean and vector retrieval on a random sample of Cranfield
//! queries: nDCG@k per query against the relevance judgments, the mean of
//! each method, and a Wilcoxon signed-rank test on the paired scores.

mod metrics;

use anyhow::Result;
use clap::Parser;
use ircore::cranfield::{load_qrels, load_queries};
use ircore::{DocId, InvertedIndex, NormalizerConfig, QueryProcessor};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use std::path::PathBuf;

use metrics::{mean, ndcg_at_k, wilcoxon_signed_rank, Wilcoxon};

#[derive(Parser)]
#[command(name = "batch_eval")]
#[command(about = "Sampled nDCG comparison of boolean vs vector retrieval", long_about = None)]
struct Args {
    /// Index file written by `indexer build`
    index: PathBuf,
    /// Query collection (query.text)
    queries: PathBuf,
    /// Relevance judgments (qrels.text)
    qrels: PathBuf,
    /// Number of queries to sample, at least 2
    #[arg(value_parser = clap::value_parser!(u32).range(2..))]
    sample_size: u32,
    /// Rank cutoff for nDCG and for the vector result list
    #[arg(long, default_value_t = 10)]
    top_k: usize,
    /// Seed for query sampling; random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Stopword list; must match the one used for indexing
    #[arg(long)]
    stopwords: Option<PathBuf>,
    /// Collection whose words extend the built-in spelling vocabulary
    #[arg(long)]
    corpus: Option<PathBuf>,
    /// Print JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Serialize)]
struct QueryScore {
    qid: String,
    boolean_hits: usize,
    boolean_ndcg: f64,
    vector_ndcg: f64,
}

#[derive(Serialize)]
struct Report {
    sampled: usize,
    evaluated: usize,
    top_k: usize,
    mean_boolean_ndcg: f64,
    mean_vector_ndcg: f64,
    wilcoxon: Wilcoxon,
    queries: Vec<QueryScore>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let args = Args::parse();

    let config = NormalizerConfig::load_for_queries(args.stopwords.as_deref(), args.corpus.as_deref())?;
    let index = InvertedIndex::load(&args.index)?;
    let queries = load_queries(&args.queries)?;
    let qrels = load_qrels(&args.qrels)?;

    let candidates: Vec<&String> = queries.keys().filter(|qid| qrels.contains_key(*qid)).collect();
    if candidates.len() < queries.len() {
        tracing::warn!(skipped = queries.len() - candidates.len(), "queries without relevance judgments are not sampled");
    }
    let wanted = args.sample_size as usize;
    if wanted > candidates.len() {
        tracing::warn!(wanted, available = candidates.len(), "sample size exceeds judged queries, using all");
    }
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut sample: Vec<&String> = candidates.choose_multiple(&mut rng, wanted).copied().collect();
    sample.sort();

    let processor = QueryProcessor::new(&index, &config);
    let mut scores = Vec::with_capacity(sample.len());
    for qid in &sample {
        let text = &queries[*qid];
        let relevant = &qrels[*qid];
        let boolean = match processor.boolean_query(text) {
            Ok(ids) => ids,
            Err(err) => {
                tracing::warn!(qid = %qid, %err, "skipping malformed query");
                continue;
            }
        };
        let vector: Vec<DocId> = processor.vector_query(text, args.top_k).into_iter().map(|r| r.doc_id).collect();
        let score = QueryScore {
            qid: (*qid).clone(),
            boolean_hits: boolean.len(),
            boolean_ndcg: ndcg_at_k(&boolean, relevant, args.top_k),
            vector_ndcg: ndcg_at_k(&vector, relevant, args.top_k),
        };
        tracing::debug!(qid = %score.qid, boolean = score.boolean_ndcg, vector = score.vector_ndcg, "evaluated");
        scores.push(score);
    }

    let boolean_ndcg: Vec<f64> = scores.iter().map(|s| s.boolean_ndcg).collect();
    let vector_ndcg: Vec<f64> = scores.iter().map(|s| s.vector_ndcg).collect();
    let report = Report {
        sampled: sample.len(),
        evaluated: scores.len(),
        top_k: args.top_k,
        mean_boolean_ndcg: mean(&boolean_ndcg),
        mean_vector_ndcg: mean(&vector_ndcg),
        wilcoxon: wilcoxon_signed_rank(&vector_ndcg, &boolean_ndcg),
        queries: scores,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    println!("qid   bool_hits  bool_ndcg  vec_ndcg");
    for s in &report.queries {
        println!("{:<5} {:>9}  {:>9.4}  {:>8.4}", s.qid, s.boolean_hits, s.boolean_ndcg, s.vector_ndcg);
    }
    println!();
    println!("evaluated {} of {} sampled queries (nDCG@{})", report.evaluated, report.sampled, report.top_k);
    println!("mean nDCG  boolean={:.4}  vector={:.4}", report.mean_boolean_ndcg, report.mean_vector_ndcg);
    println!(
        "wilcoxon   n={}  W+={:.1}  W-={:.1}  z={:.3}  p={:.4}",
        report.wilcoxon.n, report.wilcoxon.w_plus, report.wilcoxon.w_minus, report.wilcoxon.z, report.wilcoxon.p_value
    );
    Ok(())
}
