mod common;

use common::{aero_docs, build, toy_index};
use ircore::boolean::boolean_query;
use ircore::{DocId, Document, InvertedIndex, NormalizerConfig, QueryError, QueryProcessor, SpellCorrector};

fn run(idx: &InvertedIndex, q: &str) -> Vec<DocId> {
    boolean_query(idx, &NormalizerConfig::english(), q).unwrap()
}

#[test]
fn toy_collection_scenario() {
    let idx = toy_index();
    assert_eq!(run(&idx, "alpha and beta"), vec![1]);
    assert_eq!(run(&idx, "alpha or gamma"), vec![1, 2, 3]);
    assert_eq!(run(&idx, "alpha and not gamma"), vec![1]);
}

#[test]
fn implicit_and_between_bare_terms() {
    let idx = build(&aero_docs());
    assert_eq!(run(&idx, "wing flutter"), run(&idx, "wing and flutter"));
    assert_eq!(run(&idx, "wing flutter"), vec![3, 4]);
}

#[test]
fn and_or_commute() {
    let idx = build(&aero_docs());
    // overlapping
    assert_eq!(run(&idx, "wing and flutter"), run(&idx, "flutter and wing"));
    assert_eq!(run(&idx, "wing or flutter"), run(&idx, "flutter or wing"));
    assert_eq!(run(&idx, "wing or flutter"), vec![1, 2, 3, 4, 5]);
    // disjoint
    assert_eq!(run(&idx, "loads and flutter"), Vec::<DocId>::new());
    assert_eq!(run(&idx, "flutter and loads"), Vec::<DocId>::new());
    assert_eq!(run(&idx, "loads or flutter"), vec![1, 3, 4, 5]);
    assert_eq!(run(&idx, "flutter or loads"), vec![1, 3, 4, 5]);
}

#[test]
fn and_or_associate() {
    let idx = build(&aero_docs());
    assert_eq!(run(&idx, "(wing and flutter) and panel"), vec![4]);
    assert_eq!(run(&idx, "wing and (flutter and panel)"), vec![4]);
    assert_eq!(run(&idx, "(loads or drag) or panel"), vec![1, 2, 4, 6]);
    assert_eq!(run(&idx, "loads or (drag or panel)"), vec![1, 2, 4, 6]);
}

#[test]
fn redundant_parentheses_change_nothing() {
    let idx = build(&aero_docs());
    assert_eq!(run(&idx, "wing and drag"), run(&idx, "(wing and drag)"));
    assert_eq!(run(&idx, "wing and drag"), run(&idx, "( wing and drag )"));
    assert_eq!(run(&idx, "((wing)) or ((drag))"), run(&idx, "wing or drag"));
}

#[test]
fn not_is_exact_complement() {
    let idx = build(&aero_docs());
    // panel ⊂ flutter
    assert_eq!(run(&idx, "flutter and not panel"), vec![3, 5]);
    assert_eq!(run(&idx, "wing and not flutter"), vec![1, 2]);
    assert_eq!(run(&idx, "not wing"), vec![5, 6]);
    assert_eq!(run(&idx, "wing or not flutter"), vec![1, 2, 3, 4, 6]);
    assert_eq!(run(&idx, "not (wing or drag)"), vec![5]);
    assert_eq!(run(&idx, "not zebra"), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn evaluation_is_left_to_right() {
    let idx = build(&aero_docs());
    assert_eq!(run(&idx, "wing or drag and flutter"), vec![3, 4]);
    assert_eq!(run(&idx, "wing or (drag and flutter)"), vec![1, 2, 3, 4]);
}

#[test]
fn absent_terms() {
    let idx = build(&aero_docs());
    assert!(run(&idx, "wing and zebra").is_empty());
    assert_eq!(run(&idx, "wing or zebra"), vec![1, 2, 3, 4]);
    assert!(run(&idx, "zebra").is_empty());
}

#[test]
fn empty_queries_match_nothing() {
    let idx = build(&aero_docs());
    assert!(run(&idx, "").is_empty());
    assert!(run(&idx, "the of a").is_empty());
    assert!(run(&idx, "or not").is_empty());
}

#[test]
fn mismatched_parentheses_are_reported() {
    let idx = build(&aero_docs());
    let config = NormalizerConfig::english();
    assert_eq!(
        boolean_query(&idx, &config, "(wing and (flutter or drag)"),
        Err(QueryError::Unclosed { open: 2, close: 1 })
    );
    assert!(matches!(
        boolean_query(&idx, &config, "wing and flutter)"),
        Err(QueryError::UnexpectedClose { position: 2 })
    ));
}

#[test]
fn query_terms_are_spell_corrected() {
    let docs = aero_docs();
    let idx = build(&docs);
    let config = NormalizerConfig::english().with_speller(SpellCorrector::from_documents(&docs));
    let processor = QueryProcessor::new(&idx, &config);
    assert_eq!(processor.boolean_query("fluttr and pannel").unwrap(), vec![4]);
}

#[test]
fn stopword_separates_operator_from_operand() {
    let idx = build(&aero_docs());
    let plain = run(&idx, "wing the flutter");
    assert_eq!(plain, vec![3, 4]);
    assert_eq!(run(&idx, "wing or the flutter"), plain);
    assert_eq!(run(&idx, "wing not the flutter"), plain);
    assert_eq!(run(&idx, "wing or () flutter"), plain);
    // stacked operators still reach the operand
    assert_eq!(run(&idx, "wing or not flutter"), vec![1, 2, 3, 4, 6]);
}

#[test]
fn and_is_a_term_unless_it_is_a_stopword() {
    let docs = vec![
        Document::new(1, "wing and flutter", "", ""),
        Document::new(2, "wing flutter", "", ""),
    ];
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stopwords");
    std::fs::write(&path, "the\nof\na\n").unwrap();
    let config = NormalizerConfig::from_stopword_file(&path).unwrap();
    let mut idx = InvertedIndex::new();
    idx.index_all(&config, &docs);
    idx.sort();

    assert_eq!(boolean_query(&idx, &config, "wing and flutter").unwrap(), vec![1]);
    assert_eq!(boolean_query(&idx, &config, "wing or and").unwrap(), vec![1, 2]);
    assert_eq!(run(&idx, "wing and flutter"), vec![1, 2]);
}
