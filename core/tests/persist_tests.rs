mod common;

use common::{aero_docs, build};
use ircore::persist::{load_index, read_index, save_index, write_index};
use ircore::InvertedIndex;
use tempfile::tempdir;

fn assert_equivalent(a: &InvertedIndex, b: &InvertedIndex) {
    assert_eq!(a.num_docs(), b.num_docs());
    assert_eq!(a.num_terms(), b.num_terms());
    for term in a.terms() {
        let (x, y) = (a.find(term).unwrap(), b.find(term).unwrap());
        assert_eq!(x.term, y.term);
        assert_eq!(x.posting_list, y.posting_list);
        assert_eq!(a.idf(term), b.idf(term));
    }
}

#[test]
fn it_round_trips_in_memory() {
    let idx = build(&aero_docs());
    let mut buf = Vec::new();
    write_index(&mut buf, &idx).unwrap();
    let restored = read_index(buf.as_slice()).unwrap();
    assert_equivalent(&idx, &restored);
    assert_eq!(idx, restored);
}

#[test]
fn it_round_trips_on_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("cran.idx");
    let idx = build(&aero_docs());
    save_index(&path, &idx).unwrap();
    let restored = load_index(&path).unwrap();
    assert_equivalent(&idx, &restored);
    assert_eq!(restored.doc_lengths(), idx.doc_lengths());
}

#[test]
fn it_round_trips_empty_index() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.idx");
    InvertedIndex::new().save(&path).unwrap();
    assert_eq!(InvertedIndex::load(&path).unwrap(), InvertedIndex::new());
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    assert!(load_index(dir.path().join("nope.idx")).is_err());
}

#[test]
fn corrupt_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.idx");
    std::fs::write(&path, b"\xff\xff\xff\xff\xff\xff\xff\xffgarbage").unwrap();
    assert!(load_index(&path).is_err());
}
