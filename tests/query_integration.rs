//! End-to-end query tests over real chunk files.

mod common;

use common::{write_cat_dog_chunk, write_chunk};
use qix::Error;
use qix::index::ChunkReader;
use qix::service::{QueryHandler, SearchService};

#[test]
fn postings_lookup_returns_capped_ascending_ids() {
    let dir = tempfile::tempdir().unwrap();
    let terms: &[common::TermEntry] = &[
        ("alpha", &[3, 7, 19, 22, 90], 0),
        ("beta", &[1, 2, 4], 4),
        ("gamma", &[50], 260),
    ];
    write_chunk(dir.path(), 0, terms);
    let reader = ChunkReader::open(dir.path(), 0).unwrap();

    for (term, ids, _) in terms {
        for limit in [1usize, 2, 10, 100] {
            let got = reader.postings_for(term, limit).unwrap();
            let expected = limit.min(ids.len());
            assert_eq!(got.len(), expected, "term {term:?} limit {limit}");
            assert_eq!(&got[..], &ids[..expected]);
            assert!(got.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

#[test]
fn and_query_intersects() {
    let dir = tempfile::tempdir().unwrap();
    write_cat_dog_chunk(dir.path(), 0);
    let service = SearchService::open(dir.path(), 0).unwrap();

    assert_eq!(service.query_doc_ids(10, "cat dog"), vec![5, 9]);
}

#[test]
fn or_query_unions_without_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    write_cat_dog_chunk(dir.path(), 0);
    let service = SearchService::open(dir.path(), 0).unwrap();

    assert_eq!(
        service.query_doc_ids(10, "cat || dog"),
        vec![2, 5, 9, 20, 30, 41]
    );
}

#[test]
fn single_term_respects_limit() {
    let dir = tempfile::tempdir().unwrap();
    write_cat_dog_chunk(dir.path(), 0);
    let service = SearchService::open(dir.path(), 0).unwrap();

    assert_eq!(service.query_doc_ids(2, "cat"), vec![5, 9]);
}

#[test]
fn empty_query_returns_sentinel_fill() {
    let dir = tempfile::tempdir().unwrap();
    write_cat_dog_chunk(dir.path(), 0);
    let service = SearchService::open(dir.path(), 0).unwrap();

    assert_eq!(service.query_doc_ids(4, ""), vec![-1, -1, -1, -1]);
    assert_eq!(service.query_doc_ids(3, "   \t "), vec![-1, -1, -1]);
}

#[test]
fn absent_term_empties_and_query() {
    let dir = tempfile::tempdir().unwrap();
    write_cat_dog_chunk(dir.path(), 0);
    let service = SearchService::open(dir.path(), 0).unwrap();

    assert!(service.query_doc_ids(10, "cat unicorn").is_empty());
}

#[test]
fn absent_term_is_skipped_in_or_query() {
    let dir = tempfile::tempdir().unwrap();
    write_cat_dog_chunk(dir.path(), 0);
    let service = SearchService::open(dir.path(), 0).unwrap();

    assert_eq!(service.query_doc_ids(10, "cat || unicorn"), vec![5, 9, 20]);
}

#[test]
fn and_is_permutation_invariant_below_limit() {
    let dir = tempfile::tempdir().unwrap();
    write_cat_dog_chunk(dir.path(), 0);
    let service = SearchService::open(dir.path(), 0).unwrap();

    // Unbounded intersection sizes here are all below the limit, so term
    // order must not matter.
    let abc = service.query_doc_ids(20, "the cat dog");
    let bca = service.query_doc_ids(20, "cat dog the");
    let cab = service.query_doc_ids(20, "dog the cat");
    assert_eq!(abc, vec![5, 9]);
    assert_eq!(abc, bca);
    assert_eq!(abc, cab);
}

#[test]
fn and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    write_cat_dog_chunk(dir.path(), 0);
    let service = SearchService::open(dir.path(), 0).unwrap();

    assert_eq!(
        service.query_doc_ids(10, "dog dog"),
        service.query_doc_ids(10, "dog")
    );
    assert_eq!(
        service.query_doc_ids(10, "cat dog cat dog"),
        service.query_doc_ids(10, "cat dog")
    );
}

#[test]
fn or_result_never_exceeds_limit_or_union() {
    let dir = tempfile::tempdir().unwrap();
    write_cat_dog_chunk(dir.path(), 0);
    let service = SearchService::open(dir.path(), 0).unwrap();

    let capped = service.query_doc_ids(4, "cat || dog");
    assert_eq!(capped, vec![2, 5, 9, 20]);

    let full = service.query_doc_ids(100, "cat || dog");
    assert_eq!(full.len(), 6); // true union size, not the limit

    // Every returned id exists in at least one term's postings.
    let cat = [5, 9, 20];
    let dog = [2, 5, 9, 30, 41];
    for id in &full {
        assert!(cat.contains(id) || dog.contains(id));
    }
}

#[test]
fn long_form_hit_lists_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write_chunk(
        dir.path(),
        3,
        &[("dense", &[10, 11, 12, 13], 400), ("sparse", &[11, 13], 0)],
    );
    let service = SearchService::open(dir.path(), 3).unwrap();

    assert_eq!(service.query_doc_ids(10, "dense sparse"), vec![11, 13]);
}

#[test]
fn missing_chunk_fails_at_open() {
    let dir = tempfile::tempdir().unwrap();
    match SearchService::open(dir.path(), 42) {
        Err(Error::IndexUnavailable { path, .. }) => {
            assert!(path.to_string_lossy().contains("chunk000000000000002a.index"));
        }
        other => panic!("expected IndexUnavailable, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn queries_are_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    write_cat_dog_chunk(dir.path(), 0);
    let service = SearchService::open(dir.path(), 0).unwrap();

    assert_eq!(service.query_doc_ids(10, "Cat DOG"), vec![5, 9]);
}
