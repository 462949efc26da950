// Unit tests for the matching engine.
//
// Tests the Aggregator's accumulation rules (counts, URL derivation,
// first-seen ordering) and the Scanner's token policy (case-insensitive
// lookup, original-case keys, truncation of misaligned records, tag and
// key-case options).

use cuahsi_search::db::models::SentenceRecord;
use cuahsi_search::matching::{Aggregator, KeyCase, Scanner, TagPolicy, TermVocabulary, BASE_URL};

fn record(doc: &str, tokens: &[&str], tags: &[&str]) -> SentenceRecord {
    SentenceRecord::new(doc, tokens.iter().copied(), tags.iter().copied())
}

/// Tags every token as a common noun.
fn nouns(doc: &str, tokens: &[&str]) -> SentenceRecord {
    let tags = vec!["NN"; tokens.len()];
    record(doc, tokens, &tags)
}

fn scan(scanner: &Scanner, records: Vec<SentenceRecord>) -> Aggregator {
    let mut agg = Aggregator::new();
    scanner.scan(records, &mut agg);
    agg
}

// ============================================================
// Aggregator: counting
// ============================================================

#[test]
fn register_three_times_counts_three() {
    let mut agg = Aggregator::new();
    agg.register("D", "Term");
    agg.register("D", "Term");
    agg.register("D", "Term");
    assert_eq!(agg.report().get("D").unwrap().terms["Term"], 3);
}

#[test]
fn count_equals_number_of_calls_regardless_of_order() {
    let calls = [
        ("a", "x"),
        ("b", "y"),
        ("a", "y"),
        ("a", "x"),
        ("b", "y"),
        ("a", "x"),
    ];

    let mut forward = Aggregator::new();
    for (doc, term) in calls {
        forward.register(doc, term);
    }
    let mut backward = Aggregator::new();
    for (doc, term) in calls.iter().rev() {
        backward.register(doc, term);
    }

    for report in [forward.report(), backward.report()] {
        assert_eq!(report.get("a").unwrap().count("x"), 3);
        assert_eq!(report.get("a").unwrap().count("y"), 1);
        assert_eq!(report.get("b").unwrap().count("y"), 2);
        assert_eq!(report.get("b").unwrap().count("x"), 0);
        assert_eq!(report.total_matches(), 6);
    }
}

#[test]
fn terms_are_case_sensitive_keys() {
    let mut agg = Aggregator::new();
    agg.register("D", "CUAHSI");
    agg.register("D", "cuahsi");
    let entry = agg.report().get("D").unwrap();
    assert_eq!(entry.terms.len(), 2);
    assert_eq!(entry.count("CUAHSI"), 1);
    assert_eq!(entry.count("cuahsi"), 1);
}

// ============================================================
// Aggregator: URL and membership
// ============================================================

#[test]
fn url_is_base_plus_document_id() {
    let mut agg = Aggregator::new();
    agg.register("5a1b2c3d", "HydroShare");
    assert_eq!(
        agg.report().get("5a1b2c3d").unwrap().url,
        format!("{BASE_URL}5a1b2c3d")
    );
}

#[test]
fn url_unchanged_by_further_matches() {
    let mut agg = Aggregator::new();
    agg.register("doc", "one");
    let before = agg.report().get("doc").unwrap().url.clone();
    for term in ["two", "three", "one"] {
        agg.register("doc", term);
    }
    assert_eq!(agg.report().get("doc").unwrap().url, before);
}

#[test]
fn unmatched_documents_never_appear() {
    let mut agg = Aggregator::new();
    agg.register("hit", "x");
    assert!(agg.report().contains("hit"));
    assert!(!agg.report().contains("miss"));
    assert_eq!(agg.report().len(), 1);
}

#[test]
fn empty_document_id_is_an_ordinary_key() {
    let mut agg = Aggregator::new();
    agg.register("", "x");
    let entry = agg.report().get("").unwrap();
    assert_eq!(entry.url, BASE_URL);
    assert_eq!(entry.count("x"), 1);
}

#[test]
fn documents_keep_first_match_order() {
    let mut agg = Aggregator::new();
    for doc in ["zeta", "alpha", "mid", "alpha", "zeta"] {
        agg.register(doc, "t");
    }
    let ids: Vec<&str> = agg.report().document_ids().collect();
    assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn new_aggregator_is_empty() {
    let agg = Aggregator::new();
    assert!(agg.report().is_empty());
    assert_eq!(agg.into_report().total_matches(), 0);
}

// ============================================================
// Scanner: default policy
// ============================================================

#[test]
fn uppercase_token_matches_lowercase_vocabulary_and_keeps_case() {
    let scanner = Scanner::new(TermVocabulary::new(["cuahsi"]));
    let agg = scan(&scanner, vec![record("10.1/a", &["CUAHSI"], &["NNP"])]);

    let entry = agg.report().get("10.1/a").unwrap();
    assert_eq!(entry.url, "https://geodeepdive.org/api/articles?id=10.1/a");
    assert_eq!(entry.terms.len(), 1);
    assert_eq!(entry.count("CUAHSI"), 1);
}

#[test]
fn two_records_same_document_accumulate() {
    let scanner = Scanner::new(TermVocabulary::new(["hydroshare"]));
    let agg = scan(
        &scanner,
        vec![
            nouns("doc", &["Data", "from", "HydroShare"]),
            nouns("doc", &["HydroShare", "hosts", "models"]),
        ],
    );
    assert_eq!(agg.report().len(), 1);
    assert_eq!(agg.report().get("doc").unwrap().count("HydroShare"), 2);
}

#[test]
fn different_casings_in_one_document_stay_separate() {
    let scanner = Scanner::new(TermVocabulary::new(["cuahsi"]));
    let agg = scan(
        &scanner,
        vec![nouns("doc", &["CUAHSI"]), nouns("doc", &["Cuahsi", "cuahsi"])],
    );
    let entry = agg.report().get("doc").unwrap();
    assert_eq!(entry.count("CUAHSI"), 1);
    assert_eq!(entry.count("Cuahsi"), 1);
    assert_eq!(entry.count("cuahsi"), 1);
}

#[test]
fn tag_is_ignored_by_default() {
    let scanner = Scanner::new(TermVocabulary::new(["water"]));
    let agg = scan(&scanner, vec![record("doc", &["water", "Water"], &["NN", "VB"])]);
    assert_eq!(agg.report().get("doc").unwrap().total(), 2);
}

#[test]
fn non_matching_tokens_produce_no_entry() {
    let scanner = Scanner::new(TermVocabulary::new(["cuahsi"]));
    let agg = scan(&scanner, vec![nouns("doc", &["nothing", "here"])]);
    assert!(agg.report().is_empty());
}

#[test]
fn token_must_match_whole_entry() {
    let scanner = Scanner::new(TermVocabulary::new(["cuahsi"]));
    let agg = scan(&scanner, vec![nouns("doc", &["CUAHSI's", "cuahsi-hosted", "cuahs"])]);
    assert!(agg.report().is_empty());
}

#[test]
fn uppercase_vocabulary_entry_never_matches() {
    let scanner = Scanner::new(TermVocabulary::new(["CUAHSI"]));
    let agg = scan(&scanner, vec![nouns("doc", &["CUAHSI", "cuahsi"])]);
    assert!(agg.report().is_empty());
}

#[test]
fn empty_vocabulary_gives_empty_report() {
    let scanner = Scanner::new(TermVocabulary::default());
    let agg = scan(&scanner, vec![nouns("doc", &["cuahsi", "anything"])]);
    assert!(agg.report().is_empty());
}

#[test]
fn empty_record_is_a_no_op() {
    let scanner = Scanner::new(TermVocabulary::new(["cuahsi"]));
    let mut agg = Aggregator::new();
    let stats = scanner.scan(vec![record("doc", &[], &[])], &mut agg);
    assert_eq!(stats.records, 1);
    assert_eq!(stats.tokens, 0);
    assert_eq!(stats.misaligned, 0);
    assert!(agg.report().is_empty());
}

// ============================================================
// Scanner: misaligned records
// ============================================================

#[test]
fn short_tag_sequence_hides_trailing_tokens() {
    let scanner = Scanner::new(TermVocabulary::new(["cuahsi"]));
    let mut agg = Aggregator::new();
    let stats = scanner.scan(
        vec![record("doc", &["the", "cuahsi", "CUAHSI"], &["DT", "NNP"])],
        &mut agg,
    );
    let entry = agg.report().get("doc").unwrap();
    assert_eq!(entry.count("cuahsi"), 1);
    assert_eq!(entry.count("CUAHSI"), 0);
    assert_eq!(stats.tokens, 2);
    assert_eq!(stats.misaligned, 1);
}

#[test]
fn short_token_sequence_ignores_extra_tags() {
    let scanner = Scanner::new(TermVocabulary::new(["cuahsi"]));
    let mut agg = Aggregator::new();
    let stats = scanner.scan(vec![record("doc", &["cuahsi"], &["NNP", "NN", "NN"])], &mut agg);
    assert_eq!(agg.report().get("doc").unwrap().count("cuahsi"), 1);
    assert_eq!(stats.tokens, 1);
    assert_eq!(stats.misaligned, 1);
}

#[test]
fn misaligned_record_does_not_stop_later_records() {
    let scanner = Scanner::new(TermVocabulary::new(["cuahsi"]));
    let agg = scan(
        &scanner,
        vec![
            record("bad", &["cuahsi", "x"], &[]),
            nouns("good", &["cuahsi"]),
        ],
    );
    assert!(!agg.report().contains("bad"));
    assert_eq!(agg.report().get("good").unwrap().count("cuahsi"), 1);
}

// ============================================================
// Scanner: configurable policies
// ============================================================

#[test]
fn proper_noun_policy_filters_by_tag() {
    let scanner =
        Scanner::new(TermVocabulary::new(["cuahsi"])).with_tag_policy(TagPolicy::ProperNouns);
    let agg = scan(
        &scanner,
        vec![record(
            "doc",
            &["CUAHSI", "cuahsi", "Cuahsi"],
            &["NNP", "NN", "NNPS"],
        )],
    );
    let entry = agg.report().get("doc").unwrap();
    assert_eq!(entry.count("CUAHSI"), 1);
    assert_eq!(entry.count("Cuahsi"), 1);
    assert_eq!(entry.count("cuahsi"), 0);
}

#[test]
fn lower_key_case_merges_casings() {
    let scanner = Scanner::new(TermVocabulary::new(["cuahsi"])).with_key_case(KeyCase::Lower);
    let agg = scan(
        &scanner,
        vec![nouns("doc", &["CUAHSI"]), nouns("doc", &["Cuahsi", "cuahsi"])],
    );
    let entry = agg.report().get("doc").unwrap();
    assert_eq!(entry.terms.len(), 1);
    assert_eq!(entry.count("cuahsi"), 3);
}
