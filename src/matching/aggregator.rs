// Running tally of matches: document id -> reference URL + per-term counts.
//
// The report only ever grows: documents are added on their first match,
// counts only increase, and nothing is removed. Both maps keep first-seen
// order so the serialized report follows the order matches were found.

use indexmap::IndexMap;
use serde::Serialize;

/// Article lookup endpoint; the document id is appended verbatim.
pub const BASE_URL: &str = "https://geodeepdive.org/api/articles?id=";

/// One document's reference link and term counts.
///
/// Serializes as a flat object: `url` first, then one field per term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchEntry {
    pub url: String,
    #[serde(flatten)]
    pub terms: IndexMap<String, u64>,
}

impl MatchEntry {
    fn new(document_id: &str) -> Self {
        Self {
            url: format!("{BASE_URL}{document_id}"),
            terms: IndexMap::new(),
        }
    }

    /// Count for a term key, 0 if the term never matched in this document.
    pub fn count(&self, term: &str) -> u64 {
        self.terms.get(term).copied().unwrap_or(0)
    }

    /// Total matches across all terms in this document.
    pub fn total(&self) -> u64 {
        self.terms.values().sum()
    }
}

/// Every document with at least one match, in first-match order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MatchReport {
    documents: IndexMap<String, MatchEntry>,
}

impl MatchReport {
    pub fn get(&self, document_id: &str) -> Option<&MatchEntry> {
        self.documents.get(document_id)
    }

    pub fn contains(&self, document_id: &str) -> bool {
        self.documents.contains_key(document_id)
    }

    /// Number of documents with at least one match.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MatchEntry)> {
        self.documents.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    pub fn document_ids(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    /// Total matches across every document.
    pub fn total_matches(&self) -> u64 {
        self.documents.values().map(MatchEntry::total).sum()
    }

    /// Corpus-wide count per term key, with the number of documents it appears in.
    /// Sorted by count descending; ties keep first-seen order.
    pub fn term_totals(&self) -> Vec<(&str, u64, usize)> {
        let mut totals: IndexMap<&str, (u64, usize)> = IndexMap::new();
        for entry in self.documents.values() {
            for (term, count) in &entry.terms {
                let slot = totals.entry(term.as_str()).or_insert((0, 0));
                slot.0 += count;
                slot.1 += 1;
            }
        }
        let mut totals: Vec<(&str, u64, usize)> = totals
            .into_iter()
            .map(|(term, (count, docs))| (term, count, docs))
            .collect();
        totals.sort_by(|a, b| b.1.cmp(&a.1));
        totals
    }
}

/// Owns the report while a scan is running. The only writer of a MatchReport.
#[derive(Debug, Default)]
pub struct Aggregator {
    report: MatchReport,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `matched_term` in `document_id`.
    ///
    /// The first match for a document creates its entry and URL. Any string
    /// is accepted as a document id, including the empty string.
    pub fn register(&mut self, document_id: &str, matched_term: &str) {
        if !self.report.documents.contains_key(document_id) {
            self.report
                .documents
                .insert(document_id.to_string(), MatchEntry::new(document_id));
        }
        let entry = &mut self.report.documents[document_id];

        match entry.terms.get_mut(matched_term) {
            Some(count) => *count += 1,
            None => {
                entry.terms.insert(matched_term.to_string(), 1);
            }
        }
    }

    /// Current state of the tally.
    pub fn report(&self) -> &MatchReport {
        &self.report
    }

    /// Finish the scan and hand over the report.
    pub fn into_report(self) -> MatchReport {
        self.report
    }
}
