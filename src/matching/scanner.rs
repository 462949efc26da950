// Sentence scanner: tests each tagged token against the vocabulary and
// forwards hits to the aggregator.
//
// Tokens and tags are paired positionally. When a record's two sequences
// differ in length, only the shorter prefix is scanned; the trailing
// tokens (or tags) are never looked at. Upstream tagging occasionally
// produces such records and they must not abort a corpus-wide scan.

use tracing::debug;

use super::aggregator::Aggregator;
use super::vocabulary::{KeyCase, TagPolicy, TermVocabulary};
use crate::db::models::SentenceRecord;

/// Outcome of scanning one record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordScan {
    /// Token/tag pairs tested against the vocabulary.
    pub tested: usize,
    /// Pairs that produced a match.
    pub matched: usize,
    /// False if the token and tag sequences had different lengths.
    pub aligned: bool,
}

/// Running totals over a whole scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub records: u64,
    pub tokens: u64,
    pub matches: u64,
    pub misaligned: u64,
}

impl ScanStats {
    pub fn add(&mut self, scan: RecordScan) {
        self.records += 1;
        self.tokens += scan.tested as u64;
        self.matches += scan.matched as u64;
        if !scan.aligned {
            self.misaligned += 1;
        }
    }
}

pub struct Scanner {
    vocabulary: TermVocabulary,
    tag_policy: TagPolicy,
    key_case: KeyCase,
}

impl Scanner {
    /// Tag-agnostic scanner that reports tokens in their original case.
    pub fn new(vocabulary: TermVocabulary) -> Self {
        Self {
            vocabulary,
            tag_policy: TagPolicy::default(),
            key_case: KeyCase::default(),
        }
    }

    pub fn with_tag_policy(mut self, tag_policy: TagPolicy) -> Self {
        self.tag_policy = tag_policy;
        self
    }

    pub fn with_key_case(mut self, key_case: KeyCase) -> Self {
        self.key_case = key_case;
        self
    }

    pub fn vocabulary(&self) -> &TermVocabulary {
        &self.vocabulary
    }

    pub fn tag_policy(&self) -> TagPolicy {
        self.tag_policy
    }

    pub fn key_case(&self) -> KeyCase {
        self.key_case
    }

    /// Scan one record, registering every hit under the record's document id.
    pub fn scan_record(&self, record: &SentenceRecord, aggregator: &mut Aggregator) -> RecordScan {
        let aligned = record.is_aligned();
        if !aligned {
            debug!(
                document_id = %record.document_id,
                tokens = record.tokens.len(),
                tags = record.tags.len(),
                "Token/tag length mismatch, scanning the shorter prefix"
            );
        }

        let mut scan = RecordScan {
            aligned,
            ..RecordScan::default()
        };

        for (token, tag) in record.tagged_tokens() {
            scan.tested += 1;
            if self.tag_policy.admits(tag) && self.vocabulary.matches(token) {
                aggregator.register(&record.document_id, &self.key_case.key_for(token));
                scan.matched += 1;
            }
        }

        scan
    }

    /// Scan a sequence of records in order, pulling one at a time.
    pub fn scan<I>(&self, records: I, aggregator: &mut Aggregator) -> ScanStats
    where
        I: IntoIterator<Item = SentenceRecord>,
    {
        let mut stats = ScanStats::default();
        for record in records {
            stats.add(self.scan_record(&record, aggregator));
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(doc: &str, tokens: &[&str], tags: &[&str]) -> SentenceRecord {
        SentenceRecord::new(doc, tokens.iter().copied(), tags.iter().copied())
    }

    #[test]
    fn record_scan_counts_tested_and_matched() {
        let scanner = Scanner::new(TermVocabulary::new(["cuahsi"]));
        let mut agg = Aggregator::new();
        let scan = scanner.scan_record(
            &record("d", &["The", "CUAHSI", "portal"], &["DT", "NNP", "NN"]),
            &mut agg,
        );
        assert_eq!(
            scan,
            RecordScan {
                tested: 3,
                matched: 1,
                aligned: true
            }
        );
    }

    #[test]
    fn stats_track_misaligned_records() {
        let scanner = Scanner::new(TermVocabulary::new(["cuahsi"]));
        let mut agg = Aggregator::new();
        let stats = scanner.scan(
            vec![
                record("d", &["cuahsi", "x"], &["NN"]),
                record("d", &["cuahsi"], &["NN"]),
            ],
            &mut agg,
        );
        assert_eq!(stats.records, 2);
        assert_eq!(stats.tokens, 2);
        assert_eq!(stats.matches, 2);
        assert_eq!(stats.misaligned, 1);
    }
}
