// Matching engine: vocabulary membership, per-document tally, sentence scanning.
//
// Data flows one way: SentenceRecord -> Scanner -> Aggregator -> MatchReport.
// Nothing in here touches the database or the filesystem.

pub mod aggregator;
pub mod scanner;
pub mod vocabulary;

pub use aggregator::{Aggregator, MatchEntry, MatchReport, BASE_URL};
pub use scanner::{RecordScan, ScanStats, Scanner};
pub use vocabulary::{KeyCase, TagPolicy, TermVocabulary};
