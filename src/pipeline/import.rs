// Import: load a JSON-lines dump of tagged sentences into the local SQLite corpus.
//
// Each non-blank line is one sentence:
//   {"docid": "...", "sentid": 3, "words": [...], "poses": [...]}
// `sentid` is optional and defaults to one past the highest id already
// stored for that docid. A line whose explicit `sentid` is already taken
// replaces the stored sentence and is counted as `replaced`. A malformed
// line aborts the import (the transaction is rolled back).

use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Deserialize;
use std::io::BufRead;
use tracing::{info, warn};

use crate::db::models::SentenceRecord;
use crate::db::queries;

#[derive(Deserialize)]
struct SentenceLine {
    sentid: Option<i64>,
    #[serde(flatten)]
    record: SentenceRecord,
}

/// Counts from one import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// Lines that created a new row.
    pub sentences: u64,
    /// Lines that overwrote an existing `(docid, sentid)` row.
    pub replaced: u64,
    pub skipped_blank: u64,
}

/// Read sentences from `reader` and upsert them into `table`.
pub fn import_jsonl<R: BufRead>(conn: &Connection, table: &str, reader: R) -> Result<ImportStats> {
    let tx = conn.unchecked_transaction()?;
    let mut stats = ImportStats::default();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx as i64 + 1;
        let line = line.with_context(|| format!("Failed to read line {line_no}"))?;
        if line.trim().is_empty() {
            stats.skipped_blank += 1;
            continue;
        }

        let parsed: SentenceLine = serde_json::from_str(&line)
            .with_context(|| format!("Malformed sentence on line {line_no}"))?;
        let sentence_id = match parsed.sentid {
            Some(id) => id,
            None => queries::next_sentence_id(&tx, table, &parsed.record.document_id)?,
        };
        let created = queries::insert_sentence(&tx, table, sentence_id, &parsed.record)
            .with_context(|| format!("Failed to insert sentence from line {line_no}"))?;
        if created {
            stats.sentences += 1;
        } else {
            warn!(
                line = line_no,
                docid = %parsed.record.document_id,
                sentid = sentence_id,
                "Sentence id already present, replacing stored sentence"
            );
            stats.replaced += 1;
        }
    }

    tx.commit()?;
    info!(
        sentences = stats.sentences,
        replaced = stats.replaced,
        table,
        "Import committed"
    );
    Ok(stats)
}
