// SQLite queries: sentence streaming and inserts.
//
// Every SQLite interaction with the sentence table goes through this
// module. Token and tag arrays are stored as JSON text.

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::models::SentenceRecord;
use super::schema::validate_table_name;

/// Stream every row of `table` to `visit`, one decoded record at a time.
///
/// Returns the number of records delivered.
pub fn for_each_sentence<F>(conn: &Connection, table: &str, visit: &mut F) -> Result<u64>
where
    F: FnMut(SentenceRecord) + ?Sized,
{
    let table = validate_table_name(table)?;
    let mut stmt = conn
        .prepare(&format!("SELECT docid, words, poses FROM {table}"))
        .with_context(|| format!("Failed to query sentence table {table}"))?;
    let mut rows = stmt.query([])?;

    let mut delivered = 0u64;
    while let Some(row) = rows.next()? {
        let document_id: String = row.get(0)?;
        let words: String = row.get(1)?;
        let poses: String = row.get(2)?;

        let tokens: Vec<String> = serde_json::from_str(&words)
            .with_context(|| format!("Malformed words array for document {document_id}"))?;
        let tags: Vec<String> = serde_json::from_str(&poses)
            .with_context(|| format!("Malformed poses array for document {document_id}"))?;

        visit(SentenceRecord {
            document_id,
            tokens,
            tags,
        });
        delivered += 1;
    }

    Ok(delivered)
}

/// Number of rows in the sentence table.
pub fn count_sentences(conn: &Connection, table: &str) -> Result<i64> {
    let table = validate_table_name(table)?;
    let count: i64 = conn
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .with_context(|| format!("Failed to count rows in {table}"))?;
    Ok(count)
}

/// One past the highest `sentid` stored for `document_id` (1 for a new document).
pub fn next_sentence_id(conn: &Connection, table: &str, document_id: &str) -> Result<i64> {
    let table = validate_table_name(table)?;
    let next: i64 = conn
        .query_row(
            &format!("SELECT COALESCE(MAX(sentid), 0) + 1 FROM {table} WHERE docid = ?1"),
            params![document_id],
            |row| row.get(0),
        )
        .with_context(|| format!("Failed to read sentence ids for document {document_id}"))?;
    Ok(next)
}

/// Insert (or replace) one sentence.
///
/// Returns `true` when a new row was created, `false` when an existing
/// `(docid, sentid)` row was overwritten.
pub fn insert_sentence(
    conn: &Connection,
    table: &str,
    sentence_id: i64,
    record: &SentenceRecord,
) -> Result<bool> {
    let table = validate_table_name(table)?;
    let words = serde_json::to_string(&record.tokens)?;
    let poses = serde_json::to_string(&record.tags)?;
    let existed: bool = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE docid = ?1 AND sentid = ?2)"),
        params![record.document_id, sentence_id],
        |row| row.get(0),
    )?;
    conn.execute(
        &format!(
            "INSERT INTO {table} (docid, sentid, words, poses)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(docid, sentid) DO UPDATE SET words = ?3, poses = ?4"
        ),
        params![record.document_id, sentence_id, words, poses],
    )?;
    Ok(!existed)
}
