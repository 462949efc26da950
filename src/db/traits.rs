// Record source trait: backend-agnostic async interface to the sentence table.
//
// Implementors: SqliteSentenceSource (wraps rusqlite), PgSentenceSource
// (wraps sqlx). Rows are pushed to a visitor one at a time so neither
// backend ever holds more than the current record in memory.

use anyhow::Result;
use async_trait::async_trait;

use super::models::SentenceRecord;

/// Callback receiving each sentence in delivery order.
pub type SentenceVisitor<'a> = dyn FnMut(SentenceRecord) + Send + 'a;

#[async_trait]
pub trait SentenceSource: Send + Sync {
    /// Short backend name for logs and status output ("sqlite", "postgres").
    fn backend(&self) -> &'static str;

    /// Number of rows in the sentence table.
    async fn count_sentences(&self, table: &str) -> Result<i64>;

    /// Stream every row of `table` to `visit`, in the order the backend
    /// returns them. Returns the number of records delivered.
    ///
    /// Any connection, query, or row-decoding failure aborts the stream.
    async fn for_each_sentence(&self, table: &str, visit: &mut SentenceVisitor<'_>) -> Result<u64>;
}
