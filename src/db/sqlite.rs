// SqliteSentenceSource: rusqlite backend implementing the SentenceSource trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Sync.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.
// The lock is never held across .await points.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::traits::{SentenceSource, SentenceVisitor};

pub struct SqliteSentenceSource {
    conn: Mutex<Connection>,
}

impl SqliteSentenceSource {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl SentenceSource for SqliteSentenceSource {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    async fn count_sentences(&self, table: &str) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::count_sentences(&conn, table)
    }

    async fn for_each_sentence(&self, table: &str, visit: &mut SentenceVisitor<'_>) -> Result<u64> {
        let conn = self.conn.lock().await;
        super::queries::for_each_sentence(&conn, table, visit)
    }
}
