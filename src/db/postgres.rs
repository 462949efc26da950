// PgSentenceSource: PostgreSQL backend implementing the SentenceSource trait.
//
// Uses sqlx PgPool with runtime query strings (not compile-time macros) so
// DATABASE_URL isn't needed at build time. `words` and `poses` are text[]
// columns. Rows are pulled from a server-side cursor with `fetch`, so a
// full table is never collected in memory.

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx_core::pool::Pool;
use sqlx_core::row::Row;
use sqlx_postgres::Postgres;

use super::models::SentenceRecord;
use super::schema::validate_table_name;
use super::traits::{SentenceSource, SentenceVisitor};

/// Type alias for the PostgreSQL connection pool.
pub type PgPool = Pool<Postgres>;

pub struct PgSentenceSource {
    pool: PgPool,
}

impl PgSentenceSource {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url)
            .await
            .with_context(|| {
                format!(
                    "Failed to connect to PostgreSQL at {}",
                    crate::config::redact_database_url(database_url)
                )
            })?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool (used by integration tests).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SentenceSource for PgSentenceSource {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn count_sentences(&self, table: &str) -> Result<i64> {
        let table = validate_table_name(table)?;
        let sql = format!("SELECT COUNT(*) FROM {table}");
        let row = sqlx_core::query::query::<Postgres>(&sql)
            .fetch_one(&self.pool)
            .await
            .with_context(|| format!("Failed to count rows in {table}"))?;
        Ok(row.try_get::<i64, _>(0)?)
    }

    async fn for_each_sentence(&self, table: &str, visit: &mut SentenceVisitor<'_>) -> Result<u64> {
        let table = validate_table_name(table)?;
        let sql = format!("SELECT docid, words, poses FROM {table}");
        let mut rows = sqlx_core::query::query::<Postgres>(&sql).fetch(&self.pool);

        let mut delivered = 0u64;
        while let Some(row) = rows
            .try_next()
            .await
            .with_context(|| format!("Failed to read from sentence table {table}"))?
        {
            let document_id: String = row.try_get("docid")?;
            let tokens: Vec<String> = row
                .try_get("words")
                .with_context(|| format!("Malformed words array for document {document_id}"))?;
            let tags: Vec<String> = row
                .try_get("poses")
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
}
