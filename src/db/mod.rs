// Database layer: read access to the tagged-sentence table.
//
// Two backends sit behind the SentenceSource trait: a local SQLite file
// (rusqlite, "bundled" so there's no system SQLite dependency) and the
// PostgreSQL deployment the NLP pipeline writes to (sqlx, `postgres`
// feature). The matching engine only ever sees SentenceRecord values.

pub mod models;
pub mod schema;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod queries;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use models::SentenceRecord;
pub use traits::{SentenceSource, SentenceVisitor};

#[cfg(feature = "sqlite")]
use anyhow::Context;
use anyhow::Result;
#[cfg(feature = "sqlite")]
use rusqlite::Connection;
#[cfg(feature = "sqlite")]
use std::path::Path;
use std::sync::Arc;

/// Open (or create) a local SQLite corpus and make sure the sentence table exists.
///
/// Called by `init` and `import`.
#[cfg(feature = "sqlite")]
pub fn initialize(db_path: &str, table: &str) -> Result<Connection> {
    // Create parent directories if needed
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for database: {}", db_path))?;
        }
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path))?;

    conn.pragma_update(None, "journal_mode", "WAL")?;

    schema::create_sentence_table(&conn, table)?;

    Ok(conn)
}

/// Open an existing SQLite corpus (fails if it doesn't exist yet).
#[cfg(feature = "sqlite")]
pub fn open(db_path: &str) -> Result<Connection> {
    if !Path::new(db_path).exists() {
        anyhow::bail!(
            "Database not found at {}. Run `cuahsi-search init` and `import` first, \
             or set DATABASE_URL to a PostgreSQL corpus.",
            db_path
        );
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path))?;

    conn.pragma_update(None, "journal_mode", "WAL")?;

    Ok(conn)
}

/// Open an existing SQLite corpus as a SentenceSource.
#[cfg(feature = "sqlite")]
pub fn open_sqlite(db_path: &str) -> Result<Arc<dyn SentenceSource>> {
    let conn = open(db_path)?;
    Ok(Arc::new(sqlite::SqliteSentenceSource::new(conn)))
}

/// Connect to the PostgreSQL corpus as a SentenceSource.
#[cfg(feature = "postgres")]
pub async fn connect_postgres(database_url: &str) -> Result<Arc<dyn SentenceSource>> {
    let source = postgres::PgSentenceSource::connect(database_url).await?;
    Ok(Arc::new(source))
}

/// True if the URL selects the PostgreSQL backend.
pub fn is_postgres_url(url: &str) -> bool {
    url.starts_with("postgres://") || url.starts_with("postgresql://")
}

/// Select the sentence source based on configuration.
///
/// When DATABASE_URL is set and points to PostgreSQL, uses the Postgres backend
/// (requires the `postgres` feature). Otherwise, falls back to SQLite.
pub async fn open_source(
    database_url: Option<&str>,
    db_path: &str,
) -> Result<Arc<dyn SentenceSource>> {
    if let Some(url) = database_url {
        if is_postgres_url(url) {
            #[cfg(feature = "postgres")]
            {
                tracing::info!("Using PostgreSQL backend");
                return connect_postgres(url).await;
            }
            #[cfg(not(feature = "postgres"))]
            anyhow::bail!(
                "DATABASE_URL points to PostgreSQL but the 'postgres' feature is not compiled in.\n\
                 Rebuild with: cargo build --features postgres"
            );
        }
    }

    #[cfg(feature = "sqlite")]
    {
        open_sqlite(db_path)
    }
    #[cfg(not(feature = "sqlite"))]
    {
        let _ = db_path;
        anyhow::bail!(
            "No PostgreSQL DATABASE_URL set and the 'sqlite' feature is not compiled in."
        )
    }
}
