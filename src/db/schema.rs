// Sentence table naming and (for SQLite) creation.
//
// Table names come from configuration and can't be bound as query
// parameters, so every query site validates the name first.

use anyhow::Result;

/// Suffix of the NLP sentence table produced for each application.
pub const SENTENCE_TABLE_SUFFIX: &str = "_sentences_nlp352";

/// The sentence table for an application name.
pub fn sentence_table(app_name: &str) -> String {
    format!("{app_name}{SENTENCE_TABLE_SUFFIX}")
}

/// Check that `name` is a bare SQL identifier (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn validate_table_name(name: &str) -> Result<&str> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        anyhow::bail!(
            "Invalid table name {name:?}: only ASCII letters, digits and underscores are allowed, \
             and it must not start with a digit"
        );
    }
    Ok(name)
}

/// Create the sentence table if it doesn't exist yet.
///
/// `words` and `poses` hold JSON arrays of strings, aligned by position.
#[cfg(feature = "sqlite")]
pub fn create_sentence_table(conn: &rusqlite::Connection, table: &str) -> Result<()> {
    use anyhow::Context;

    let table = validate_table_name(table)?;
    conn.execute_batch(&format!(
        "
        CREATE TABLE IF NOT EXISTS {table} (
            docid TEXT NOT NULL,
            sentid INTEGER NOT NULL,
            words TEXT NOT NULL,   -- JSON array of tokens
            poses TEXT NOT NULL,   -- JSON array of part-of-speech tags
            PRIMARY KEY (docid, sentid)
        );
        "
    ))
    .with_context(|| format!("Failed to create sentence table {table}"))?;
    Ok(())
}

/// Count the number of user-created tables in the database.
#[cfg(feature = "sqlite")]
pub fn table_count(conn: &rusqlite::Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}
