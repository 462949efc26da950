// Data models: Rust structs that map to sentence-table rows.
//
// These are the types that flow from the record sources into the matching
// engine. They're separate from the queries so the engine can use them
// without depending on rusqlite or sqlx.

use serde::{Deserialize, Serialize};

/// One tokenized, part-of-speech tagged sentence from the corpus.
///
/// `tags[i]` describes `tokens[i]`. Upstream tagging sometimes breaks this
/// and the two lengths differ; see `tagged_tokens`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceRecord {
    #[serde(alias = "docid")]
    pub document_id: String,
    #[serde(alias = "words")]
    pub tokens: Vec<String>,
    #[serde(alias = "poses")]
    pub tags: Vec<String>,
}

impl SentenceRecord {
    pub fn new<T, G>(document_id: impl Into<String>, tokens: T, tags: G) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        G: IntoIterator,
        G::Item: Into<String>,
    {
        Self {
            document_id: document_id.into(),
            tokens: tokens.into_iter().map(Into::into).collect(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_aligned(&self) -> bool {
        self.tokens.len() == self.tags.len()
    }

    /// (token, tag) pairs, truncated to the shorter of the two sequences.
    pub fn tagged_tokens(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tokens
            .iter()
            .zip(self.tags.iter())
            .map(|(token, tag)| (token.as_str(), tag.as_str()))
    }
}
