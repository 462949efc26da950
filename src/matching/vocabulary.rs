// Term vocabulary and the two matching policies layered on top of it.
//
// Membership is tested against the lower-cased token only. Vocabulary
// entries are stored exactly as configured, so an entry with upper-case
// letters can never match anything; config loading warns about those.

use serde::Deserialize;
use std::borrow::Cow;
use std::collections::HashSet;

/// The configured set of terms of interest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermVocabulary {
    terms: HashSet<String>,
}

impl TermVocabulary {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }

    /// True if the token, lower-cased, is a vocabulary entry.
    pub fn matches(&self, token: &str) -> bool {
        if self.terms.is_empty() {
            return false;
        }
        self.terms.contains(token.to_lowercase().as_str())
    }

    /// Exact (case-sensitive) membership of a vocabulary entry.
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Entries sorted alphabetically, for display.
    pub fn sorted_terms(&self) -> Vec<&str> {
        let mut terms: Vec<&str> = self.terms.iter().map(String::as_str).collect();
        terms.sort_unstable();
        terms
    }

    /// Entries that differ from their lower-cased form and so can never match.
    pub fn unmatchable_terms(&self) -> Vec<&str> {
        let mut terms: Vec<&str> = self
            .terms
            .iter()
            .filter(|t| t.to_lowercase() != **t)
            .map(String::as_str)
            .collect();
        terms.sort_unstable();
        terms
    }
}

/// Which part-of-speech tags are allowed to produce a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagPolicy {
    /// Ignore the tag entirely (default).
    #[default]
    Any,
    /// Only singular/plural proper nouns (NNP, NNPS).
    ProperNouns,
}

impl TagPolicy {
    pub fn admits(self, tag: &str) -> bool {
        match self {
            TagPolicy::Any => true,
            TagPolicy::ProperNouns => matches!(tag, "NNP" | "NNPS"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TagPolicy::Any => "any",
            TagPolicy::ProperNouns => "proper_nouns",
        }
    }
}

/// How a matched token becomes a report key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCase {
    /// The token exactly as it appeared in the text (default).
    /// "CUAHSI" and "cuahsi" are counted under separate keys.
    #[default]
    Original,
    /// The lower-cased token, merging every casing into one key.
    Lower,
}

impl KeyCase {
    pub fn key_for(self, token: &str) -> Cow<'_, str> {
        match self {
            KeyCase::Original => Cow::Borrowed(token),
            KeyCase::Lower => Cow::Owned(token.to_lowercase()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            KeyCase::Original => "original",
            KeyCase::Lower => "lower",
        }
    }
}
