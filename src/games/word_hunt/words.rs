//! Word-list membership oracle.

use derive_more::{Display, Error};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Membership test over the set of playable words.
///
/// Lookups are case-insensitive; no partial or wildcard matching.
pub trait WordList {
    /// Returns true when `word` is a playable word.
    fn contains(&self, word: &str) -> bool;
}

/// Hash-set backed word list holding lowercase words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordSet {
    words: HashSet<String>,
}

impl WordSet {
    /// Creates an empty word list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True when no words are loaded.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Adds a word, normalized to lowercase. Blank input is skipped.
    pub fn insert(&mut self, word: &str) -> bool {
        let word = word.trim();
        if word.is_empty() {
            return false;
        }
        self.words.insert(word.to_lowercase())
    }

    /// Parses a newline-separated list. Blank lines and `#` comments are
    /// skipped.
    #[instrument(skip(text), fields(bytes = text.len()))]
    pub fn parse(text: &str) -> Self {
        let words: Self = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect();
        debug!(count = words.len(), "Parsed word list");
        words
    }

    /// The word list shipped with the crate.
    pub fn bundled() -> Self {
        Self::parse(include_str!("../../../data/words.txt"))
    }

    /// Loads a newline-separated word list from disk.
    ///
    /// # Errors
    ///
    /// Returns [`WordListError`] if the file cannot be read.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, WordListError> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            WordListError::new(format!(
                "Failed to read word list '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let words = Self::parse(&text);
        info!(count = words.len(), "Word list loaded");
        Ok(words)
    }
}

impl WordList for WordSet {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }
}

impl WordList for HashSet<String> {
    fn contains(&self, word: &str) -> bool {
        HashSet::contains(self, word) || HashSet::contains(self, &word.to_lowercase())
    }
}

impl<'a> FromIterator<&'a str> for WordSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for word in iter {
            set.insert(word);
        }
        set
    }
}

impl FromIterator<String> for WordSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = Self::new();
        for word in iter {
            set.insert(&word);
        }
        set
    }
}

/// Word list loading error.
#[derive(Debug, Clone, Display, Error)]
#[display("Word list error: {} at {}:{}", message, file, line)]
pub struct WordListError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl WordListError {
    /// Creates a new word list error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let words: WordSet = ["Rode", "cat"].into_iter().collect();
        assert!(words.contains("rode"));
        assert!(words.contains("RODE"));
        assert!(words.contains("Cat"));
        assert!(!words.contains("dog"));
    }

    #[test]
    fn test_parse_skips_blank_and_comments() {
        let words = WordSet::parse("# header\nrode\n\n  rude  \n");
        assert_eq!(words.len(), 2);
        assert!(words.contains("rude"));
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = WordSet::from_file("/definitely/not/here/words.txt");
        assert!(result.is_err());
    }

    #[test]
    fn test_bundled_list_has_common_words() {
        let words = WordSet::bundled();
        assert!(words.len() > 1000);
        assert!(words.contains("rode"));
        assert!(!words.contains("zzz"));
    }
}
