// Vocabulary definition
// Ordered mapping from recording identifiers to generated symbol suffixes

use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VocabularyError {
    #[error("Empty identifier at position {0}")]
    EmptyIdentifier(usize),

    #[error("Suffix '{0}' is not a valid C identifier fragment")]
    InvalidSuffix(String),

    #[error("Duplicate identifier '{0}'")]
    DuplicateIdentifier(String),

    #[error("Duplicate suffix '{0}'")]
    DuplicateSuffix(String),
}

/// Recordings shipped with the firmware, in header order
pub const DEFAULT_VOCABULARY: [(&str, &str); 12] = [
    ("0", "zero"),
    ("1", "one"),
    ("2", "two"),
    ("3", "three"),
    ("4", "four"),
    ("5", "five"),
    ("6", "six"),
    ("7", "seven"),
    ("8", "eight"),
    ("9", "nine"),
    ("point", "point"),
    ("minus", "minus"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyEntry {
    /// Input name; the recording is `<identifier>.wav`
    pub identifier: String,

    /// Appended to `audio_` to form the C symbol
    pub suffix: String,
}

/// Entries are emitted in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    entries: Vec<VocabularyEntry>,
}

impl Vocabulary {
    /// Build a vocabulary, rejecting anything that would yield a bad or duplicate symbol
    pub fn new<I, A, B>(pairs: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        let mut entries = Vec::new();
        let mut identifiers = HashSet::new();
        let mut suffixes = HashSet::new();

        for (position, (identifier, suffix)) in pairs.into_iter().enumerate() {
            let identifier = identifier.into();
            let suffix = suffix.into();

            if identifier.is_empty() {
                return Err(VocabularyError::EmptyIdentifier(position));
            }
            if !is_symbol_fragment(&suffix) {
                return Err(VocabularyError::InvalidSuffix(suffix));
            }
            if !identifiers.insert(identifier.clone()) {
                return Err(VocabularyError::DuplicateIdentifier(identifier));
            }
            if !suffixes.insert(suffix.clone()) {
                return Err(VocabularyError::DuplicateSuffix(suffix));
            }

            entries.push(VocabularyEntry { identifier, suffix });
        }

        Ok(Vocabulary { entries })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VocabularyEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, identifier: &str) -> Option<&VocabularyEntry> {
        self.entries.iter().find(|e| e.identifier == identifier)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Vocabulary {
            entries: DEFAULT_VOCABULARY
                .iter()
                .map(|(identifier, suffix)| VocabularyEntry {
                    identifier: identifier.to_string(),
                    suffix: suffix.to_string(),
                })
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Vocabulary {
    type Item = &'a VocabularyEntry;
    type IntoIter = std::slice::Iter<'a, VocabularyEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// [A-Za-z0-9_]+
fn is_symbol_fragment(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
