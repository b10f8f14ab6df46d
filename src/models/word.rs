use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Error, Result};

/// Word used when the corpus has nothing to offer, so a game can always start.
pub const FALLBACK_WORD: &str = "DEFAULT";

/// A candidate word from the corpus.
///
/// Words are created when the corpus is seeded and never change afterwards.
/// `text` is always stored uppercase and contains only ASCII letters.
/// Only [`Word::new`] builds one from outside this module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Word {
    text: String,
    difficulty: u8,
}

impl Word {
    /// Canonicalizes `text` to uppercase and validates it.
    pub fn new(text: impl Into<String>, difficulty: u8) -> Result<Self> {
        let text = text.into();

        if text.is_empty() {
            return Err(Error::InvalidWord {
                text,
                reason: "word is empty",
            });
        }
        if !text.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::InvalidWord {
                text,
                reason: "word must contain only ASCII letters",
            });
        }
        if difficulty == 0 {
            return Err(Error::InvalidWord {
                text,
                reason: "difficulty must be at least 1",
            });
        }

        Ok(Self {
            text: text.to_ascii_uppercase(),
            difficulty,
        })
    }

    pub fn fallback() -> Self {
        Self {
            text: FALLBACK_WORD.to_string(),
            difficulty: 1,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Relative difficulty, 1 being the easiest.
    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    pub fn contains(&self, letter: char) -> bool {
        self.text.contains(letter.to_ascii_uppercase())
    }
}

/// A word as stored in the corpus table.
#[derive(Debug, Clone, Serialize)]
pub struct StoredWord {
    pub id: i64,
    pub word: Word,
    pub created_at: DateTime<Utc>,
}

/// Built-in corpus inserted on first use.
///
/// Some words appear twice with different difficulties; they are inserted as
/// listed, which weights them accordingly during random selection.
pub const DEFAULT_CORPUS: &[(&str, u8)] = &[
    ("SWIFT", 1),
    ("OBJECTIVEC", 2),
    ("VARIABLE", 1),
    ("CONSTANT", 1),
    ("XCODE", 2),
    ("LANGUAGE", 4),
    ("PYTHON", 1),
    ("PYCHARM", 2),
    ("JAVA", 1),
    ("INTELIJIDEA", 2),
    ("PROGRAMMING", 3),
    ("STUDYING", 1),
    ("KNOWLEDGE", 4),
    ("KOTLIN", 1),
    ("ANDROID", 1),
    ("IOS", 1),
    ("MACOS", 2),
    ("APPLE", 2),
    ("DATABASE", 3),
    ("ALGORITHM", 3),
    ("DEBUGGING", 3),
    ("FUNCTION", 2),
    ("INTERFACE", 3),
    ("FRAMEWORK", 2),
    ("DEVELOPMENT", 4),
    ("REFACTORING", 4),
    ("COMPILER", 3),
    ("SYNTAX", 2),
    ("OOP", 1),
    ("API", 1),
    ("VERSION", 2),
    ("DEBUGGER", 3),
    ("METHOD", 2),
    ("LAMBDA", 2),
    ("INCREMENT", 3),
    ("MODULE", 2),
    ("INTERFACE", 3),
    ("VARIABLE", 3),
    ("CONSTANT", 3),
    ("GITHUB", 2),
    ("COMPONENT", 3),
    ("DEPENDENCY", 4),
    ("THREAD", 1),
    ("STATEMENT", 3),
    ("COMPILATION", 4),
    ("SCRIPT", 1),
    ("APPLICATION", 4),
    ("MEMORY", 2),
    ("LOGIC", 2),
    ("EXCEPTION", 3),
    ("STACK", 1),
    ("QUEUE", 1),
    ("DICTIONARY", 4),
    ("HASHMAP", 2),
    ("LINKEDLIST", 4),
    ("TREE", 1),
    ("SEARCH", 1),
    ("SORTING", 2),
    ("INSERTION", 3),
    ("BINARY", 2),
    ("ATTRIBUTE", 3),
    ("SERVER", 2),
    ("CLIENT", 2),
];
