//! Error types surfaced by the game library.
//!
//! Storage and I/O failures keep their source so callers can log the full
//! chain. Gameplay never depends on any of these succeeding once an outcome
//! has been decided.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("storage error")]
    Storage(#[from] rusqlite::Error),

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("failed to (de)serialize stored data")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to apply migration {version}: {name}")]
    Migration {
        version: &'static str,
        name: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("resource not found: {}", path.display())]
    ResourceMissing { path: PathBuf },

    #[error("failed to encrypt result message")]
    Encryption,

    #[error("failed to decrypt result message")]
    Decryption,

    #[error("encryption key must be {expected} bytes, got {actual}")]
    InvalidKey { expected: usize, actual: usize },

    #[error("invalid word {text:?}: {reason}")]
    InvalidWord { text: String, reason: &'static str },

    #[error("invalid game rules: {0}")]
    InvalidRules(&'static str),

    #[error("session is still {status}, outcome cannot be recorded yet")]
    SessionNotFinished { status: &'static str },

    #[error("could not determine {0} directory")]
    NoProjectDirs(&'static str),
}
