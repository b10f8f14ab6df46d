//! Storage contracts the game engine depends on.
//!
//! The engine never talks to SQLite directly: it receives these traits so
//! that a session can be driven against any store (or a test double).
//! [`crate::db::Database`] implements all three.

use crate::error::Result;
use crate::models::{GameResult, Word};

/// Corpus of candidate words.
///
/// Seeded once, read thereafter; implementations must be safe to read from
/// several threads at the same time.
pub trait WordRepository: Send + Sync {
    /// Insert the built-in corpus if the store holds no words.
    ///
    /// Returns the number of words inserted (zero when already seeded).
    fn seed_if_empty(&self) -> Result<usize>;

    /// Uniformly random word, or `None` when the corpus is empty.
    ///
    /// Draws are independent; the same word may come back twice in a row.
    fn pick_random(&self) -> Result<Option<Word>>;

    /// Like [`pick_random`](Self::pick_random), restricted to words whose
    /// difficulty is at most `max_difficulty`.
    fn pick_random_up_to(&self, max_difficulty: u8) -> Result<Option<Word>>;

    fn count(&self) -> Result<usize>;
}

/// Ordered history of finished games, persisted as one serialized collection.
pub trait HistoryStore {
    fn load_results(&self) -> Result<Vec<GameResult>>;

    /// Replace the stored history with `results`.
    fn save_results(&self, results: &[GameResult]) -> Result<()>;
}

/// The player's nickname, captured once and read at the start of each game.
pub trait PlayerStore {
    fn nickname(&self) -> Result<Option<String>>;

    fn set_nickname(&self, nickname: &str) -> Result<()>;
}
