//! Game engine: session state machine, rules and the controller that drives
//! a session from the clock.

mod controller;
mod rules;
mod session;

pub use controller::*;
pub use rules::*;
pub use session::*;

use crate::models::Word;
use crate::repository::WordRepository;

/// Pick a word for a new session.
///
/// Storage errors are logged and treated like an empty corpus, so the caller
/// always gets something to play (see [`GameSession::from_pick`]).
pub fn choose_word(words: &dyn WordRepository, max_difficulty: Option<u8>) -> Option<Word> {
    let picked = match max_difficulty {
        Some(max) => words.pick_random_up_to(max),
        None => words.pick_random(),
    };

    match picked {
        Ok(word) => {
            if let Some(word) = &word {
                tracing::debug!(difficulty = word.difficulty(), "Picked word");
            }
            word
        }
        Err(e) => {
            tracing::warn!("Error fetching random word: {}", e);
            None
        }
    }
}
