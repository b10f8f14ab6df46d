use serde::{Deserialize, Serialize};

/// The state of a game session.
///
/// - `Active`: accepting guesses, clock running
/// - `Paused`: clock stopped, guesses ignored
/// - `Won`: every letter of the word was guessed
/// - `Lost`: the mistake budget was used up
/// - `TimedOut`: the clock reached zero while active
///
/// The last three are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Active,
    Paused,
    Won,
    Lost,
    TimedOut,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Won => "won",
            Self::Lost => "lost",
            Self::TimedOut => "timed_out",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Won | Self::Lost | Self::TimedOut)
    }
}
