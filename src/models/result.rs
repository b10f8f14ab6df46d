use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The recorded outcome of one finished game.
///
/// Results are appended to the history and never modified afterwards.
/// `time_spent` holds the seconds that were *remaining* on the clock when the
/// game ended, matching what the results screen has always shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub id: Uuid,
    pub player_name: String,
    pub time_spent: u32,
    pub mistakes_made: u32,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl GameResult {
    pub fn new(player_name: impl Into<String>, time_spent: u32, mistakes_made: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            player_name: player_name.into(),
            time_spent,
            mistakes_made,
            created_at: Utc::now(),
        }
    }
}
