use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_MAX_MISTAKES: u32 = 8;
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 300;

/// Budgets a session is played under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRules {
    pub max_mistakes: u32,
    pub time_limit_secs: u32,
}

impl GameRules {
    pub fn new(max_mistakes: u32, time_limit_secs: u32) -> Result<Self> {
        if max_mistakes == 0 {
            return Err(Error::InvalidRules("max_mistakes must be at least 1"));
        }
        if time_limit_secs == 0 {
            return Err(Error::InvalidRules("time_limit_secs must be at least 1"));
        }
        Ok(Self {
            max_mistakes,
            time_limit_secs,
        })
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            max_mistakes: DEFAULT_MAX_MISTAKES,
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
        }
    }
}
