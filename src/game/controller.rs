//! Single owner of a running session and its ticker.
//!
//! Guesses, pause/resume and clock ticks all funnel through one
//! `&mut GameController`, which keeps session mutation on one logical thread.
//! The ticker is cancelled the moment the session reaches a terminal status.

use super::session::{GameSession, GuessOutcome};
use crate::clock::Ticker;
use crate::models::GameStatus;

pub struct GameController {
    session: GameSession,
    ticker: Option<Ticker>,
}

impl GameController {
    /// Take ownership of `session` and start its clock.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(session: GameSession) -> Self {
        Self::with_ticker(session, Ticker::start())
    }

    pub fn with_ticker(session: GameSession, ticker: Ticker) -> Self {
        let mut controller = Self {
            session,
            ticker: Some(ticker),
        };
        controller.sync_ticker();
        controller
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn into_session(mut self) -> GameSession {
        self.stop_ticker();
        self.session
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(Ticker::is_running)
    }

    pub fn guess(&mut self, letter: char) -> GuessOutcome {
        let outcome = self.session.guess(letter);
        self.sync_ticker();
        outcome
    }

    pub fn guess_input(&mut self, input: &str) -> GuessOutcome {
        let outcome = self.session.guess_input(input);
        self.sync_ticker();
        outcome
    }

    pub fn pause(&mut self) -> bool {
        let paused = self.session.pause();
        self.sync_ticker();
        paused
    }

    pub fn resume(&mut self) -> bool {
        let resumed = self.session.resume();
        self.sync_ticker();
        resumed
    }

    /// Wait for the next clock tick and apply it to the session.
    ///
    /// Returns the status after the tick, or `None` once the clock has been
    /// stopped (the session is finished).
    pub async fn next_tick(&mut self) -> Option<GameStatus> {
        let ticker = self.ticker.as_mut()?;
        ticker.tick().await?;

        let status = self.session.tick();
        tracing::debug!(
            time_remaining = self.session.time_remaining_secs(),
            "Tick"
        );
        self.sync_ticker();
        Some(status)
    }

    fn sync_ticker(&mut self) {
        match self.session.status() {
            GameStatus::Active => {
                if let Some(ticker) = self.ticker.as_mut() {
                    ticker.resume();
                }
            }
            GameStatus::Paused => {
                if let Some(ticker) = self.ticker.as_mut() {
                    ticker.pause();
                }
            }
            GameStatus::Won | GameStatus::Lost | GameStatus::TimedOut => self.stop_ticker(),
        }
    }

    fn stop_ticker(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }
}
