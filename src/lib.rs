//! Single-player word-guessing game.
//!
//! - [`game`]: the session state machine and the controller that drives it
//! - [`clock`]: the one-second ticker feeding the countdown
//! - [`results`]: outcome messages, result history and result artifacts
//! - [`db`]: SQLite storage for the word corpus, history and nickname
//! - [`repository`]: the storage traits the engine is written against

pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod game;
pub mod models;
pub mod repository;
pub mod results;
pub mod rules;

pub use error::{Error, Result};
