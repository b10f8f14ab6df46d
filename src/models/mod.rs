//! Domain models for the game.
//!
//! - [`Word`]: an immutable corpus entry, uppercase letters plus a difficulty.
//! - [`GameStatus`]: where a session is in its lifecycle.
//! - [`GameResult`]: the append-only record written once per finished game.

mod result;
mod status;
mod word;

pub use result::*;
pub use status::*;
pub use word::*;
