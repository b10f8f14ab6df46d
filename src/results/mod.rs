//! Result recording: history entries, outcome messages and the plaintext
//! and encrypted result artifacts.

mod crypto;
mod recorder;

pub use crypto::{open, seal, EncryptionKey, KEY_LEN};
pub use recorder::*;
