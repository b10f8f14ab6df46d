use std::path::{Path, PathBuf};

use super::crypto::{self, EncryptionKey};
use crate::error::{Error, Result};
use crate::game::GameSession;
use crate::models::GameResult;
use crate::repository::HistoryStore;

pub const PLAINTEXT_ARTIFACT: &str = "Results_decrypted.txt";
pub const ENCRYPTED_ARTIFACT: &str = "Results_encrypted.txt";

/// A finished game as recorded: the history entry plus the message shown to
/// the player.
#[derive(Debug, Clone)]
pub struct RecordedOutcome {
    pub result: GameResult,
    pub message: String,
}

/// Which artifact writes succeeded for one finished game.
#[derive(Debug)]
pub struct FinishReport {
    pub outcome: RecordedOutcome,
    /// `None` when no key was supplied.
    pub encrypted: Option<Result<PathBuf>>,
    pub plaintext: Result<PathBuf>,
}

/// Turns terminal sessions into history entries and result artifacts.
///
/// The history is loaded once at construction and kept in memory; every
/// recorded outcome is appended and the whole collection is written back to
/// the store. A store failure is logged, never undone.
pub struct ResultRecorder<H: HistoryStore> {
    store: H,
    history: Vec<GameResult>,
    artifacts_dir: PathBuf,
}

impl<H: HistoryStore> ResultRecorder<H> {
    pub fn new(store: H, artifacts_dir: impl Into<PathBuf>) -> Result<Self> {
        let history = store.load_results()?;
        Ok(Self {
            store,
            history,
            artifacts_dir: artifacts_dir.into(),
        })
    }

    pub fn history(&self) -> &[GameResult] {
        &self.history
    }

    pub fn artifact_path(&self, encrypted: bool) -> PathBuf {
        let name = if encrypted {
            ENCRYPTED_ARTIFACT
        } else {
            PLAINTEXT_ARTIFACT
        };
        self.artifacts_dir.join(name)
    }

    pub fn record_outcome(
        &mut self,
        session: &GameSession,
        player_name: &str,
    ) -> Result<RecordedOutcome> {
        let message = session
            .outcome_message()
            .ok_or(Error::SessionNotFinished {
                status: session.status().as_str(),
            })?;

        let result = GameResult::new(
            player_name,
            session.time_remaining_secs(),
            session.mistakes(),
        );
        self.history.push(result.clone());

        if let Err(e) = self.store.save_results(&self.history) {
            tracing::warn!("Failed to save result history: {}", e);
        }

        tracing::info!(
            player = player_name,
            status = session.status().as_str(),
            "Recorded game result"
        );
        Ok(RecordedOutcome { result, message })
    }

    /// Write `message` to its artifact, sealed when a key is given.
    ///
    /// Overwrites whatever the artifact held before.
    pub fn persist_message(&self, message: &str, key: Option<&EncryptionKey>) -> Result<PathBuf> {
        let path = self.artifact_path(key.is_some());
        let data = match key {
            Some(key) => crypto::seal(message.as_bytes(), key)?,
            None => message.as_bytes().to_vec(),
        };

        write_artifact(&self.artifacts_dir, &path, &data)?;
        tracing::info!("Result saved to {}", path.display());
        Ok(path)
    }

    /// Record a finished session and write both artifacts.
    ///
    /// Each write is attempted regardless of how the other went.
    pub fn finish(
        &mut self,
        session: &GameSession,
        player_name: &str,
        key: Option<&EncryptionKey>,
    ) -> Result<FinishReport> {
        let outcome = self.record_outcome(session, player_name)?;

        let encrypted = key.map(|key| self.persist_message(&outcome.message, Some(key)));
        if let Some(Err(e)) = &encrypted {
            tracing::warn!("Error writing encrypted result: {}", e);
        }

        let plaintext = self.persist_message(&outcome.message, None);
        if let Err(e) = &plaintext {
            tracing::warn!("Error writing result: {}", e);
        }

        Ok(FinishReport {
            outcome,
            encrypted,
            plaintext,
        })
    }

    /// Read back the sealed artifact.
    pub fn read_encrypted(&self, key: &EncryptionKey) -> Result<String> {
        let path = self.artifact_path(true);
        let sealed = read_artifact(&path)?;
        let plaintext = crypto::open(&sealed, key)?;
        String::from_utf8(plaintext).map_err(|_| Error::Decryption)
    }

    pub fn read_plaintext(&self) -> Result<String> {
        let bytes = read_artifact(&self.artifact_path(false))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn write_artifact(dir: &Path, path: &Path, data: &[u8]) -> Result<()> {
    if !dir.is_dir() {
        return Err(Error::ResourceMissing {
            path: dir.to_path_buf(),
        });
    }
    std::fs::write(path, data)?;
    Ok(())
}

fn read_artifact(path: &Path) -> Result<Vec<u8>> {
    if !path.is_file() {
        return Err(Error::ResourceMissing {
            path: path.to_path_buf(),
        });
    }
    Ok(std::fs::read(path)?)
}
