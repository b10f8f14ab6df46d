mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use rand::Rng;
use rusqlite::{Connection, OptionalExtension};

use crate::error::Result;
use crate::models::*;
use crate::repository::{HistoryStore, PlayerStore, WordRepository};

const RESULTS_KEY: &str = "game_results";
const NICKNAME_KEY: &str = "nickname";

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // Word operations
    // ============================================================

    pub fn insert_words(&self, words: &[Word]) -> Result<usize> {
        let mut conn = self.conn.lock().expect("database lock poisoned");
        let tx = conn.transaction()?;
        let inserted = insert_word_rows(&tx, words)?;
        tx.commit()?;
        Ok(inserted)
    }

    pub fn all_words(&self) -> Result<Vec<StoredWord>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt =
            conn.prepare("SELECT id, text, difficulty, created_at FROM words ORDER BY id")?;

        let words = stmt
            .query_map([], |row| {
                Ok(StoredWord {
                    id: row.get(0)?,
                    word: word_from_row(row.get(1)?, row.get(2)?)?,
                    created_at: parse_datetime(row.get::<_, String>(3)?),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(words)
    }

    fn count_up_to(conn: &Connection, max_difficulty: u8) -> Result<usize> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM words WHERE difficulty <= ?",
            [max_difficulty],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    fn random_word(&self, max_difficulty: u8) -> Result<Option<Word>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let count = Self::count_up_to(&conn, max_difficulty)?;
        if count == 0 {
            return Ok(None);
        }

        let offset = rand::thread_rng().gen_range(0..count) as i64;
        let word = conn
            .query_row(
                "SELECT text, difficulty FROM words WHERE difficulty <= ?
                 ORDER BY id LIMIT 1 OFFSET ?",
                (max_difficulty, offset),
                |row| word_from_row(row.get(0)?, row.get(1)?),
            )
            .optional()?;

        Ok(word)
    }

    // ============================================================
    // Settings (key/value) operations
    // ============================================================

    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let value = conn
            .query_row("SELECT value FROM settings WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        conn.execute(
            "INSERT INTO settings (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            (key, value, Utc::now().to_rfc3339()),
        )?;
        Ok(())
    }
}

impl WordRepository for Database {
    fn seed_if_empty(&self) -> Result<usize> {
        let words = DEFAULT_CORPUS
            .iter()
            .map(|(text, difficulty)| Word::new(*text, *difficulty))
            .collect::<Result<Vec<_>>>()?;

        let mut conn = self.conn.lock().expect("database lock poisoned");
        let tx = conn.transaction()?;
        if Self::count_up_to(&tx, u8::MAX)? > 0 {
            return Ok(0);
        }
        let inserted = insert_word_rows(&tx, &words)?;
        tx.commit()?;

        tracing::info!("Seeded word corpus with {} words", inserted);
        Ok(inserted)
    }

    fn pick_random(&self) -> Result<Option<Word>> {
        self.random_word(u8::MAX)
    }

    fn pick_random_up_to(&self, max_difficulty: u8) -> Result<Option<Word>> {
        self.random_word(max_difficulty)
    }

    fn count(&self) -> Result<usize> {
        let conn = self.conn.lock().expect("database lock poisoned");
        Self::count_up_to(&conn, u8::MAX)
    }
}

impl HistoryStore for Database {
    fn load_results(&self) -> Result<Vec<GameResult>> {
        match self.get_setting(RESULTS_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    fn save_results(&self, results: &[GameResult]) -> Result<()> {
        let json = serde_json::to_string(results)?;
        self.set_setting(RESULTS_KEY, &json)
    }
}

impl PlayerStore for Database {
    fn nickname(&self) -> Result<Option<String>> {
        self.get_setting(NICKNAME_KEY)
    }

    fn set_nickname(&self, nickname: &str) -> Result<()> {
        self.set_setting(NICKNAME_KEY, nickname)
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

fn insert_word_rows(conn: &Connection, words: &[Word]) -> Result<usize> {
    let now = Utc::now().to_rfc3339();
    let mut stmt =
        conn.prepare("INSERT INTO words (text, difficulty, created_at) VALUES (?, ?, ?)")?;
    for word in words {
        stmt.execute((word.text(), word.difficulty(), &now))?;
    }
    Ok(words.len())
}

/// Rows go through [`Word::new`] so loaded words are always canonical.
fn word_from_row(text: String, difficulty: u8) -> rusqlite::Result<Word> {
    Word::new(text, difficulty).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn parse_datetime(s: String) -> chrono::DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
