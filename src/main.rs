use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hangman::config::AppConfig;
use hangman::db::Database;
use hangman::game::{choose_word, GameController, GameSession, GuessOutcome};
use hangman::models::{GameResult, GameStatus};
use hangman::repository::{HistoryStore, PlayerStore, WordRepository};
use hangman::results::{EncryptionKey, ResultRecorder};
use hangman::rules;

type InputLines = mpsc::UnboundedReceiver<String>;

#[derive(Parser)]
#[command(name = "hangman")]
#[command(about = "Guess the hidden word before you run out of attempts or time")]
struct Cli {
    /// Directory for the database, key and result files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game
    Play {
        /// Player nickname (stored for next time)
        #[arg(short, long)]
        name: Option<String>,

        /// Only pick words up to this difficulty
        #[arg(long)]
        max_difficulty: Option<u8>,

        /// Skip writing the encrypted result file
        #[arg(long)]
        no_encrypt: bool,
    },
    /// List recorded results
    Results {
        #[arg(long, value_enum)]
        sort: Option<SortKey>,

        /// Sort descending
        #[arg(long)]
        desc: bool,
    },
    /// List the word corpus
    Words,
    /// Show or set the stored nickname
    Nickname { name: Option<String> },
    /// Show the game rules
    Rules,
    /// Show the latest result message from the result files
    LastResult,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortKey {
    Name,
    Time,
    Mistakes,
}

/// Initialize tracing on stderr so the board on stdout stays readable
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "hangman=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = AppConfig::load();
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }

    let db = Database::open(config.database_path()?).context("Failed to open database")?;
    db.migrate().context("Failed to run migrations")?;
    db.seed_if_empty().context("Failed to seed word corpus")?;

    match cli.command.unwrap_or(Commands::Play {
        name: None,
        max_difficulty: None,
        no_encrypt: false,
    }) {
        Commands::Play {
            name,
            max_difficulty,
            no_encrypt,
        } => {
            let encrypt = config.encrypt_results && !no_encrypt;
            play(&config, db, name, max_difficulty, encrypt).await?;
        }
        Commands::Results { sort, desc } => {
            let mut results = db.load_results()?;
            sort_results(&mut results, sort, desc);
            if results.is_empty() {
                println!("No results yet.");
            }
            for result in results {
                println!(
                    "{:<20} time left: {:>3}s  mistakes: {}",
                    result.player_name, result.time_spent, result.mistakes_made
                );
            }
        }
        Commands::Words => {
            for stored in db.all_words()? {
                let word = &stored.word;
                println!("{:<12} difficulty {}", word.text(), word.difficulty());
            }
        }
        Commands::Nickname { name: Some(name) } => {
            let name = name.trim();
            anyhow::ensure!(!name.is_empty(), "nickname cannot be empty");
            db.set_nickname(name)?;
            println!("Nickname set to {name}");
        }
        Commands::Nickname { name: None } => match db.nickname()? {
            Some(name) => println!("{name}"),
            None => println!("No nickname set."),
        },
        Commands::Rules => {
            let game_rules = config.rules()?;
            if let Some(text) = rules::load_rules(config.rules_path.as_deref(), &game_rules) {
                println!("{text}");
            }
        }
        Commands::LastResult => {
            let recorder = ResultRecorder::new(db, config.results_dir()?)?;
            match recorder.read_plaintext() {
                Ok(message) => println!("{message}"),
                Err(e) => println!("No result file: {e}"),
            }
            let key_path = config.key_path()?;
            if key_path.exists() {
                let key = EncryptionKey::load_or_create(&key_path)?;
                match recorder.read_encrypted(&key) {
                    Ok(message) => println!("(encrypted copy) {message}"),
                    Err(e) => println!("Encrypted result unreadable: {e}"),
                }
            }
        }
    }

    Ok(())
}

async fn play(
    config: &AppConfig,
    db: Database,
    name: Option<String>,
    max_difficulty: Option<u8>,
    encrypt: bool,
) -> anyhow::Result<()> {
    let mut lines = spawn_input_reader();
    let Some(player) = resolve_nickname(&db, name, &mut lines).await? else {
        return Ok(());
    };

    let results_dir = config.results_dir()?;
    if let Err(e) = std::fs::create_dir_all(&results_dir) {
        tracing::warn!("Could not create {}: {}", results_dir.display(), e);
    }
    let mut recorder = ResultRecorder::new(db.clone(), results_dir)?;

    let key = if encrypt {
        match EncryptionKey::load_or_create(&config.key_path()?) {
            Ok(key) => Some(key),
            Err(e) => {
                tracing::warn!("Result encryption disabled: {}", e);
                None
            }
        }
    } else {
        None
    };

    let words = db.clone();
    let word =
        tokio::task::spawn_blocking(move || choose_word(&words, max_difficulty)).await?;
    let game_rules = config.rules()?;
    let mut game = GameController::start(GameSession::from_pick(word, game_rules));

    println!("Guess the word! Type a letter, or: pause, resume, rules, quit.");
    render(game.session());

    while !game.session().is_finished() {
        tokio::select! {
            Some(status) = game.next_tick() => {
                let left = game.session().time_remaining_secs();
                if status == GameStatus::Active && (left % 30 == 0 || left <= 10) {
                    println!("Time remaining: {left} seconds");
                }
            }
            line = lines.recv() => {
                let Some(line) = line else {
                    return Ok(());
                };
                match line.trim().to_ascii_lowercase().as_str() {
                    "quit" => return Ok(()),
                    "pause" => {
                        if game.pause() {
                            println!("Paused. Type resume to continue.");
                        }
                    }
                    "resume" => {
                        if game.resume() {
                            render(game.session());
                        }
                    }
                    "rules" => {
                        game.pause();
                        if let Some(text) =
                            rules::load_rules(config.rules_path.as_deref(), &game_rules)
                        {
                            println!("{text}");
                        }
                        println!("Paused. Type resume to continue.");
                    }
                    input => match game.guess_input(input) {
                        GuessOutcome::Ignored => {
                            if game.session().status() == GameStatus::Paused {
                                println!("The game is paused.");
                            } else {
                                println!("Enter a single new letter.");
                            }
                        }
                        _ => render(game.session()),
                    },
                }
            }
        }
    }

    let session = game.into_session();
    let report = recorder.finish(&session, &player, key.as_ref())?;
    println!("{}", report.outcome.message);
    if let Ok(path) = &report.plaintext {
        println!("Result saved to {}", path.display());
    }

    Ok(())
}

async fn resolve_nickname(
    db: &Database,
    name: Option<String>,
    lines: &mut InputLines,
) -> anyhow::Result<Option<String>> {
    if let Some(name) = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()) {
        db.set_nickname(&name)?;
        return Ok(Some(name));
    }
    if let Some(name) = db.nickname()? {
        return Ok(Some(name));
    }

    loop {
        println!("Enter your nickname:");
        let Some(line) = lines.recv().await else {
            return Ok(None);
        };
        let name = line.trim();
        if !name.is_empty() {
            db.set_nickname(name)?;
            return Ok(Some(name.to_string()));
        }
    }
}

/// Read stdin lines on a dedicated thread so a pending read never holds up
/// shutdown.
fn spawn_input_reader() -> InputLines {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn render(session: &GameSession) {
    println!();
    println!("Remaining attempts: {}", session.remaining_attempts());
    println!("Time remaining: {} seconds", session.time_remaining_secs());
    println!("{}", session.display_word());
    let guessed: String = session.guessed_letters().iter().collect();
    if !guessed.is_empty() {
        println!("Guessed: {guessed}");
    }
}

fn sort_results(results: &mut [GameResult], key: Option<SortKey>, desc: bool) {
    let Some(key) = key else {
        return;
    };
    results.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Name => a
                .player_name
                .cmp(&b.player_name)
                .then(a.time_spent.cmp(&b.time_spent)),
            SortKey::Time => a.time_spent.cmp(&b.time_spent),
            SortKey::Mistakes => a.mistakes_made.cmp(&b.mistakes_made),
        };
        if desc {
            ordering.reverse()
        } else {
            ordering
        }
    });
}
