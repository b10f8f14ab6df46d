use hangman::db::Database;
use hangman::game::{GameSession, GuessOutcome};
use hangman::models::*;
use hangman::repository::{HistoryStore, PlayerStore, WordRepository};
use speculate2::speculate;

fn words(list: &[(&str, u8)]) -> Vec<Word> {
    list.iter()
        .map(|(text, difficulty)| Word::new(*text, *difficulty).expect("Invalid word"))
        .collect()
}

speculate! {
    before {
        let db = Database::open_memory().expect("Failed to create in-memory database");
        db.migrate().expect("Failed to run migrations");
    }

    describe "word corpus" {
        describe "seed_if_empty" {
            it "inserts the built-in corpus into an empty store" {
                let inserted = db.seed_if_empty().expect("Seed failed");

                assert_eq!(inserted, DEFAULT_CORPUS.len());
                assert_eq!(db.count().expect("Count failed"), DEFAULT_CORPUS.len());
            }

            it "is a no-op once the corpus has words" {
                db.seed_if_empty().expect("Seed failed");
                let second = db.seed_if_empty().expect("Seed failed");

                assert_eq!(second, 0);
                assert_eq!(db.count().expect("Count failed"), DEFAULT_CORPUS.len());
            }

            it "leaves a custom corpus alone" {
                db.insert_words(&words(&[("RUST", 1)])).expect("Insert failed");
                let inserted = db.seed_if_empty().expect("Seed failed");

                assert_eq!(inserted, 0);
                assert_eq!(db.count().expect("Count failed"), 1);
            }
        }

        describe "pick_random" {
            it "returns None on an empty corpus" {
                let picked = db.pick_random().expect("Pick failed");
                assert!(picked.is_none());
            }

            it "returns the only word of a single-word corpus" {
                db.insert_words(&words(&[("RUST", 2)])).expect("Insert failed");

                let picked = db.pick_random().expect("Pick failed").expect("No word");
                assert_eq!(picked.text(), "RUST");
                assert_eq!(picked.difficulty(), 2);
            }

            it "eventually returns every word" {
                db.insert_words(&words(&[("ONE", 1), ("TWO", 1), ("SIX", 1)])).expect("Insert failed");

                let mut seen = std::collections::BTreeSet::new();
                for _ in 0..500 {
                    seen.insert(db.pick_random().expect("Pick failed").expect("No word").text().to_string());
                }
                assert_eq!(seen.len(), 3);
            }

            it "returns lowercase input as a winnable uppercase word" {
                db.insert_words(&words(&[("java", 1)])).expect("Insert failed");

                let picked = db.pick_random().expect("Pick failed").expect("No word");
                assert_eq!(picked.text(), "JAVA");

                let mut game = GameSession::new(picked);
                assert_eq!(game.guess('j'), GuessOutcome::Hit);
                assert_eq!(game.guess('a'), GuessOutcome::Hit);
                assert_eq!(game.guess('v'), GuessOutcome::Won);
                assert_eq!(game.display_word(), "JAVA");
            }
        }

        describe "pick_random_up_to" {
            it "only returns words within the difficulty bound" {
                db.seed_if_empty().expect("Seed failed");

                for _ in 0..100 {
                    let word = db.pick_random_up_to(1).expect("Pick failed").expect("No word");
                    assert_eq!(word.difficulty(), 1);
                }
            }

            it "returns None when no word is easy enough" {
                db.insert_words(&words(&[("KNOWLEDGE", 4)])).expect("Insert failed");
                assert!(db.pick_random_up_to(3).expect("Pick failed").is_none());
            }
        }

        describe "all_words" {
            it "lists words in insertion order" {
                db.insert_words(&words(&[("ZEBRA", 1), ("apple", 2)])).expect("Insert failed");

                let all = db.all_words().expect("Query failed");
                assert_eq!(all.len(), 2);
                assert_eq!(all[0].word.text(), "ZEBRA");
                assert_eq!(all[1].word.text(), "APPLE");
            }
        }
    }

    describe "result history" {
        it "is empty before any game" {
            let results = db.load_results().expect("Load failed");
            assert!(results.is_empty());
        }

        it "round-trips the full ordered history" {
            let results = vec![
                GameResult::new("Ann", 250, 2),
                GameResult::new("Bob", 0, 5),
            ];
            db.save_results(&results).expect("Save failed");

            let loaded = db.load_results().expect("Load failed");
            assert_eq!(loaded, results);
        }

        it "replaces the stored collection on save" {
            db.save_results(&[GameResult::new("Ann", 250, 2)]).expect("Save failed");
            db.save_results(&[]).expect("Save failed");

            assert!(db.load_results().expect("Load failed").is_empty());
        }
    }

    describe "nickname" {
        it "is unset initially" {
            assert!(db.nickname().expect("Query failed").is_none());
        }

        it "keeps the latest value" {
            db.set_nickname("Ann").expect("Save failed");
            db.set_nickname("Polly").expect("Save failed");

            assert_eq!(db.nickname().expect("Query failed").as_deref(), Some("Polly"));
        }
    }
}
