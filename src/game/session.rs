//! The game session state machine.
//!
//! A session is created `Active` with a chosen word and is driven by two
//! inputs only: [`GameSession::guess`] and [`GameSession::tick`]. All time
//! accounting lives here; whatever produces the ticks is a plain pulse
//! source. Once the status is terminal the session is frozen and every
//! further input is ignored.

use std::collections::BTreeSet;

use super::rules::GameRules;
use crate::models::{GameStatus, Word};

/// What a call to [`GameSession::guess`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Input was not a letter, was already guessed, or the session is not active.
    Ignored,
    /// The letter is in the word.
    Hit,
    /// The letter is not in the word; one attempt was used.
    Miss,
    /// This guess revealed the last hidden letter.
    Won,
    /// This guess used the last attempt.
    Lost,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    word: Word,
    guessed_letters: BTreeSet<char>,
    mistakes: u32,
    max_mistakes: u32,
    time_remaining_secs: u32,
    status: GameStatus,
}

impl GameSession {
    pub fn new(word: Word) -> Self {
        Self::with_rules(word, GameRules::default())
    }

    pub fn with_rules(word: Word, rules: GameRules) -> Self {
        Self {
            word,
            guessed_letters: BTreeSet::new(),
            mistakes: 0,
            max_mistakes: rules.max_mistakes,
            time_remaining_secs: rules.time_limit_secs,
            status: GameStatus::Active,
        }
    }

    /// Start a session on a picked word, or on the fallback word when the
    /// corpus had nothing to offer.
    pub fn from_pick(word: Option<Word>, rules: GameRules) -> Self {
        let word = word.unwrap_or_else(|| {
            tracing::info!("No words found, using fallback word");
            Word::fallback()
        });
        Self::with_rules(word, rules)
    }

    pub fn word(&self) -> &Word {
        &self.word
    }

    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.guessed_letters
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn max_mistakes(&self) -> u32 {
        self.max_mistakes
    }

    pub fn time_remaining_secs(&self) -> u32 {
        self.time_remaining_secs
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn remaining_attempts(&self) -> u32 {
        self.max_mistakes - self.mistakes
    }

    /// Apply a single-letter guess. Case-insensitive.
    pub fn guess(&mut self, letter: char) -> GuessOutcome {
        if self.status != GameStatus::Active || !letter.is_ascii_alphabetic() {
            return GuessOutcome::Ignored;
        }

        let letter = letter.to_ascii_uppercase();
        if !self.guessed_letters.insert(letter) {
            return GuessOutcome::Ignored;
        }

        if self.word.contains(letter) {
            if self.is_fully_revealed() {
                self.transition(GameStatus::Won);
                return GuessOutcome::Won;
            }
            tracing::debug!(letter = %letter, "Correct guess");
            GuessOutcome::Hit
        } else {
            self.mistakes += 1;
            if self.mistakes == self.max_mistakes {
                self.transition(GameStatus::Lost);
                return GuessOutcome::Lost;
            }
            tracing::debug!(letter = %letter, mistakes = self.mistakes, "Wrong guess");
            GuessOutcome::Miss
        }
    }

    /// Apply raw user input. Anything other than exactly one ASCII letter
    /// (surrounding whitespace aside) is ignored.
    pub fn guess_input(&mut self, input: &str) -> GuessOutcome {
        match parse_letter(input) {
            Some(letter) => self.guess(letter),
            None => GuessOutcome::Ignored,
        }
    }

    /// Consume one elapsed second. Only counts while active.
    pub fn tick(&mut self) -> GameStatus {
        if self.status != GameStatus::Active {
            return self.status;
        }

        self.time_remaining_secs = self.time_remaining_secs.saturating_sub(1);
        if self.time_remaining_secs == 0 {
            self.transition(GameStatus::TimedOut);
        }
        self.status
    }

    /// Returns `true` if the session moved from `Active` to `Paused`.
    pub fn pause(&mut self) -> bool {
        if self.status != GameStatus::Active {
            return false;
        }
        self.transition(GameStatus::Paused);
        true
    }

    /// Returns `true` if the session moved from `Paused` to `Active`.
    pub fn resume(&mut self) -> bool {
        if self.status != GameStatus::Paused {
            return false;
        }
        self.transition(GameStatus::Active);
        true
    }

    /// The word with unguessed letters rendered as `" _ "`.
    pub fn display_word(&self) -> String {
        self.word
            .text()
            .chars()
            .map(|c| {
                if self.guessed_letters.contains(&c) {
                    c.to_string()
                } else {
                    " _ ".to_string()
                }
            })
            .collect()
    }

    /// Message shown (and recorded) once the session has ended.
    pub fn outcome_message(&self) -> Option<String> {
        let word = self.word.text();
        match self.status {
            GameStatus::Won => Some(format!("You won! The word was {word}.")),
            GameStatus::Lost => Some(format!("You lost! The word was {word}.")),
            GameStatus::TimedOut => Some(format!("Time's up! You lost! The word was {word}.")),
            GameStatus::Active | GameStatus::Paused => None,
        }
    }

    fn is_fully_revealed(&self) -> bool {
        self.word
            .text()
            .chars()
            .all(|c| self.guessed_letters.contains(&c))
    }

    fn transition(&mut self, to: GameStatus) {
        tracing::info!(
            from = self.status.as_str(),
            to = to.as_str(),
            time_remaining = self.time_remaining_secs,
            mistakes = self.mistakes,
            "Game status changed"
        );
        self.status = to;
    }
}

/// Parse user input into a guessable letter.
pub fn parse_letter(input: &str) -> Option<char> {
    let mut chars = input.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c.to_ascii_uppercase()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(word: &str) -> GameSession {
        GameSession::new(Word::new(word, 1).unwrap())
    }

    fn short_clock(word: &str, secs: u32) -> GameSession {
        GameSession::with_rules(
            Word::new(word, 1).unwrap(),
            GameRules::new(8, secs).unwrap(),
        )
    }

    #[test]
    fn new_session_starts_active_with_full_budgets() {
        let game = session("SWIFT");
        assert_eq!(game.status(), GameStatus::Active);
        assert_eq!(game.mistakes(), 0);
        assert_eq!(game.remaining_attempts(), 8);
        assert_eq!(game.time_remaining_secs(), 300);
        assert!(game.guessed_letters().is_empty());
    }

    #[test]
    fn winning_progression_reveals_letters_in_order() {
        let mut game = session("SWIFT");
        assert_eq!(game.display_word(), " _  _  _  _  _ ");

        let expected = [
            ('S', "S _  _  _  _ ", GuessOutcome::Hit),
            ('W', "SW _  _  _ ", GuessOutcome::Hit),
            ('I', "SWI _  _ ", GuessOutcome::Hit),
            ('F', "SWIF _ ", GuessOutcome::Hit),
            ('T', "SWIFT", GuessOutcome::Won),
        ];
        for (letter, display, outcome) in expected {
            assert_eq!(game.guess(letter), outcome);
            assert_eq!(game.display_word(), display);
        }
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(
            game.outcome_message().as_deref(),
            Some("You won! The word was SWIFT.")
        );
    }

    #[test]
    fn eight_wrong_guesses_lose_exactly_on_the_last() {
        let mut game = session("JAVA");
        let wrong = ['Z', 'X', 'Q', 'B', 'C', 'D', 'E', 'G'];

        for (i, letter) in wrong.iter().enumerate() {
            let outcome = game.guess(*letter);
            if i < wrong.len() - 1 {
                assert_eq!(outcome, GuessOutcome::Miss);
                assert_eq!(game.status(), GameStatus::Active);
            } else {
                assert_eq!(outcome, GuessOutcome::Lost);
            }
        }
        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(game.mistakes(), 8);
        assert_eq!(game.remaining_attempts(), 0);
        assert_eq!(
            game.outcome_message().as_deref(),
            Some("You lost! The word was JAVA.")
        );
    }

    #[test]
    fn repeated_guess_is_a_no_op() {
        let mut game = session("JAVA");
        assert_eq!(game.guess('z'), GuessOutcome::Miss);
        let before = game.clone();

        assert_eq!(game.guess('Z'), GuessOutcome::Ignored);
        assert_eq!(game.mistakes(), before.mistakes());
        assert_eq!(game.guessed_letters(), before.guessed_letters());
    }

    #[test]
    fn guesses_are_case_insensitive() {
        let mut game = session("JAVA");
        assert_eq!(game.guess('a'), GuessOutcome::Hit);
        assert!(game.guessed_letters().contains(&'A'));
        assert_eq!(game.display_word(), " _ A _ A");
    }

    #[test]
    fn invalid_input_is_ignored() {
        let mut game = session("JAVA");
        assert_eq!(game.guess('1'), GuessOutcome::Ignored);
        assert_eq!(game.guess_input("ab"), GuessOutcome::Ignored);
        assert_eq!(game.guess_input(""), GuessOutcome::Ignored);
        assert_eq!(game.guess_input("é"), GuessOutcome::Ignored);
        assert_eq!(game.mistakes(), 0);
        assert!(game.guessed_letters().is_empty());

        assert_eq!(game.guess_input(" j \n"), GuessOutcome::Hit);
    }

    #[test]
    fn last_tick_times_out_and_further_ticks_are_ignored() {
        let mut game = short_clock("SWIFT", 1);
        assert_eq!(game.tick(), GameStatus::TimedOut);
        assert_eq!(game.time_remaining_secs(), 0);

        assert_eq!(game.tick(), GameStatus::TimedOut);
        assert_eq!(game.time_remaining_secs(), 0);
        assert_eq!(
            game.outcome_message().as_deref(),
            Some("Time's up! You lost! The word was SWIFT.")
        );
    }

    #[test]
    fn ticks_count_down_while_active() {
        let mut game = session("SWIFT");
        for _ in 0..50 {
            game.tick();
        }
        assert_eq!(game.time_remaining_secs(), 250);
        assert_eq!(game.status(), GameStatus::Active);
    }

    #[test]
    fn pause_freezes_clock_and_guesses() {
        let mut game = session("SWIFT");
        game.tick();
        assert!(game.pause());
        assert!(!game.pause());

        assert_eq!(game.tick(), GameStatus::Paused);
        assert_eq!(game.guess('S'), GuessOutcome::Ignored);
        assert_eq!(game.time_remaining_secs(), 299);

        assert!(game.resume());
        assert!(!game.resume());
        assert_eq!(game.time_remaining_secs(), 299);
        assert_eq!(game.status(), GameStatus::Active);
    }

    fn assert_frozen(mut game: GameSession, status: GameStatus) {
        assert_eq!(game.status(), status);
        let frozen = game.clone();

        assert_eq!(game.guess('Z'), GuessOutcome::Ignored);
        assert_eq!(game.guess('P'), GuessOutcome::Ignored);
        assert_eq!(game.tick(), status);
        assert!(!game.pause());
        assert!(!game.resume());

        assert_eq!(game.mistakes(), frozen.mistakes());
        assert_eq!(game.guessed_letters(), frozen.guessed_letters());
        assert_eq!(game.time_remaining_secs(), frozen.time_remaining_secs());
        assert_eq!(game.status(), frozen.status());
        assert_eq!(game.outcome_message(), frozen.outcome_message());
    }

    #[test]
    fn won_session_is_frozen() {
        let mut game = session("OOP");
        game.guess('O');
        game.guess('P');
        assert_frozen(game, GameStatus::Won);
    }

    #[test]
    fn lost_session_is_frozen() {
        let mut game = GameSession::with_rules(
            Word::new("OOP", 1).unwrap(),
            GameRules::new(2, 300).unwrap(),
        );
        assert_eq!(game.guess('X'), GuessOutcome::Miss);
        assert_eq!(game.guess('Y'), GuessOutcome::Lost);
        assert_eq!(game.remaining_attempts(), 0);
        assert_frozen(game, GameStatus::Lost);
    }

    #[test]
    fn timed_out_session_is_frozen() {
        let mut game = short_clock("OOP", 2);
        game.guess('O');
        game.tick();
        assert_eq!(game.tick(), GameStatus::TimedOut);
        assert_eq!(game.time_remaining_secs(), 0);
        assert_frozen(game, GameStatus::TimedOut);
    }

    #[test]
    fn mistakes_never_exceed_budget() {
        let mut game = session("A");
        for letter in 'B'..='Z' {
            game.guess(letter);
            assert!(game.mistakes() <= game.max_mistakes());
        }
        assert_eq!(game.status(), GameStatus::Lost);
        assert!(game.display_word().contains('_'));
    }

    #[test]
    fn empty_pick_falls_back_to_default_word() {
        let game = GameSession::from_pick(None, GameRules::default());
        assert_eq!(game.word().text(), "DEFAULT");
    }

    #[test]
    fn parse_letter_uppercases_single_letters() {
        assert_eq!(parse_letter("q"), Some('Q'));
        assert_eq!(parse_letter("  Q "), Some('Q'));
        assert_eq!(parse_letter("qq"), None);
        assert_eq!(parse_letter("7"), None);
    }
}
