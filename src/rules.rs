//! The rules text shown to players.
//!
//! A copy is compiled into the binary; a file on disk may replace it. A
//! missing or unreadable file is logged and reported as `None`, it never
//! affects gameplay. Either text may use `{max_mistakes}` and `{time_limit}`,
//! which are filled in from the rules in effect.

use std::path::Path;

use crate::error::{Error, Result};
use crate::game::GameRules;

pub const BUILTIN_RULES: &str = include_str!("../assets/rules.txt");

pub fn read_rules(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(Error::ResourceMissing {
            path: path.to_path_buf(),
        });
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Rules text from `path` if given, the built-in text otherwise.
pub fn load_rules(path: Option<&Path>, rules: &GameRules) -> Option<String> {
    let Some(path) = path else {
        return Some(render(BUILTIN_RULES, rules));
    };

    match read_rules(path) {
        Ok(text) => {
            tracing::debug!("Path to rules: {}", path.display());
            Some(render(&text, rules))
        }
        Err(e) => {
            tracing::warn!("Error reading rules file: {}", e);
            None
        }
    }
}

fn render(text: &str, rules: &GameRules) -> String {
    text.replace("{max_mistakes}", &rules.max_mistakes.to_string())
        .replace("{time_limit}", &describe_time_limit(rules.time_limit_secs))
}

fn describe_time_limit(secs: u32) -> String {
    match (secs / 60, secs % 60) {
        (1, 0) => "1 minute".to_string(),
        (minutes, 0) => format!("{minutes} minutes"),
        _ if secs == 1 => "1 second".to_string(),
        _ => format!("{secs} seconds"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_rules_mention_the_default_budgets() {
        let text = load_rules(None, &GameRules::default()).unwrap();
        assert!(text.contains("You have 8 attempts."));
        assert!(text.contains("You have 5 minutes."));
        assert!(!text.contains('{'));
    }

    #[test]
    fn builtin_rules_follow_configured_budgets() {
        let rules = GameRules::new(3, 90).unwrap();
        let text = load_rules(None, &rules).unwrap();

        assert!(text.contains("You have 3 attempts."));
        assert!(text.contains("You have 90 seconds."));
        assert!(!text.contains("8 attempts"));
    }

    #[test]
    fn time_limits_read_naturally() {
        assert_eq!(describe_time_limit(60), "1 minute");
        assert_eq!(describe_time_limit(600), "10 minutes");
        assert_eq!(describe_time_limit(1), "1 second");
        assert_eq!(describe_time_limit(45), "45 seconds");
    }

    #[test]
    fn missing_file_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("Rules.txt");
        assert!(load_rules(Some(&missing), &GameRules::default()).is_none());
        assert!(matches!(
            read_rules(&missing),
            Err(Error::ResourceMissing { .. })
        ));
    }

    #[test]
    fn file_overrides_builtin_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Rules.txt");
        std::fs::write(&path, "House rules: {max_mistakes} misses").unwrap();

        let rules = GameRules::new(4, 300).unwrap();
        assert_eq!(
            load_rules(Some(&path), &rules).as_deref(),
            Some("House rules: 4 misses")
        );
    }
}
