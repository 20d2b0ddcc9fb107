use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::quiz::TokenMap;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_question_count")]
    pub question_count: usize,
    #[serde(default = "default_passing_threshold")]
    pub passing_threshold: f64,
    #[serde(default = "default_advance_delay_ms")]
    pub advance_delay_ms: u64,
    #[serde(default = "default_yes_token")]
    pub yes_token: String,
    #[serde(default = "default_no_token")]
    pub no_token: String,
    #[serde(default = "default_questions_file")]
    pub questions_file: String,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_question_count() -> usize {
    15
}
fn default_passing_threshold() -> f64 {
    8.5
}
fn default_advance_delay_ms() -> u64 {
    1500
}
fn default_yes_token() -> String {
    "y".to_string()
}
fn default_no_token() -> String {
    "n".to_string()
}
fn default_questions_file() -> String {
    // Empty means the bundled question set.
    String::new()
}
fn default_theme() -> String {
    "terminal-default".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            question_count: default_question_count(),
            passing_threshold: default_passing_threshold(),
            advance_delay_ms: default_advance_delay_ms(),
            yes_token: default_yes_token(),
            no_token: default_no_token(),
            questions_file: default_questions_file(),
            theme: default_theme(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("termquiz")
            .join("config.toml")
    }

    /// Reset answer tokens that cannot disambiguate Yes from No.
    /// Call after deserialization to handle hand-edited configs.
    pub fn normalize_tokens(&mut self) {
        let yes = self.yes_token.trim();
        let no = self.no_token.trim();
        if yes.is_empty() || no.is_empty() || yes.eq_ignore_ascii_case(no) {
            self.yes_token = default_yes_token();
            self.no_token = default_no_token();
        }
    }

    pub fn token_map(&self) -> TokenMap {
        TokenMap::new(&self.yes_token, &self.no_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.question_count, 15);
        assert_eq!(config.passing_threshold, 8.5);
        assert_eq!(config.advance_delay_ms, 1500);
        assert_eq!(config.yes_token, "y");
        assert_eq!(config.no_token, "n");
        assert!(config.questions_file.is_empty());
    }

    #[test]
    fn test_config_serde_defaults_from_partial() {
        let toml_str = r#"
question_count = 20
yes_token = "I"
no_token = "H"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.question_count, 20);
        assert_eq!(config.yes_token, "I");
        assert_eq!(config.no_token, "H");
        // Untouched fields keep their defaults
        assert_eq!(config.passing_threshold, 8.5);
        assert_eq!(config.advance_delay_ms, 1500);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let mut config = Config::default();
        config.passing_threshold = 10.0;
        config.questions_file = "trivia.csv".to_string();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.passing_threshold, deserialized.passing_threshold);
        assert_eq!(config.questions_file, deserialized.questions_file);
        assert_eq!(config.question_count, deserialized.question_count);
    }

    #[test]
    fn test_normalize_tokens_valid_unchanged() {
        let mut config = Config::default();
        config.yes_token = "ja".to_string();
        config.no_token = "nee".to_string();
        config.normalize_tokens();
        assert_eq!(config.yes_token, "ja");
        assert_eq!(config.no_token, "nee");
    }

    #[test]
    fn test_normalize_tokens_empty_resets() {
        let mut config = Config::default();
        config.yes_token = String::new();
        config.normalize_tokens();
        assert_eq!(config.yes_token, "y");
        assert_eq!(config.no_token, "n");
    }

    #[test]
    fn test_normalize_tokens_identical_resets() {
        let mut config = Config::default();
        config.yes_token = "x".to_string();
        config.no_token = "X".to_string();
        config.normalize_tokens();
        assert_eq!(config.yes_token, "y");
        assert_eq!(config.no_token, "n");
    }
}
