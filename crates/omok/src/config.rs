//! Game configuration loaded from TOML.

use crate::llm_client::LlmConfig;
use crate::mode::GameMode;
use crate::model::ModelSelection;
use derive_getters::Getters;
use derive_more::{Display, Error};
use omok_rules::{DEFAULT_BOARD_SIZE, Stone};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Smallest board that can hold a line of five.
pub const MIN_BOARD_SIZE: usize = 5;

/// Largest board with single-letter column labels.
pub const MAX_BOARD_SIZE: usize = 26;

/// Configuration for an omok session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct OmokConfig {
    /// Board side length.
    #[serde(default = "default_board_size")]
    board_size: usize,

    /// Human-vs-human or human-vs-AI.
    #[serde(default)]
    mode: GameMode,

    /// Color the oracle plays in human-vs-AI mode.
    #[serde(default = "default_ai_color")]
    ai_color: Stone,

    /// Model the oracle asks.
    #[serde(default)]
    model: ModelSelection,

    /// Bounded wait for a single oracle request, in seconds.
    #[serde(default = "default_oracle_timeout_secs")]
    oracle_timeout_secs: u64,

    /// Maximum tokens for LLM responses.
    #[serde(default = "default_max_tokens")]
    llm_max_tokens: u32,
}

fn default_board_size() -> usize {
    DEFAULT_BOARD_SIZE
}

fn default_ai_color() -> Stone {
    Stone::White
}

fn default_oracle_timeout_secs() -> u64 {
    30
}

fn default_max_tokens() -> u32 {
    1024
}

impl Default for OmokConfig {
    fn default() -> Self {
        Self {
            board_size: default_board_size(),
            mode: GameMode::default(),
            ai_color: default_ai_color(),
            model: ModelSelection::default(),
            oracle_timeout_secs: default_oracle_timeout_secs(),
            llm_max_tokens: default_max_tokens(),
        }
    }
}

impl OmokConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(mode = %config.mode, model = %config.model, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConfigError::new(format!(
                "board_size must be between {} and {}, got {}",
                MIN_BOARD_SIZE, MAX_BOARD_SIZE, self.board_size
            )));
        }
        if self.oracle_timeout_secs == 0 {
            return Err(ConfigError::new(
                "oracle_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Overrides the board size.
    pub fn with_board_size(mut self, board_size: usize) -> Result<Self, ConfigError> {
        self.board_size = board_size;
        self.validate()?;
        Ok(self)
    }

    /// Overrides the game mode.
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    /// Overrides the AI color.
    pub fn with_ai_color(mut self, ai_color: Stone) -> Self {
        self.ai_color = ai_color;
        self
    }

    /// Overrides the model.
    pub fn with_model(mut self, model: ModelSelection) -> Self {
        self.model = model;
        self
    }

    /// Overrides the oracle timeout.
    pub fn with_oracle_timeout(mut self, timeout: Duration) -> Self {
        self.oracle_timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Oracle timeout as a [`Duration`].
    pub fn oracle_timeout(&self) -> Duration {
        Duration::from_secs(self.oracle_timeout_secs)
    }

    /// Creates LLM configuration for `model`.
    /// Requires OPENAI_API_KEY or GEMINI_API_KEY, depending on the provider.
    #[instrument(skip(self))]
    pub fn create_llm_config(&self, model: ModelSelection) -> Result<LlmConfig, ConfigError> {
        let provider = model.provider();
        let var = provider.api_key_var();
        let api_key = std::env::var(var)
            .map_err(|_| ConfigError::new(format!("{} environment variable not set", var)))?;

        Ok(LlmConfig::new(
            provider,
            api_key,
            model.api_name().to_string(),
            self.llm_max_tokens,
        ))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config: OmokConfig = toml::from_str("").unwrap();
        assert_eq!(config, OmokConfig::default());
        assert_eq!(*config.board_size(), 15);
        assert_eq!(*config.ai_color(), Stone::White);
        assert_eq!(config.oracle_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_board_size_bounds() {
        assert!(OmokConfig::default().with_board_size(4).is_err());
        assert!(OmokConfig::default().with_board_size(27).is_err());
        assert!(OmokConfig::default().with_board_size(19).is_ok());
    }

    #[test]
    fn test_unknown_model_fails_to_parse() {
        let result: Result<OmokConfig, _> = toml::from_str(r#"model = "acme/brain-9000""#);
        assert!(result.is_err());
    }
}
