//! Recognized language-model backends.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// LLM provider selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// OpenAI (GPT and o-series models).
    OpenAI,
    /// Google Gemini.
    Gemini,
}

impl LlmProvider {
    /// Environment variable holding the provider's API key.
    pub fn api_key_var(self) -> &'static str {
        match self {
            LlmProvider::OpenAI => "OPENAI_API_KEY",
            LlmProvider::Gemini => "GEMINI_API_KEY",
        }
    }
}

/// Which model the move oracle asks.
///
/// Identifiers are `provider/model`, e.g. `openai/gpt-4o-mini`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum ModelSelection {
    /// GPT-4o.
    #[serde(rename = "openai/gpt-4o")]
    #[strum(to_string = "openai/gpt-4o")]
    Gpt4o,
    /// GPT-4o mini.
    #[default]
    #[serde(rename = "openai/gpt-4o-mini")]
    #[strum(to_string = "openai/gpt-4o-mini")]
    Gpt4oMini,
    /// o4-mini.
    #[serde(rename = "openai/o4-mini")]
    #[strum(to_string = "openai/o4-mini")]
    O4Mini,
    /// Gemini 2.0 Flash.
    #[serde(rename = "gemini/gemini-2.0-flash")]
    #[strum(to_string = "gemini/gemini-2.0-flash")]
    Gemini20Flash,
    /// Gemini 2.5 Flash preview.
    #[serde(rename = "gemini/gemini-2.5-flash-preview-05-20")]
    #[strum(to_string = "gemini/gemini-2.5-flash-preview-05-20")]
    Gemini25Flash,
    /// Gemini 2.5 Pro preview.
    #[serde(rename = "gemini/gemini-2.5-pro-preview-06-05")]
    #[strum(to_string = "gemini/gemini-2.5-pro-preview-06-05")]
    Gemini25Pro,
}

impl ModelSelection {
    /// All recognized models, in menu order.
    pub fn all() -> Vec<ModelSelection> {
        Self::iter().collect()
    }

    /// Provider serving this model.
    pub fn provider(self) -> LlmProvider {
        match self {
            Self::Gpt4o | Self::Gpt4oMini | Self::O4Mini => LlmProvider::OpenAI,
            Self::Gemini20Flash | Self::Gemini25Flash | Self::Gemini25Pro => LlmProvider::Gemini,
        }
    }

    /// Model name as the provider's API knows it (the part after the slash).
    pub fn api_name(self) -> &'static str {
        match self {
            Self::Gpt4o => "gpt-4o",
            Self::Gpt4oMini => "gpt-4o-mini",
            Self::O4Mini => "o4-mini",
            Self::Gemini20Flash => "gemini-2.0-flash",
            Self::Gemini25Flash => "gemini-2.5-flash-preview-05-20",
            Self::Gemini25Pro => "gemini-2.5-pro-preview-06-05",
        }
    }

    /// The next model in menu order, wrapping around.
    pub fn cycle(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|m| *m == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_round_trips_through_display() {
        for model in ModelSelection::all() {
            let id = model.to_string();
            assert_eq!(id.parse::<ModelSelection>().unwrap(), model);
            assert!(id.ends_with(model.api_name()));
        }
    }

    #[test]
    fn test_unknown_identifier_rejected() {
        assert!("openai/gpt-5-ultra".parse::<ModelSelection>().is_err());
    }

    #[test]
    fn test_provider_from_prefix() {
        assert_eq!(ModelSelection::O4Mini.provider(), LlmProvider::OpenAI);
        assert_eq!(ModelSelection::Gemini25Pro.provider(), LlmProvider::Gemini);
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(ModelSelection::Gpt4o.cycle(), ModelSelection::Gpt4oMini);
        assert_eq!(ModelSelection::Gemini25Pro.cycle(), ModelSelection::Gpt4o);
    }

    #[test]
    fn test_serde_uses_identifier() {
        let json = serde_json::to_string(&ModelSelection::Gemini20Flash).unwrap();
        assert_eq!(json, "\"gemini/gemini-2.0-flash\"");
    }
}
