//! Game mode selection.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Game mode - who is the opponent?
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum GameMode {
    /// Two humans share the board (hotseat).
    #[default]
    #[serde(alias = "human-vs-human")]
    #[strum(to_string = "pvp", serialize = "human-vs-human")]
    Pvp,
    /// Human against the move oracle.
    #[serde(alias = "human-vs-ai")]
    #[strum(to_string = "pve", serialize = "human-vs-ai")]
    Pve,
}

impl GameMode {
    /// Returns display name.
    pub fn name(self) -> &'static str {
        match self {
            GameMode::Pvp => "PvP",
            GameMode::Pve => "PvE",
        }
    }

    /// Toggles between the two modes.
    pub fn toggle(self) -> Self {
        match self {
            GameMode::Pvp => GameMode::Pve,
            GameMode::Pve => GameMode::Pvp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("pve".parse::<GameMode>().unwrap(), GameMode::Pve);
        assert_eq!("Human-vs-AI".parse::<GameMode>().unwrap(), GameMode::Pve);
        assert_eq!("PVP".parse::<GameMode>().unwrap(), GameMode::Pvp);
        assert!("ai-vs-ai".parse::<GameMode>().is_err());
    }

    #[test]
    fn test_config_accepts_cli_aliases() {
        #[derive(Deserialize)]
        struct Table {
            mode: GameMode,
        }

        let pve: Table = toml::from_str(r#"mode = "human-vs-ai""#).unwrap();
        assert_eq!(pve.mode, GameMode::Pve);
        let pvp: Table = toml::from_str(r#"mode = "human-vs-human""#).unwrap();
        assert_eq!(pvp.mode, GameMode::Pvp);
        let short: Table = toml::from_str(r#"mode = "pve""#).unwrap();
        assert_eq!(short.mode, GameMode::Pve);
    }

    #[test]
    fn test_toggle() {
        assert_eq!(GameMode::Pvp.toggle(), GameMode::Pve);
        assert_eq!(GameMode::Pve.toggle().toggle(), GameMode::Pve);
    }
}
