//! Loading game configuration from TOML.
//!
//! Schema (all keys optional):
//!
//! ```toml
//! turn_delay_ms = 800
//! code_deck_size = 30
//!
//! [[players]]
//! name = "Игрок 1"
//! color = "indigo"
//!
//! [[players]]
//! name = "Игрок 2"
//! color = "rose"
//! ```

use std::time::Duration;

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::seeds::DEFAULT_PLAYERS;
use crate::tasks::DEFAULT_CODE_DECK_SIZE;

pub const DEFAULT_TURN_DELAY_MS: u64 = 800;

#[derive(Clone, Debug, Deserialize)]
pub struct GameConfig {
  /// Pause between a non-winning grade and the turn switch. 0 switches at once.
  #[serde(default = "default_turn_delay_ms")]
  pub turn_delay_ms: u64,
  #[serde(default = "default_code_deck_size")]
  pub code_deck_size: usize,
  #[serde(default)]
  pub players: Vec<PlayerCfg>,
}

/// Display identity override for one player, by position in the list.
#[derive(Clone, Debug, Deserialize)]
pub struct PlayerCfg {
  #[serde(default)] pub name: Option<String>,
  #[serde(default)] pub color: Option<String>,
}

fn default_turn_delay_ms() -> u64 {
  DEFAULT_TURN_DELAY_MS
}

fn default_code_deck_size() -> usize {
  DEFAULT_CODE_DECK_SIZE
}

impl Default for GameConfig {
  fn default() -> Self {
    Self {
      turn_delay_ms: DEFAULT_TURN_DELAY_MS,
      code_deck_size: DEFAULT_CODE_DECK_SIZE,
      players: Vec::new(),
    }
  }
}

impl GameConfig {
  pub fn turn_delay(&self) -> Duration {
    Duration::from_millis(self.turn_delay_ms)
  }

  /// Names and colors for players 0 and 1, with built-in fallbacks.
  pub fn player_identities(&self) -> [(String, String); 2] {
    std::array::from_fn(|i| {
      let (name, color) = DEFAULT_PLAYERS[i];
      let cfg = self.players.get(i);
      (
        cfg.and_then(|p| p.name.clone()).unwrap_or_else(|| name.to_string()),
        cfg.and_then(|p| p.color.clone()).unwrap_or_else(|| color.to_string()),
      )
    })
  }

  pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
    let mut cfg: GameConfig = toml::from_str(s)?;
    if cfg.code_deck_size == 0 {
      warn!(target: "greek_journey", "code_deck_size = 0 would leave the deck empty; using default");
      cfg.code_deck_size = DEFAULT_CODE_DECK_SIZE;
    }
    Ok(cfg)
  }
}

/// Load from GAME_CONFIG_PATH (falling back to defaults on any IO/parse error),
/// then apply the TURN_DELAY_MS env override.
pub fn load_game_config_from_env() -> GameConfig {
  let mut cfg = match std::env::var("GAME_CONFIG_PATH") {
    Ok(path) => match std::fs::read_to_string(&path) {
      Ok(s) => match GameConfig::from_toml_str(&s) {
        Ok(cfg) => {
          info!(target: "greek_journey", %path, "Loaded game config (TOML)");
          cfg
        }
        Err(e) => {
          error!(target: "greek_journey", %path, error = %e, "Failed to parse TOML config");
          GameConfig::default()
        }
      },
      Err(e) => {
        error!(target: "greek_journey", %path, error = %e, "Failed to read TOML config file");
        GameConfig::default()
      }
    },
    Err(_) => GameConfig::default(),
  };

  if let Some(ms) = std::env::var("TURN_DELAY_MS").ok().and_then(|v| v.parse::<u64>().ok()) {
    cfg.turn_delay_ms = ms;
  }
  cfg
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_file_gives_defaults() {
    let cfg = GameConfig::from_toml_str("").expect("parse");
    assert_eq!(cfg.turn_delay_ms, 800);
    assert_eq!(cfg.code_deck_size, 30);
    assert_eq!(cfg.player_identities()[1], ("Игрок 2".to_string(), "rose".to_string()));
  }

  #[test]
  fn partial_player_overrides() {
    let cfg = GameConfig::from_toml_str(
      r#"
        turn_delay_ms = 0
        code_deck_size = 12

        [[players]]
        name = "Άννα"
      "#,
    )
    .expect("parse");
    assert_eq!(cfg.turn_delay(), Duration::ZERO);
    assert_eq!(cfg.code_deck_size, 12);
    let ids = cfg.player_identities();
    assert_eq!(ids[0], ("Άννα".to_string(), "indigo".to_string()));
    assert_eq!(ids[1].0, "Игрок 2");
  }

  #[test]
  fn zero_deck_size_is_replaced() {
    let cfg = GameConfig::from_toml_str("code_deck_size = 0").expect("parse");
    assert_eq!(cfg.code_deck_size, DEFAULT_CODE_DECK_SIZE);
  }

  #[test]
  fn malformed_toml_is_an_error() {
    assert!(GameConfig::from_toml_str("turn_delay_ms = \"soon\"").is_err());
  }
}
