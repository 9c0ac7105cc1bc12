//! TOML-based application configuration.
//!
//! Stores the user's block defaults and HUD preferences at
//! `~/.config/focusblock/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::chain::DEFAULT_FIRE_THRESHOLD;
use crate::error::{ConfigError, Result};
use crate::guard::DEFAULT_DEBOUNCE_MS;

/// Block defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockConfig {
    /// Block length offered when the user does not pick one.
    #[serde(default = "default_minutes")]
    pub default_minutes: f64,
    /// Free-form check-in field, same syntax the start command accepts.
    #[serde(default = "default_check_ins")]
    pub check_ins: String,
    /// Ignore duplicate start triggers inside this window.
    #[serde(default = "default_debounce_ms")]
    pub start_debounce_ms: u64,
}

/// HUD preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HudConfig {
    /// Chain length at which the streak flare shows.
    #[serde(default = "default_fire_threshold")]
    pub chain_fire_threshold: u64,
    #[serde(default = "default_true")]
    pub show_next_check_in: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/focusblock/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub block: BlockConfig,
    #[serde(default)]
    pub hud: HudConfig,
}

fn default_minutes() -> f64 {
    20.0
}
fn default_check_ins() -> String {
    "5, 12".into()
}
fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}
fn default_fire_threshold() -> u64 {
    DEFAULT_FIRE_THRESHOLD
}
fn default_true() -> bool {
    true
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            default_minutes: default_minutes(),
            check_ins: default_check_ins(),
            start_debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            chain_fire_threshold: default_fire_threshold(),
            show_next_check_in: true,
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the default file on first run.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path,
                    message: e.to_string(),
                })?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, returning the default on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Every settable key with its current value, for `config list`.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("block.default_minutes", self.block.default_minutes.to_string()),
            ("block.check_ins", self.block.check_ins.clone()),
            (
                "block.start_debounce_ms",
                self.block.start_debounce_ms.to_string(),
            ),
            (
                "hud.chain_fire_threshold",
                self.hud.chain_fire_threshold.to_string(),
            ),
            (
                "hud.show_next_check_in",
                self.hud.show_next_check_in.to_string(),
            ),
        ]
    }

    /// Get a value as a string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    /// Set a value by dot-separated key and persist.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
            value.parse().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("cannot parse '{value}'"),
            })
        }

        match key {
            "block.default_minutes" => {
                let minutes: f64 = parse(key, value)?;
                if !minutes.is_finite() || minutes <= 0.0 {
                    return Err(ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: "minutes must be positive".to_string(),
                    }
                    .into());
                }
                self.block.default_minutes = minutes;
            }
            "block.check_ins" => self.block.check_ins = value.to_string(),
            "block.start_debounce_ms" => self.block.start_debounce_ms = parse(key, value)?,
            "hud.chain_fire_threshold" => self.hud.chain_fire_threshold = parse(key, value)?,
            "hud.show_next_check_in" => self.hud.show_next_check_in = parse(key, value)?,
            _ => return Err(ConfigError::UnknownKey(key.to_string()).into()),
        }
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.block.default_minutes, 20.0);
        assert_eq!(parsed.block.check_ins, "5, 12");
        assert_eq!(parsed.hud.chain_fire_threshold, 50);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.block.start_debounce_ms, 1_000);
        assert!(parsed.hud.show_next_check_in);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("block.default_minutes").as_deref(), Some("20"));
        assert_eq!(cfg.get("block.check_ins").as_deref(), Some("5, 12"));
        assert!(cfg.get("block.missing_key").is_none());
    }

    #[test]
    fn entries_cover_every_gettable_key() {
        let cfg = Config::default();
        for (key, _) in cfg.entries() {
            assert!(cfg.get(key).is_some(), "entry {key} not gettable");
        }
    }

    #[test]
    fn set_rejects_unknown_key_and_bad_values() {
        // Error paths return before touching disk.
        let mut cfg = Config::default();
        assert!(cfg.set("block.nonexistent", "1").is_err());
        assert!(cfg.set("block.default_minutes", "not_a_number").is_err());
        assert!(cfg.set("block.default_minutes", "-5").is_err());
        assert!(cfg.set("hud.show_next_check_in", "maybe").is_err());
        assert_eq!(cfg.block.default_minutes, 20.0);
    }

    #[test]
    fn set_updates_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("FOCUSBLOCK_DATA_DIR", dir.path());

        let mut cfg = Config::default();
        cfg.set("block.default_minutes", "45").unwrap();
        cfg.set("block.check_ins", "10").unwrap();
        assert_eq!(cfg.block.default_minutes, 45.0);

        let reloaded = Config::load().unwrap();
        assert_eq!(reloaded.block.default_minutes, 45.0);
        assert_eq!(reloaded.block.check_ins, "10");

        std::env::remove_var("FOCUSBLOCK_DATA_DIR");
    }
}
