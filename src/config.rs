//! Engine configuration.
//!
//! Settings load from a RON file (every field optional) and can then be
//! overridden from the environment:
//!
//! - `BATTLE_LEVEL`: level every combatant is built at
//! - `BATTLE_SEED`: seed for a reproducible random stream

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_LEVEL: u8 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Level shared by every combatant in every battle.
    pub level: u8,
    /// Seed for the engine's random stream. `None` seeds from the OS.
    pub seed: Option<u64>,
    pub wild_opponent: WildOpponentConfig,
}

/// How `start_encounter` derives an opponent from the player's record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WildOpponentConfig {
    pub min_id: u32,
    pub max_id: u32,
    pub name_prefix: String,
    /// `{id}` is replaced with the drawn identifier.
    pub sprite_url_template: String,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL,
            seed: None,
            wild_opponent: WildOpponentConfig::default(),
        }
    }
}

impl Default for WildOpponentConfig {
    fn default() -> Self {
        Self {
            min_id: 1,
            max_id: 150,
            name_prefix: "wild-pokemon".to_string(),
            sprite_url_template:
                "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/{id}.png"
                    .to_string(),
        }
    }
}

impl WildOpponentConfig {
    pub fn sprite_url(&self, id: u32) -> String {
        self.sprite_url_template.replace("{id}", &id.to_string())
    }
}

impl BattleConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: BattleConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&content)
    }

    /// Apply `BATTLE_LEVEL` / `BATTLE_SEED` overrides on top of this config.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(level) = read_env::<u8>("BATTLE_LEVEL") {
            self.level = level;
        }
        if let Some(seed) = read_env::<u64>("BATTLE_SEED") {
            self.seed = Some(seed);
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.level) {
            return Err(ConfigError::Invalid(format!(
                "level must be between 1 and 100, got {}",
                self.level
            )));
        }
        let wild = &self.wild_opponent;
        if wild.min_id == 0 || wild.min_id > wild.max_id {
            return Err(ConfigError::Invalid(format!(
                "wild opponent id range {}..={} is empty or starts at 0",
                wild.min_id, wild.max_id
            )));
        }
        Ok(())
    }
}

fn read_env<T: FromStr>(key: &str) -> Option<T> {
    match env::var(key) {
        Ok(value) => match value.trim().parse() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                tracing::warn!(key, value = %value, "ignoring unparsable environment override");
                None
            }
        },
        Err(_) => None,
    }
}
