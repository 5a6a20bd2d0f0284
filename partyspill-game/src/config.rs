//! Board-game tuning that can be loaded from JSON.
use crate::board::SpaceType;
use crate::constants::{
    DEFAULT_LOOP_LENGTH, DEFAULT_MIN_PLAYERS, DEFAULT_SIPS_MAX, DEFAULT_SIPS_MIN,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Errors raised when board configuration invariants are violated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("loop length must be at least {min} (got {value})")]
    LoopTooShort { min: usize, value: usize },
    #[error("at least one space type needs a non-zero weight")]
    NoWeightedSpaces,
    #[error("{0:?} spaces are placed automatically and cannot be weighted")]
    ReservedSpaceType(SpaceType),
    #[error("sips range invalid (min {min} > max {max})")]
    SipsRange { min: u8, max: u8 },
    #[error("sips minimum must be at least 1")]
    ZeroSips,
    #[error("a game needs at least one player (got {0})")]
    MinPlayers(usize),
    #[error("config parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardConfig {
    #[serde(default = "BoardConfig::default_loop_length")]
    pub loop_length: usize,
    #[serde(default = "BoardConfig::default_weights")]
    pub weights: BTreeMap<SpaceType, u32>,
    #[serde(default = "BoardConfig::default_sips_min")]
    pub sips_min: u8,
    #[serde(default = "BoardConfig::default_sips_max")]
    pub sips_max: u8,
    #[serde(default = "BoardConfig::default_min_players")]
    pub min_players: usize,
}

impl BoardConfig {
    const fn default_loop_length() -> usize {
        DEFAULT_LOOP_LENGTH
    }

    fn default_weights() -> BTreeMap<SpaceType, u32> {
        BTreeMap::from([
            (SpaceType::Trivia, 3),
            (SpaceType::Chance, 2),
            (SpaceType::MusicBingo, 2),
            (SpaceType::InstantPrize, 1),
            (SpaceType::RandomWheel, 1),
            (SpaceType::Cheers, 2),
            (SpaceType::DrinkSips, 2),
            (SpaceType::GiveSips, 2),
        ])
    }

    const fn default_sips_min() -> u8 {
        DEFAULT_SIPS_MIN
    }

    const fn default_sips_max() -> u8 {
        DEFAULT_SIPS_MAX
    }

    const fn default_min_players() -> usize {
        DEFAULT_MIN_PLAYERS
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or violates an invariant.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.loop_length < 2 {
            return Err(ConfigError::LoopTooShort {
                min: 2,
                value: self.loop_length,
            });
        }
        for (&kind, &weight) in &self.weights {
            if kind.is_start() && weight > 0 {
                return Err(ConfigError::ReservedSpaceType(kind));
            }
        }
        if self.weights.values().all(|&w| w == 0) {
            return Err(ConfigError::NoWeightedSpaces);
        }
        if self.sips_min == 0 {
            return Err(ConfigError::ZeroSips);
        }
        if self.sips_min > self.sips_max {
            return Err(ConfigError::SipsRange {
                min: self.sips_min,
                max: self.sips_max,
            });
        }
        if self.min_players == 0 {
            return Err(ConfigError::MinPlayers(self.min_players));
        }
        Ok(())
    }

    #[must_use]
    pub const fn sips_range(&self) -> RangeInclusive<u8> {
        self.sips_min..=self.sips_max
    }

    /// One cycle of space types, each repeated by its weight.
    #[must_use]
    pub fn weighted_cycle(&self) -> Vec<SpaceType> {
        self.weights
            .iter()
            .filter(|(kind, _)| !kind.is_start())
            .flat_map(|(&kind, &weight)| std::iter::repeat_n(kind, weight as usize))
            .collect()
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            loop_length: Self::default_loop_length(),
            weights: Self::default_weights(),
            sips_min: Self::default_sips_min(),
            sips_max: Self::default_sips_max(),
            min_players: Self::default_min_players(),
        }
    }
}
