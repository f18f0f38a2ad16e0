//! Game configuration.
//!
//! `GameConfig` carries the knobs the server needs at table creation:
//! seed, dealing, table size, suspension timeouts and the campfire bonus.
//! It deserializes with defaults for every missing field, so a deployment
//! can override only what it cares about:
//!
//! ```
//! use wildtrail::core::GameConfig;
//!
//! let config: GameConfig = serde_json::from_str(r#"{ "seed": 9 }"#).unwrap();
//! assert_eq!(config.seed, 9);
//! assert_eq!(config.starting_hand_size, GameConfig::default().starting_hand_size);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Complete table configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// RNG seed for dealing and all in-game randomness.
    pub seed: u64,

    /// Cards dealt to each player before disasters are shuffled in.
    pub starting_hand_size: usize,

    /// Fewest seats a game may start with.
    pub min_players: usize,

    /// Most seats a game may start with.
    pub max_players: usize,

    /// How long an attacker may take to choose a victim.
    pub pre_attack_timeout_ms: u64,

    /// How long a victim may take to answer a defense request.
    pub defense_timeout_ms: u64,

    /// Score each active player gains from a Flint + Tinder campfire.
    pub campfire_bonus: i64,

    /// Capacity of the server's notification broadcast channel.
    pub channel_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            starting_hand_size: 5,
            min_players: 2,
            max_players: 8,
            pre_attack_timeout_ms: 30_000,
            defense_timeout_ms: 15_000,
            campfire_bonus: 2,
            channel_capacity: 256,
        }
    }
}

impl GameConfig {
    /// Default configuration with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Set the starting hand size.
    #[must_use]
    pub fn with_starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }

    /// Set the allowed table size.
    #[must_use]
    pub fn with_player_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    /// Set the victim selection timeout.
    #[must_use]
    pub fn with_pre_attack_timeout(mut self, timeout: Duration) -> Self {
        self.pre_attack_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Set the defense reply timeout.
    #[must_use]
    pub fn with_defense_timeout(mut self, timeout: Duration) -> Self {
        self.defense_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Set the campfire bonus.
    #[must_use]
    pub fn with_campfire_bonus(mut self, bonus: i64) -> Self {
        self.campfire_bonus = bonus;
        self
    }

    /// Victim selection timeout.
    #[must_use]
    pub fn pre_attack_timeout(&self) -> Duration {
        Duration::from_millis(self.pre_attack_timeout_ms)
    }

    /// Defense reply timeout.
    #[must_use]
    pub fn defense_timeout(&self) -> Duration {
        Duration::from_millis(self.defense_timeout_ms)
    }

    /// Check the configuration against a table of `player_count` seats.
    pub fn validate(&self, player_count: usize) -> Result<(), EngineError> {
        if self.min_players < 2 {
            return Err(EngineError::InvalidConfig(
                "a game needs at least 2 players".to_string(),
            ));
        }
        if self.max_players > 255 || self.min_players > self.max_players {
            return Err(EngineError::InvalidConfig(format!(
                "player bounds {}..={} are not usable",
                self.min_players, self.max_players
            )));
        }
        if !(self.min_players..=self.max_players).contains(&player_count) {
            return Err(EngineError::InvalidConfig(format!(
                "{} players is outside {}..={}",
                player_count, self.min_players, self.max_players
            )));
        }
        if self.channel_capacity == 0 {
            return Err(EngineError::InvalidConfig(
                "channel capacity must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = GameConfig::new(5)
            .with_starting_hand_size(3)
            .with_player_bounds(2, 4)
            .with_pre_attack_timeout(Duration::from_secs(2))
            .with_defense_timeout(Duration::from_millis(500))
            .with_campfire_bonus(7);

        assert_eq!(config.seed, 5);
        assert_eq!(config.starting_hand_size, 3);
        assert_eq!(config.pre_attack_timeout(), Duration::from_secs(2));
        assert_eq!(config.defense_timeout(), Duration::from_millis(500));
        assert_eq!(config.campfire_bonus, 7);
    }

    #[test]
    fn test_validate_player_count() {
        let config = GameConfig::default();

        assert!(config.validate(2).is_ok());
        assert!(config.validate(8).is_ok());
        assert!(matches!(config.validate(1), Err(EngineError::InvalidConfig(_))));
        assert!(matches!(config.validate(9), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_bounds() {
        let config = GameConfig::default().with_player_bounds(5, 3);
        assert!(config.validate(4).is_err());

        let config = GameConfig::default().with_player_bounds(1, 3);
        assert!(config.validate(2).is_err());
    }

    #[test]
    fn test_partial_deserialize() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "seed": 3, "campfire_bonus": 5 }"#).unwrap();

        assert_eq!(config.seed, 3);
        assert_eq!(config.campfire_bonus, 5);
        assert_eq!(config.max_players, 8);
    }
}
