//! Enemy tuning: один архетип врага (AI + movement + attack + health)
//!
//! Загружается из JSON, все поля опциональны (serde default):
//! ```json
//! { "ai": { "detection_radius": 12.0 }, "max_health": 40, "corpse_delay": null }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::ai::AIConfig;
use crate::combat::AttackConfig;
use crate::components::MovementConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub ai: AIConfig,
    pub movement: MovementConfig,
    pub attack: AttackConfig,
    pub max_health: u32,
    /// Секунды до деспавна трупа (None: труп остаётся)
    pub corpse_delay: Option<f32>,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            ai: AIConfig::default(),
            attack: AttackConfig::default(),
            movement: MovementConfig::default(),
            max_health: 100,
            corpse_delay: Some(5.0),
        }
    }
}

impl EnemyTuning {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ai = &self.ai;

        if !(ai.detection_radius > 0.0) {
            return Err(invalid("ai.detection_radius", "must be positive"));
        }
        if !(ai.aggro_lose_distance > ai.detection_radius) {
            return Err(invalid(
                "ai.aggro_lose_distance",
                format!(
                    "must be greater than detection_radius ({} <= {})",
                    ai.aggro_lose_distance, ai.detection_radius
                ),
            ));
        }
        if !(ai.attack_range > 0.0) {
            return Err(invalid("ai.attack_range", "must be positive"));
        }
        if !(ai.attack_exit_multiplier >= 1.0) {
            return Err(invalid("ai.attack_exit_multiplier", "must be at least 1.0"));
        }
        if !(ai.detection_interval >= 0.0) {
            return Err(invalid("ai.detection_interval", "must not be negative"));
        }

        let movement = &self.movement;
        for (field, value) in [
            ("movement.speed", movement.speed),
            ("movement.acceleration", movement.acceleration),
            ("movement.turn_rate", movement.turn_rate),
            ("movement.obstacle_probe_distance", movement.obstacle_probe_distance),
            ("movement.waypoint_reach_distance", movement.waypoint_reach_distance),
        ] {
            if !(value >= 0.0) {
                return Err(invalid(field, "must not be negative"));
            }
        }

        let attack = &self.attack;
        if !(attack.cooldown >= 0.0) {
            return Err(invalid("attack.cooldown", "must not be negative"));
        }
        if !(attack.attack_duration >= 0.0) {
            return Err(invalid("attack.attack_duration", "must not be negative"));
        }

        if self.max_health == 0 {
            return Err(invalid("max_health", "must be positive"));
        }
        if let Some(delay) = self.corpse_delay {
            if !(delay >= 0.0) {
                return Err(invalid("corpse_delay", "must not be negative"));
            }
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        let tuning = EnemyTuning::default();
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = EnemyTuning::from_json_str(
            r#"{ "ai": { "detection_radius": 12.0, "aggro_lose_distance": 20.0 }, "max_health": 40, "corpse_delay": null }"#,
        )
        .expect("valid tuning");

        assert_eq!(tuning.ai.detection_radius, 12.0);
        assert_eq!(tuning.ai.attack_range, 2.0);
        assert_eq!(tuning.max_health, 40);
        assert_eq!(tuning.corpse_delay, None);
        assert_eq!(tuning.movement, MovementConfig::default());
    }

    #[test]
    fn test_attack_range_is_single_knob() {
        let tuning = EnemyTuning::from_json_str(r#"{ "ai": { "attack_range": 4.0 } }"#)
            .expect("valid tuning");

        assert_eq!(tuning.ai.attack_range, 4.0);
        assert_eq!(tuning.ai.attack_exit_distance(), 6.0);
        assert_eq!(tuning.attack, AttackConfig::default());
    }

    #[test]
    fn test_lose_distance_must_exceed_detection() {
        let err = EnemyTuning::from_json_str(r#"{ "ai": { "aggro_lose_distance": 5.0 } }"#)
            .expect_err("lose < detection");

        assert!(matches!(
            err,
            ConfigError::Invalid { field: "ai.aggro_lose_distance", .. }
        ));
    }

    #[test]
    fn test_malformed_json() {
        let err = EnemyTuning::from_json_str("{ not json").expect_err("parse error");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_health_rejected() {
        let tuning = EnemyTuning {
            max_health: 0,
            ..EnemyTuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::Invalid { field: "max_health", .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = EnemyTuning::from_json_file("/nonexistent/tuning.json").expect_err("io");
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
