//! AttackExecutor: cooldown + animation duration + range/LOS re-validation
//!
//! FSM решает "пора атаковать", AttackExecutor независимо перепроверяет
//! дистанцию (FSM check может отставать на тик) и cooldown.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use crate::ai::AIConfig;

/// Параметры атаки (tuning)
///
/// Дистанции здесь нет: радиус атаки один на архетип, `AIConfig::attack_range`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackConfig {
    pub damage: u32,
    /// Секунды между началами атак
    pub cooldown: f32,
    /// Длительность анимации атаки (новая атака не начнётся раньше)
    pub attack_duration: f32,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            damage: 10,
            cooldown: 1.5,
            attack_duration: 0.5,
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AttackExecutor {
    pub damage: u32,
    pub cooldown: f32,
    pub attack_duration: f32,
    pub range: f32,
    /// None: "ready" sentinel (сразу можно атаковать)
    last_attack_time: Option<f32>,
    /// Атака "в процессе" до этого момента
    busy_until: f32,
}

impl Default for AttackExecutor {
    fn default() -> Self {
        Self::from_config(&AttackConfig::default(), AIConfig::default().attack_range)
    }
}

impl AttackExecutor {
    /// `range` берётся из `AIConfig::attack_range` того же врага
    pub fn from_config(config: &AttackConfig, range: f32) -> Self {
        Self {
            damage: config.damage,
            cooldown: config.cooldown,
            attack_duration: config.attack_duration,
            range,
            last_attack_time: None,
            busy_until: f32::NEG_INFINITY,
        }
    }

    pub fn last_attack_time(&self) -> Option<f32> {
        self.last_attack_time
    }

    /// Сброс cooldown на "ready" (вход в Attack)
    pub fn reset_ready(&mut self) {
        self.last_attack_time = None;
    }

    pub fn is_cooling_down(&self, now: f32) -> bool {
        self.last_attack_time
            .map(|last| now - last < self.cooldown)
            .unwrap_or(false)
    }

    pub fn is_in_progress(&self, now: f32) -> bool {
        now < self.busy_until
    }

    /// Попытка атаки. true: атака началась, урон применяет вызывающий.
    pub fn try_attack(
        &mut self,
        now: f32,
        origin: Vec3,
        target: Option<Vec3>,
        line_of_sight: bool,
    ) -> bool {
        if self.is_cooling_down(now) || self.is_in_progress(now) {
            return false;
        }

        let Some(target) = target else {
            return false;
        };

        if origin.distance(target) > self.range || !line_of_sight {
            return false;
        }

        self.last_attack_time = Some(now);
        self.busy_until = now + self.attack_duration;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_range() -> Option<Vec3> {
        Some(Vec3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_first_attack_is_immediate() {
        let mut attack = AttackExecutor::default();
        assert!(attack.try_attack(0.0, Vec3::ZERO, in_range(), true));
        assert_eq!(attack.last_attack_time(), Some(0.0));
    }

    #[test]
    fn test_cooldown_gates_regardless_of_range() {
        let mut attack = AttackExecutor::default();
        assert!(attack.try_attack(0.0, Vec3::ZERO, in_range(), true));

        for now in [0.6, 1.0, 1.49] {
            assert!(!attack.try_attack(now, Vec3::ZERO, in_range(), true), "now = {}", now);
            assert!(!attack.try_attack(now, Vec3::ZERO, Some(Vec3::ZERO), true));
        }

        assert!(attack.try_attack(1.5, Vec3::ZERO, in_range(), true));
    }

    #[test]
    fn test_duration_blocks_even_after_cooldown() {
        let mut attack = AttackExecutor::from_config(&AttackConfig {
            cooldown: 0.2,
            attack_duration: 1.0,
            ..default()
        }, 2.0);

        assert!(attack.try_attack(0.0, Vec3::ZERO, in_range(), true));
        assert!(!attack.is_cooling_down(0.5));
        assert!(attack.is_in_progress(0.5));
        assert!(!attack.try_attack(0.5, Vec3::ZERO, in_range(), true));
        assert!(attack.try_attack(1.0, Vec3::ZERO, in_range(), true));
    }

    #[test]
    fn test_range_and_line_of_sight_revalidated() {
        let mut attack = AttackExecutor::default();

        assert!(!attack.try_attack(0.0, Vec3::ZERO, Some(Vec3::new(0.0, 0.0, -2.5)), true));
        assert!(!attack.try_attack(0.0, Vec3::ZERO, in_range(), false));
        assert!(!attack.try_attack(0.0, Vec3::ZERO, None, true));

        // Неудачные попытки не трогают cooldown
        assert_eq!(attack.last_attack_time(), None);
    }

    #[test]
    fn test_reset_ready_clears_cooldown() {
        let mut attack = AttackExecutor::from_config(&AttackConfig {
            attack_duration: 0.0,
            ..default()
        }, 2.0);

        assert!(attack.try_attack(0.0, Vec3::ZERO, in_range(), true));
        assert!(attack.is_cooling_down(0.1));

        attack.reset_ready();
        assert!(!attack.is_cooling_down(0.1));
        assert!(attack.try_attack(0.1, Vec3::ZERO, in_range(), true));
    }
}
