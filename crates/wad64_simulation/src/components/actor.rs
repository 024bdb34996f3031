//! Базовые компоненты акторов: Enemy, Player, Health, TrackedTarget

use bevy::prelude::*;

/// Враг под управлением BehaviorFsm
///
/// Автоматически добавляет Health, KinematicBody и Transform через Required Components.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Health, crate::components::KinematicBody, Transform)]
pub struct Enemy;

/// Игрок: цель, которую отслеживают враги
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Health, Transform)]
pub struct Player;

/// Handle на цель врага (read-only, без владения)
///
/// Цель может пропасть в любой момент (despawn): это "not detected", не ошибка.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct TrackedTarget(pub Option<Entity>);

impl TrackedTarget {
    pub fn new(target: Entity) -> Self {
        Self(Some(target))
    }

    pub fn entity(&self) -> Option<Entity> {
        self.0
    }
}

/// Здоровье актора (HealthTracker)
///
/// Инвариант: 0 ≤ current ≤ max
/// "died" срабатывает ровно один раз за жизнь: на переходе current > 0 → 0.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
    dead: bool,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self {
            current: max,
            max,
            dead: max == 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Доля здоровья 0.0..=1.0 (для UI/скоринга)
    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }

    /// Наносит урон. Возвращает `true` только на тике смерти.
    ///
    /// Урон 0 и урон по мёртвому: no-op.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if self.dead || amount == 0 {
            return false;
        }

        self.current = self.current.saturating_sub(amount);
        if self.current == 0 {
            self.dead = true;
            return true;
        }

        false
    }

    /// Восстановление (respawn/reset). Снимает флаг смерти если health > 0.
    pub fn restore_health(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
        if self.current > 0 {
            self.dead = false;
        }
    }
}
