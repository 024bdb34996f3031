//! Damage события и death-маркеры
//!
//! Поток: DamageRequest → apply_damage → Health::take_damage →
//! DamageDealt (+ EntityDied на тике смерти) → handle_entity_died

use bevy::prelude::*;

/// Событие: запрос на урон (от AttackExecutor, hitscan, окружения)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageRequest {
    /// Кто наносит (None: окружение)
    pub source: Option<Entity>,
    pub target: Entity,
    pub amount: u32,
}

/// Событие: урон нанесён
///
/// Генерируется после применения damage к Health.
/// Используется для UI, звуков, эффектов.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageDealt {
    pub source: Option<Entity>,
    pub target: Entity,
    pub amount: u32,
    pub remaining_health: u32,
    pub target_died: bool,
}

/// Событие: entity умер (health > 0 → 0, ровно один раз за жизнь)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Событие: hitscan выстрел игрока
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HitscanFired {
    pub shooter: Entity,
    pub origin: Vec3,
    pub direction: Vec3,
    pub range: f32,
    pub damage: u32,
}

/// Компонент-маркер: entity мертв
///
/// Движение и AI для таких entity не выполняются.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Dead;

/// Сколько труп лежит до деспавна (None: остаётся навсегда)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CorpseDelay(pub Option<f32>);

impl Default for CorpseDelay {
    fn default() -> Self {
        Self(Some(5.0))
    }
}

/// Компонент-маркер: деспавн entity после указанного времени
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct DespawnAfter {
    /// SimClock.now, после которого entity удаляется
    pub despawn_time: f32,
}
