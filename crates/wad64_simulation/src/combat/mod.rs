//! Combat system module
//!
//! ECS ответственность:
//! - Game state: Health, AttackExecutor (cooldown/duration)
//! - Combat rules: range + line of sight re-validation, hitscan
//! - Events: DamageRequest, DamageDealt, EntityDied, HitscanFired

use bevy::prelude::*;

pub mod attacker;
pub mod damage;
pub mod systems;

// Re-export основных типов
pub use attacker::{AttackConfig, AttackExecutor};
pub use damage::{
    CorpseDelay, DamageDealt, DamageRequest, Dead, DespawnAfter, EntityDied, HitscanFired,
};

use crate::SimulationSet;

/// Combat Plugin
///
/// Порядок выполнения (SimulationSet::Combat, затем SimulationSet::Death):
/// 1. ai_attack_execution: AttackExecutor → DamageRequest
/// 2. resolve_hitscan: HitscanFired → DamageRequest
/// 3. apply_damage: DamageRequest → Health → DamageDealt/EntityDied
/// 4. handle_entity_died: EntityDied → Dead (в тот же тик)
/// 5. despawn_after_timeout: уборка трупов
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<DamageRequest>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_event::<HitscanFired>();

        app.add_systems(
            FixedUpdate,
            (
                systems::ai_attack_execution,
                systems::resolve_hitscan,
                systems::apply_damage,
                systems::handle_entity_died,
            )
                .chain()
                .in_set(SimulationSet::Combat),
        );

        app.add_systems(
            FixedUpdate,
            systems::despawn_after_timeout.in_set(SimulationSet::Death),
        );
    }
}
