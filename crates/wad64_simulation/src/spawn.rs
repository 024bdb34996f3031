//! Spawn helpers: готовые наборы компонентов врага/игрока/препятствия
//!
//! Все collaborator handles передаются явно (цель: через TrackedTarget).

use bevy::prelude::*;
use crate::ai::{BehaviorFsm, DetectionGate};
use crate::combat::{AttackExecutor, CorpseDelay};
use crate::components::{
    Enemy, Health, KinematicBody, MovementCommand, PatrolRoute, Player, SpatialBody,
    TrackedTarget,
};
use crate::config::EnemyTuning;

/// Spawn врага (Patrol, health = max)
pub fn spawn_enemy(
    commands: &mut Commands,
    tuning: &EnemyTuning,
    position: Vec3,
    route: PatrolRoute,
    target: Option<Entity>,
) -> Entity {
    commands
        .spawn((
            Enemy,
            Transform::from_translation(position),
            KinematicBody::at(position),
            Health::new(tuning.max_health),
            SpatialBody::enemy(),
            // AI
            BehaviorFsm::default(),
            DetectionGate::default(),
            tuning.ai,
            TrackedTarget(target),
            // Movement
            tuning.movement,
            route,
            MovementCommand::Patrol,
            // Combat
            AttackExecutor::from_config(&tuning.attack, tuning.ai.attack_range),
            CorpseDelay(tuning.corpse_delay),
        ))
        .id()
}

/// Spawn игрока (цель для врагов)
pub fn spawn_player(commands: &mut Commands, position: Vec3, max_health: u32) -> Entity {
    commands
        .spawn((
            Player,
            Transform::from_translation(position),
            Health::new(max_health),
            SpatialBody::player(),
        ))
        .id()
}

/// Spawn статического препятствия (сфера)
pub fn spawn_obstacle(commands: &mut Commands, position: Vec3, radius: f32) -> Entity {
    commands
        .spawn((Transform::from_translation(position), SpatialBody::obstacle(radius)))
        .id()
}
