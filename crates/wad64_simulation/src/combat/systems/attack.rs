//! Attack execution systems (enemy melee, player hitscan).

use bevy::prelude::*;
use crate::ai::{AIState, BehaviorFsm};
use crate::ai::systems::{resolve_target, TargetQuery};
use crate::clock::SimClock;
use crate::combat::{AttackExecutor, DamageRequest, Dead, HitscanFired};
use crate::components::{CollisionLayers, KinematicBody, TrackedTarget};
use crate::physics::{SpatialIndex, SpatialQuery};

/// Система: AI attack execution
///
/// Только в Attack state. AttackExecutor сам перепроверяет cooldown,
/// дистанцию и line of sight. Успех → DamageRequest.
pub fn ai_attack_execution(
    clock: Res<SimClock>,
    spatial: Res<SpatialIndex>,
    mut attackers: Query<
        (Entity, &BehaviorFsm, &KinematicBody, &TrackedTarget, &mut AttackExecutor),
        Without<Dead>,
    >,
    targets: TargetQuery,
    mut requests: EventWriter<DamageRequest>,
) {
    let now = clock.now;

    for (entity, fsm, body, handle, mut attack) in attackers.iter_mut() {
        if fsm.state() != AIState::Attack {
            continue;
        }

        let Some(target_entity) = handle.entity() else {
            continue;
        };
        let target = resolve_target(&targets, handle);
        let line_of_sight = target.is_some_and(|t| spatial.line_of_sight(body.position, t));

        if attack.try_attack(now, body.position, target, line_of_sight) {
            crate::log(&format!(
                "⚔️ AI: {:?} attacks {:?} ({} damage)",
                entity, target_entity, attack.damage
            ));
            requests.write(DamageRequest {
                source: Some(entity),
                target: target_entity,
                amount: attack.damage,
            });
        }
    }
}

/// Система: hitscan выстрелы → DamageRequest
///
/// Луч по ENEMY | OBSTACLE: стена перекрывает врага за ней.
pub fn resolve_hitscan(
    spatial: Res<SpatialIndex>,
    mut shots: EventReader<HitscanFired>,
    mut requests: EventWriter<DamageRequest>,
) {
    let mask = CollisionLayers::ENEMY | CollisionLayers::OBSTACLE;

    for shot in shots.read() {
        let Some(hit) = spatial.raycast(shot.origin, shot.direction, shot.range, mask) else {
            continue;
        };

        if hit.entity == shot.shooter {
            continue;
        }
        if !hit.layers.intersects(CollisionLayers::ENEMY) {
            crate::log(&format!(
                "🔫 Hitscan: {:?} blocked by {} {:?} at {:.2}m",
                shot.shooter,
                hit.layers.name(),
                hit.entity,
                hit.distance
            ));
            continue;
        }

        crate::log(&format!(
            "🔫 Hitscan: {:?} hit {:?} at {:.2}m",
            shot.shooter, hit.entity, hit.distance
        ));
        requests.write(DamageRequest {
            source: Some(shot.shooter),
            target: hit.entity,
            amount: shot.damage,
        });
    }
}
