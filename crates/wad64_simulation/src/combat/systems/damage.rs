//! Damage application and death systems.

use bevy::prelude::*;
use crate::ai::{AIState, AIStateChanged, BehaviorFsm};
use crate::clock::SimClock;
use crate::combat::{CorpseDelay, DamageDealt, DamageRequest, Dead, DespawnAfter, EntityDied};
use crate::components::{Health, KinematicBody, MovementCommand};

/// Система: DamageRequest → Health
///
/// EntityDied пишется ровно на том запросе, который довёл health до 0.
pub fn apply_damage(
    mut requests: EventReader<DamageRequest>,
    mut targets: Query<&mut Health>,
    mut damage_dealt_events: EventWriter<DamageDealt>,
    mut entity_died_events: EventWriter<EntityDied>,
) {
    for request in requests.read() {
        let Ok(mut health) = targets.get_mut(request.target) else {
            crate::log_warning(&format!(
                "DamageRequest: target {:?} has no Health component",
                request.target
            ));
            continue;
        };

        let before = health.current;
        let died = health.take_damage(request.amount);
        if !died && before == health.current {
            // Урон 0 или target уже мёртв: no-op
            continue;
        }

        damage_dealt_events.write(DamageDealt {
            source: request.source,
            target: request.target,
            amount: before - health.current,
            remaining_health: health.current,
            target_died: died,
        });

        if !died {
            crate::log(&format!(
                "{:?} took {} damage ({:.0}% health left)",
                request.target,
                before - health.current,
                health.fraction() * 100.0
            ));
        }

        if died {
            crate::log_info(&format!(
                "💀 {:?} died (killer: {:?})",
                request.target, request.source
            ));
            entity_died_events.write(EntityDied {
                entity: request.target,
                killer: request.source,
            });
        }
    }
}

/// Система: EntityDied → Dead (external transition)
///
/// Перебивает любой переход, закоммиченный ранее в этом тике.
/// Entry actions Dead: стоп движения, Dead marker, DespawnAfter по CorpseDelay.
pub fn handle_entity_died(
    mut commands: Commands,
    clock: Res<SimClock>,
    mut death_events: EventReader<EntityDied>,
    mut actors: Query<(
        Option<&mut BehaviorFsm>,
        Option<&mut MovementCommand>,
        Option<&mut KinematicBody>,
        Option<&CorpseDelay>,
    )>,
    mut state_events: EventWriter<AIStateChanged>,
) {
    let now = clock.now;

    for event in death_events.read() {
        let Ok((fsm, command, body, corpse_delay)) = actors.get_mut(event.entity) else {
            continue;
        };

        if let Some(mut command) = command {
            *command = MovementCommand::Stop;
        }
        if let Some(mut body) = body {
            body.velocity = Vec3::ZERO;
            body.vertical_velocity = 0.0;
        }

        let Ok(mut entity_commands) = commands.get_entity(event.entity) else {
            continue;
        };
        entity_commands.insert(Dead);

        if let Some(CorpseDelay(Some(delay))) = corpse_delay.copied() {
            entity_commands.insert(DespawnAfter {
                despawn_time: now + delay,
            });
        }

        if let Some(mut fsm) = fsm {
            if let Some(transition) = fsm.transition_to(AIState::Dead, now) {
                crate::log_info(&format!(
                    "AI: {:?} {} → Dead",
                    event.entity,
                    transition.from.name()
                ));
                state_events.write(AIStateChanged {
                    entity: event.entity,
                    from: transition.from,
                    to: transition.to,
                });
            }
        }
    }
}

/// Система: деспавн entities с истёкшим DespawnAfter
pub fn despawn_after_timeout(
    mut commands: Commands,
    clock: Res<SimClock>,
    query: Query<(Entity, &DespawnAfter)>,
) {
    for (entity, despawn_after) in query.iter() {
        if clock.now >= despawn_after.despawn_time {
            crate::log(&format!("⚰️ Despawning entity {:?} (corpse timeout)", entity));
            commands.entity(entity).despawn();
        }
    }
}
