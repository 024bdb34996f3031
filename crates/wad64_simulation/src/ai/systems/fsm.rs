//! FSM AI systems (detection refresh, transitions, movement intent).

use bevy::prelude::*;
use crate::ai::{AIConfig, AIState, AIStateChanged, BehaviorFsm, DetectionGate, FsmInput};
use crate::clock::SimClock;
use crate::combat::{AttackExecutor, Dead};
use crate::components::{Health, KinematicBody, MovementCommand, TrackedTarget};
use crate::physics::SpatialIndex;

/// Query для чтения позиций целей (мёртвая цель = недоступная)
pub type TargetQuery<'w, 's> = Query<'w, 's, (&'static Transform, Option<&'static Health>)>;

/// Позиция цели или None если цели нет, она despawned или мертва
pub fn resolve_target(targets: &TargetQuery, handle: &TrackedTarget) -> Option<Vec3> {
    let entity = handle.entity()?;
    let (transform, health) = targets.get(entity).ok()?;

    if health.is_some_and(|h| h.is_dead()) {
        return None;
    }
    Some(transform.translation)
}

/// Система: один тик BehaviorFsm
///
/// Порядок внутри тика:
/// 1. DetectionGate (rate-limited)
/// 2. decide → transition_to
/// 3. entry actions (Attack: cooldown → ready)
/// 4. AIStateChanged (после bookkeeping)
/// 5. MovementCommand из update нового state
///
/// Dead сюда не попадает: переход в Dead только через EntityDied (handle_entity_died).
pub fn ai_fsm_tick(
    clock: Res<SimClock>,
    spatial: Res<SpatialIndex>,
    mut enemies: Query<
        (
            Entity,
            &mut BehaviorFsm,
            &mut DetectionGate,
            &mut AttackExecutor,
            &mut MovementCommand,
            &KinematicBody,
            &AIConfig,
            &TrackedTarget,
        ),
        Without<Dead>,
    >,
    targets: TargetQuery,
    mut state_events: EventWriter<AIStateChanged>,
) {
    let now = clock.now;

    for (entity, mut fsm, mut gate, mut attack, mut command, body, config, handle) in
        enemies.iter_mut()
    {
        if fsm.is_dead() {
            continue;
        }

        let target = resolve_target(&targets, handle);
        let detected = gate.evaluate(now, body.position, target, fsm.state(), config, &*spatial);
        let input = FsmInput::new(body.position, target, detected);

        let next = fsm.decide(&input, config);
        if let Some(transition) = fsm.transition_to(next, now) {
            if transition.to == AIState::Attack {
                attack.reset_ready();
            }

            crate::log(&format!(
                "AI: {:?} {} → {} (distance: {:?})",
                entity,
                transition.from.name(),
                transition.to.name(),
                input.distance
            ));

            state_events.write(AIStateChanged {
                entity,
                from: transition.from,
                to: transition.to,
            });
        }

        let new_command = fsm.action(&input, config);
        // Не трогаем компонент без нужды: иначе Changed<MovementCommand> спамит
        if *command != new_command {
            *command = new_command;
        }
    }
}
