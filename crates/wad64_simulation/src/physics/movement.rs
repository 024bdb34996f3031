//! Movement системы: MovementCommand → MovementDriver → KinematicBody → Transform
//!
//! Работают в FixedUpdate (SimulationSet::Movement), после AI.
//! Мёртвые (Dead marker) не двигаются: позиция заморожена.

use bevy::prelude::*;
use crate::clock::SimClock;
use crate::combat::Dead;
use crate::components::{KinematicBody, MovementCommand, MovementConfig, PatrolRoute};
use crate::physics::{MovementDriver, PatrolStep, SpatialIndex};
use crate::SimulationSet;

/// Система: исполнение MovementCommand
///
/// Горизонтальный steering по команде, затем gravity (независимо).
pub fn execute_movement_commands(
    clock: Res<SimClock>,
    spatial: Res<SpatialIndex>,
    mut movers: Query<
        (
            Entity,
            &MovementCommand,
            &mut KinematicBody,
            &MovementConfig,
            Option<&mut PatrolRoute>,
        ),
        Without<Dead>,
    >,
) {
    let delta = clock.delta;

    for (entity, command, mut body, config, route) in movers.iter_mut() {
        let mut driver = MovementDriver::new(&mut body, config, &*spatial, delta);

        match *command {
            MovementCommand::Idle => driver.idle(),
            MovementCommand::Stop => driver.stop(),
            MovementCommand::MoveToPosition { target } => driver.move_to(target),
            MovementCommand::FaceTowards { target } => {
                driver.stop();
                driver.face(target);
            }
            MovementCommand::Patrol => match route {
                Some(mut route) => {
                    if let PatrolStep::Advanced { next } = driver.patrol(&mut route) {
                        crate::log(&format!(
                            "🚩 {:?} reached waypoint, next = {:?} (cursor {})",
                            entity, next, route.cursor
                        ));
                    }
                }
                // Нет маршрута: стоим
                None => driver.stop(),
            },
        }

        driver.apply_gravity();
    }
}

/// Система: KinematicBody → Transform (translation + yaw из forward)
pub fn sync_body_transforms(
    mut bodies: Query<(&KinematicBody, &mut Transform), Changed<KinematicBody>>,
) {
    for (body, mut transform) in bodies.iter_mut() {
        transform.translation = body.position;
        // forward -Z → yaw 0
        let yaw = (-body.forward.x).atan2(-body.forward.z);
        transform.rotation = Quat::from_rotation_y(yaw);
    }
}

/// Movement Plugin
///
/// Порядок: execute_movement_commands → sync_body_transforms
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (execute_movement_commands, sync_body_transforms)
                .chain()
                .in_set(SimulationSet::Movement),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaw_roundtrip() {
        let forward = Vec3::new(1.0, 0.0, 0.0);
        let yaw = (-forward.x).atan2(-forward.z);
        let rotation = Quat::from_rotation_y(yaw);

        // Bevy forward = -Z в local space
        let world_forward = rotation * Vec3::NEG_Z;
        assert!(world_forward.distance(forward) < 1e-5, "{:?}", world_forward);
    }
}
