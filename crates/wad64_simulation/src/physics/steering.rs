//! MovementDriver: steering для врагов
//!
//! Простой закон движения:
//! - горизонтальное направление к цели
//! - обход препятствия ±45° (сначала влево, потом вправо, иначе прямо)
//! - поворот с ограниченной угловой скоростью
//! - velocity разгоняется к `direction × speed` с ограниченным ускорением
//! - gravity интегрируется отдельно от горизонтального steering
//!
//! Left = поворот на +angle вокруг +Y (forward по умолчанию -Z).

use bevy::prelude::*;
use crate::components::{CollisionLayers, KinematicBody, MovementConfig, PatrolRoute};
use crate::physics::SpatialQuery;

/// Ниже этой длины направление считается нулевым
const MIN_DIRECTION_LENGTH: f32 = 1e-4;

/// Что сделал patrol-шаг (для логов и тестов)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PatrolStep {
    /// Идём к waypoint
    Moving { waypoint: Vec3 },
    /// Дошли, cursor переключён
    Advanced { next: Option<Vec3> },
    /// Маршрут пуст или пройден: Stop()
    Stopped,
}

pub struct MovementDriver<'a, Q: SpatialQuery> {
    body: &'a mut KinematicBody,
    config: &'a MovementConfig,
    spatial: &'a Q,
    delta: f32,
}

impl<'a, Q: SpatialQuery> MovementDriver<'a, Q> {
    pub fn new(
        body: &'a mut KinematicBody,
        config: &'a MovementConfig,
        spatial: &'a Q,
        delta: f32,
    ) -> Self {
        Self {
            body,
            config,
            spatial,
            delta: delta.max(0.0),
        }
    }

    /// Двигаться к точке (горизонтально)
    pub fn move_to(&mut self, target: Vec3) {
        let Some(direction) = horizontal_direction(self.body.position, target) else {
            // Стоим на цели: поворот пропускаем, скорость затухает
            self.idle();
            return;
        };

        let direction = self.avoid_obstacles(direction);
        self.turn_towards(direction);
        self.accelerate_towards(direction * self.config.speed);
        self.integrate();
    }

    /// Только поворот к точке (attack stance)
    pub fn face(&mut self, target: Vec3) {
        if let Some(direction) = horizontal_direction(self.body.position, target) {
            self.turn_towards(direction);
        }
    }

    /// Шаг патруля по маршруту
    pub fn patrol(&mut self, route: &mut PatrolRoute) -> PatrolStep {
        let Some(waypoint) = route.current() else {
            self.stop();
            return PatrolStep::Stopped;
        };

        let to_waypoint = Vec3::new(
            waypoint.x - self.body.position.x,
            0.0,
            waypoint.z - self.body.position.z,
        );

        if to_waypoint.length() <= self.config.waypoint_reach_distance {
            let next = route.advance();
            if next.is_none() {
                self.stop();
                return PatrolStep::Stopped;
            }
            return PatrolStep::Advanced { next };
        }

        self.move_to(waypoint);
        PatrolStep::Moving { waypoint }
    }

    /// Мгновенная остановка горизонтального движения
    pub fn stop(&mut self) {
        self.body.velocity = Vec3::ZERO;
    }

    /// Плавное затухание скорости к нулю
    pub fn idle(&mut self) {
        self.accelerate_towards(Vec3::ZERO);
        self.integrate();
    }

    /// Вертикальная интеграция с clamp на пол
    pub fn apply_gravity(&mut self) {
        let ground = self.config.ground_height;

        if self.body.grounded && self.body.position.y <= ground {
            self.body.position.y = ground;
            self.body.vertical_velocity = 0.0;
            return;
        }

        self.body.vertical_velocity += self.config.gravity * self.delta;
        self.body.position.y += self.body.vertical_velocity * self.delta;

        if self.body.position.y <= ground {
            self.body.position.y = ground;
            self.body.vertical_velocity = 0.0;
            self.body.grounded = true;
        } else {
            self.body.grounded = false;
        }
    }

    /// Forward probe → +angle (left), −angle (right), иначе прямо
    fn avoid_obstacles(&self, direction: Vec3) -> Vec3 {
        let probe = self.config.obstacle_probe_distance;
        if probe <= 0.0 || !self.blocked(direction, probe) {
            return direction;
        }

        let angle = self.config.avoidance_angle;
        let left = Quat::from_rotation_y(angle) * direction;
        if !self.blocked(left, probe) {
            return left;
        }

        let right = Quat::from_rotation_y(-angle) * direction;
        if !self.blocked(right, probe) {
            return right;
        }

        direction
    }

    fn blocked(&self, direction: Vec3, distance: f32) -> bool {
        self.spatial
            .probe(self.body.position, direction, distance, CollisionLayers::OBSTACLE)
    }

    fn turn_towards(&mut self, direction: Vec3) {
        let forward = self.body.forward;
        let cross = forward.cross(direction);
        let angle = cross.y.atan2(forward.dot(direction));

        let max_step = self.config.turn_rate * self.delta;
        let step = angle.clamp(-max_step, max_step);

        let turned = Quat::from_rotation_y(step) * forward;
        self.body.forward = Vec3::new(turned.x, 0.0, turned.z)
            .try_normalize()
            .unwrap_or(direction);
    }

    fn accelerate_towards(&mut self, desired: Vec3) {
        let max_delta = self.config.acceleration * self.delta;
        self.body.velocity = approach(self.body.velocity, desired, max_delta);
    }

    fn integrate(&mut self) {
        self.body.position += self.body.velocity * self.delta;
    }
}

/// Горизонтальное направление (y = 0). None для нулевой длины.
pub fn horizontal_direction(from: Vec3, to: Vec3) -> Option<Vec3> {
    let flat = Vec3::new(to.x - from.x, 0.0, to.z - from.z);
    if flat.length() < MIN_DIRECTION_LENGTH {
        return None;
    }
    Some(flat.normalize())
}

/// Сдвиг `current` к `target` не более чем на `max_delta`
fn approach(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= max_delta || distance <= f32::EPSILON {
        return target;
    }
    current + delta / distance * max_delta
}
