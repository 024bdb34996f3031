//! Movement компоненты: кинематика, параметры steering, патрульный маршрут, команды

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Команда движения для врага (пишет FSM, исполняет MovementDriver)
///
/// Архитектура:
/// - ai_fsm_tick пишет MovementCommand (high-level intent)
/// - execute_movement_commands конвертирует в steering через MovementDriver
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub enum MovementCommand {
    /// Ничего не делать: скорость плавно затухает
    Idle,
    /// Остановиться немедленно (сбросить горизонтальную velocity)
    Stop,
    /// Двигаться к позиции (world coordinates)
    MoveToPosition { target: Vec3 },
    /// Стоять и поворачиваться к точке (attack stance)
    FaceTowards { target: Vec3 },
    /// Идти по PatrolRoute
    Patrol,
}

impl Default for MovementCommand {
    fn default() -> Self {
        Self::Idle
    }
}

/// Кинематическое состояние entity
///
/// Владелец: сам entity. Мутируется только MovementDriver'ом,
/// заморожено после смерти (Dead marker).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct KinematicBody {
    pub position: Vec3,
    /// Горизонтальное направление взгляда (normalized, y = 0)
    pub forward: Vec3,
    /// Горизонтальная скорость (m/s)
    pub velocity: Vec3,
    /// Вертикальная скорость (gravity интегрируется отдельно)
    pub vertical_velocity: f32,
    pub grounded: bool,
}

impl Default for KinematicBody {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}

impl KinematicBody {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            forward: Vec3::NEG_Z,
            velocity: Vec3::ZERO,
            vertical_velocity: 0.0,
            grounded: true,
        }
    }

    pub fn facing(mut self, forward: Vec3) -> Self {
        let flat = Vec3::new(forward.x, 0.0, forward.z);
        if let Some(dir) = flat.try_normalize() {
            self.forward = dir;
        }
        self
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Параметры steering
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct MovementConfig {
    /// Максимальная скорость (m/s)
    pub speed: f32,
    /// Линейное ускорение (m/s²): плавные старт/стоп
    pub acceleration: f32,
    /// Скорость поворота (rad/s)
    pub turn_rate: f32,
    /// Длина forward-пробы на препятствия (m)
    pub obstacle_probe_distance: f32,
    /// Угол отклонения при обходе (rad)
    pub avoidance_angle: f32,
    /// Дистанция "дошли до waypoint" (m, горизонтально)
    pub waypoint_reach_distance: f32,
    /// Гравитация (m/s², отрицательная)
    pub gravity: f32,
    /// Высота пола
    pub ground_height: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            speed: 3.5,
            acceleration: 12.0,
            turn_rate: std::f32::consts::TAU, // 360°/s
            obstacle_probe_distance: 1.5,
            avoidance_angle: std::f32::consts::FRAC_PI_4, // 45°
            waypoint_reach_distance: 0.5,
            gravity: -9.81,
            ground_height: 0.0,
        }
    }
}

/// Патрульный маршрут (упорядоченные waypoints + cursor)
///
/// Владелец: MovementDriver, cursor двигается только через `advance`.
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct PatrolRoute {
    pub waypoints: Vec<Vec3>,
    pub cursor: usize,
    /// true: после последней точки возвращаемся к первой
    pub looping: bool,
    /// Non-loop маршрут пройден до конца
    pub finished: bool,
}

impl PatrolRoute {
    pub fn new(waypoints: Vec<Vec3>, looping: bool) -> Self {
        Self {
            waypoints,
            cursor: 0,
            looping,
            finished: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Текущая цель (None если маршрут пуст или пройден)
    pub fn current(&self) -> Option<Vec3> {
        if self.finished {
            return None;
        }
        self.waypoints.get(self.cursor).copied()
    }

    /// Переход к следующему waypoint. Возвращает новую цель.
    pub fn advance(&mut self) -> Option<Vec3> {
        if self.waypoints.is_empty() || self.finished {
            return None;
        }

        let next = self.cursor + 1;
        if next < self.waypoints.len() {
            self.cursor = next;
        } else if self.looping {
            self.cursor = 0;
        } else {
            self.finished = true;
        }

        self.current()
    }

    /// Сброс маршрута на первую точку
    pub fn restart(&mut self) {
        self.cursor = 0;
        self.finished = false;
    }
}
