//! FSM AI components (state machine, config, transition rules).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use crate::components::{CollisionLayers, MovementCommand};

/// Множитель attack_range для выхода Attack → Aggro
///
/// Attack держится пока distance ≤ attack_range × ATTACK_EXIT_MULTIPLIER.
pub const ATTACK_EXIT_MULTIPLIER: f32 = 1.5;

/// AI FSM состояния
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
pub enum AIState {
    /// Patrol: идём по waypoints, ищем цель
    #[default]
    Patrol,

    /// Aggro: цель обнаружена, сближаемся
    Aggro,

    /// Attack: цель в радиусе атаки
    Attack,

    /// Dead: terminal, выходов нет
    Dead,
}

impl AIState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AIState::Dead)
    }

    pub fn name(&self) -> &'static str {
        match self {
            AIState::Patrol => "Patrol",
            AIState::Aggro => "Aggro",
            AIState::Attack => "Attack",
            AIState::Dead => "Dead",
        }
    }
}

/// Параметры AI
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct AIConfig {
    /// Радиус обнаружения в Patrol ("acquire")
    pub detection_radius: f32,
    /// Радиус потери цели в Aggro/Attack ("keep"), > detection_radius
    pub aggro_lose_distance: f32,
    /// Радиус атаки
    pub attack_range: f32,
    /// Буфер выхода из Attack (см. ATTACK_EXIT_MULTIPLIER)
    pub attack_exit_multiplier: f32,
    /// Период пересчёта detection (секунды)
    pub detection_interval: f32,
    /// Слой цели для broad-phase overlap
    pub target_layer: CollisionLayers,
}

impl Default for AIConfig {
    fn default() -> Self {
        Self {
            detection_radius: 10.0,
            aggro_lose_distance: 15.0,
            attack_range: 2.0,
            attack_exit_multiplier: ATTACK_EXIT_MULTIPLIER,
            detection_interval: 0.2,
            target_layer: CollisionLayers::PLAYER,
        }
    }
}

impl AIConfig {
    /// Граница Attack/Aggro
    pub fn attack_exit_distance(&self) -> f32 {
        self.attack_range * self.attack_exit_multiplier
    }
}

/// Входные данные одного тика FSM
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FsmInput {
    /// Позиция цели (None: цель недоступна)
    pub target: Option<Vec3>,
    /// Distance до цели (None: цель недоступна)
    pub distance: Option<f32>,
    /// Результат DetectionGate
    pub detected: bool,
}

impl FsmInput {
    pub fn new(position: Vec3, target: Option<Vec3>, detected: bool) -> Self {
        Self {
            target,
            distance: target.map(|t| position.distance(t)),
            detected: detected && target.is_some(),
        }
    }

    /// Для тестов и host'ов, которые считают distance сами
    pub fn at_distance(distance: f32, detected: bool) -> Self {
        Self {
            target: Some(Vec3::new(0.0, 0.0, -distance)),
            distance: Some(distance),
            detected,
        }
    }

    pub fn no_target() -> Self {
        Self {
            target: None,
            distance: None,
            detected: false,
        }
    }
}

/// Закоммиченный переход (old ≠ new)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: AIState,
    pub to: AIState,
}

/// Behavior FSM: владеет текущим AIState
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct BehaviorFsm {
    state: AIState,
    /// SimClock.now момента входа в state
    entered_at: f32,
}

impl BehaviorFsm {
    pub fn new(state: AIState) -> Self {
        Self {
            state,
            entered_at: 0.0,
        }
    }

    pub fn state(&self) -> AIState {
        self.state
    }

    pub fn entered_at(&self) -> f32 {
        self.entered_at
    }

    pub fn is_dead(&self) -> bool {
        self.state.is_terminal()
    }

    /// Запрос перехода
    ///
    /// None если next == текущему (idempotent) или текущий Dead (terminal).
    pub fn transition_to(&mut self, next: AIState, now: f32) -> Option<StateTransition> {
        if self.state == next || self.state.is_terminal() {
            return None;
        }

        let transition = StateTransition {
            from: self.state,
            to: next,
        };
        self.state = next;
        self.entered_at = now;
        Some(transition)
    }

    /// Правила переходов (pure)
    pub fn decide(&self, input: &FsmInput, config: &AIConfig) -> AIState {
        match self.state {
            AIState::Dead => AIState::Dead,

            AIState::Patrol => match input.distance {
                Some(distance) if input.detected && distance <= config.detection_radius => {
                    AIState::Aggro
                }
                _ => AIState::Patrol,
            },

            AIState::Aggro => match input.distance {
                None => AIState::Patrol,
                Some(_) if !input.detected => AIState::Patrol,
                Some(distance) if distance > config.aggro_lose_distance => AIState::Patrol,
                Some(distance) if distance <= config.attack_range => AIState::Attack,
                Some(_) => AIState::Aggro,
            },

            // Выход из Attack только через Aggro: Aggro сам решит про Patrol
            AIState::Attack => match input.distance {
                None => AIState::Aggro,
                Some(_) if !input.detected => AIState::Aggro,
                Some(distance) if distance > config.attack_exit_distance() => AIState::Aggro,
                Some(_) => AIState::Attack,
            },
        }
    }

    /// Update текущего state → команда для MovementDriver
    pub fn action(&self, input: &FsmInput, config: &AIConfig) -> MovementCommand {
        match (self.state, input.target, input.distance) {
            (AIState::Dead, _, _) => MovementCommand::Stop,
            (AIState::Patrol, _, _) => MovementCommand::Patrol,
            (AIState::Aggro, Some(target), _) => MovementCommand::MoveToPosition { target },
            (AIState::Attack, Some(target), Some(distance)) if distance <= config.attack_range => {
                MovementCommand::FaceTowards { target }
            }
            // В буфере attack_range..exit: продолжаем догонять
            (AIState::Attack, Some(target), _) => MovementCommand::MoveToPosition { target },
            // Цели нет: стоим (decide уведёт к Patrol)
            (AIState::Aggro | AIState::Attack, None, _) => MovementCommand::Stop,
        }
    }
}
