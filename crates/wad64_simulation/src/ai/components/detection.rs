//! DetectionGate: rate-limited восприятие цели с гистерезисом
//!
//! Patrol: distance ≤ detection_radius И broad-phase overlap по слою цели.
//! Aggro/Attack: distance ≤ aggro_lose_distance (больший "keep" радиус).
//! Между пересчётами возвращается закэшированный результат.

use bevy::prelude::*;
use crate::ai::components::{AIConfig, AIState};
use crate::physics::SpatialQuery;

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct DetectionGate {
    target_detected: bool,
    /// None: ещё ни разу не считали
    last_check_time: Option<f32>,
}

impl DetectionGate {
    pub fn target_detected(&self) -> bool {
        self.target_detected
    }

    pub fn last_check_time(&self) -> Option<f32> {
        self.last_check_time
    }

    /// Сбросить кэш: следующий evaluate пересчитает сразу
    pub fn invalidate(&mut self) {
        self.last_check_time = None;
    }

    pub fn is_due(&self, now: f32, interval: f32) -> bool {
        match self.last_check_time {
            None => true,
            Some(last) => now - last >= interval,
        }
    }

    pub fn evaluate<Q: SpatialQuery>(
        &mut self,
        now: f32,
        entity_pos: Vec3,
        target_pos: Option<Vec3>,
        state: AIState,
        config: &AIConfig,
        spatial: &Q,
    ) -> bool {
        // Цель пропала: "not detected" без ожидания интервала
        let Some(target_pos) = target_pos else {
            self.target_detected = false;
            self.last_check_time = Some(now);
            return false;
        };

        if !self.is_due(now, config.detection_interval) {
            return self.target_detected;
        }

        let distance = entity_pos.distance(target_pos);
        self.target_detected = match state {
            AIState::Patrol => {
                distance <= config.detection_radius
                    && spatial.overlap_sphere(entity_pos, config.detection_radius, config.target_layer)
            }
            AIState::Aggro | AIState::Attack => distance <= config.aggro_lose_distance,
            AIState::Dead => false,
        };
        self.last_check_time = Some(now);

        self.target_detected
    }
}
