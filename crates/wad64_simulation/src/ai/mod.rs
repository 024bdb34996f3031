//! AI decision-making module
//!
//! Enemy behaviour FSM: Patrol → Aggro → Attack → Dead.
//! DetectionGate решает "видим ли цель" (rate-limit + гистерезис),
//! BehaviorFsm решает переходы, MovementDriver/AttackExecutor исполняют.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;

// Re-export основных типов
pub use components::{
    AIConfig, AIState, BehaviorFsm, DetectionGate, FsmInput, StateTransition,
    ATTACK_EXIT_MULTIPLIER,
};
pub use events::AIStateChanged;

use crate::SimulationSet;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate (SimulationSet::Ai).
/// ai_fsm_tick: detection + transitions + MovementCommand
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AIStateChanged>();

        app.add_systems(FixedUpdate, systems::ai_fsm_tick.in_set(SimulationSet::Ai));
    }
}
