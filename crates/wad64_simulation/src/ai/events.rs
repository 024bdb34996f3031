//! AI Events: исходящие сигналы FSM
//!
//! Единственный outward-канал ядра: кто слушает (UI, скоринг, звук), ядру не важно.

use bevy::prelude::*;
use crate::ai::AIState;

/// Закоммиченный переход FSM (old ≠ new)
///
/// Пишется ПОСЛЕ entry/exit bookkeeping: читатель видит entity уже в новом state.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AIStateChanged {
    pub entity: Entity,
    pub from: AIState,
    pub to: AIState,
}
