//! Simulation clock: "текущее время" для FSM, detection gate и cooldown'ов
//!
//! Core не владеет циклом: хост вызывает `App::update` (или запускает
//! `FixedUpdate` напрямую), а `advance_sim_clock` забирает delta из `Time`.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct SimClock {
    /// Секунды с начала симуляции (монотонно)
    pub now: f32,
    /// Delta текущего тика
    pub delta: f32,
    /// Номер тика
    pub tick: u64,
}

impl SimClock {
    pub fn advance(&mut self, delta: f32) {
        let delta = delta.max(0.0);
        self.delta = delta;
        self.now += delta;
        self.tick += 1;
    }
}

/// Система: продвинуть SimClock на delta тика
///
/// В FixedUpdate `Res<Time>`: это fixed-контекст (64Hz по умолчанию).
pub fn advance_sim_clock(mut clock: ResMut<SimClock>, time: Res<Time>) {
    clock.advance(time.delta_secs());
}
