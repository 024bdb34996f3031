//! 64.WAD Simulation Core
//!
//! Headless ECS-симуляция врагов на Bevy 0.16:
//! - AI: BehaviorFsm (Patrol → Aggro → Attack → Dead) + DetectionGate
//! - Physics: SpatialQuery oracles, MovementDriver (steering + gravity)
//! - Combat: AttackExecutor, hitscan, Health, death/corpse lifecycle
//!
//! Один логический поток на тик: все системы в FixedUpdate, `.chain()`.
//! Рендер, ассеты, UI: ответственность хоста.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use std::time::Duration;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod clock;
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;
pub mod physics;
pub mod spawn;

// Re-export базовых типов для удобства
pub use ai::{AIConfig, AIPlugin, AIState, AIStateChanged, BehaviorFsm, DetectionGate};
pub use clock::SimClock;
pub use combat::{
    AttackConfig, AttackExecutor, CombatPlugin, CorpseDelay, DamageDealt, DamageRequest, Dead,
    EntityDied, HitscanFired,
};
pub use components::*;
pub use config::{ConfigError, EnemyTuning};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use physics::{MovementPlugin, SpatialIndex, SpatialQuery};
pub use spawn::{spawn_enemy, spawn_obstacle, spawn_player};

/// Частота simulation tick
pub const FIXED_HZ: f64 = 64.0;

/// Фазы тика (FixedUpdate), выполняются строго по порядку
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// SimClock += delta
    Clock,
    /// Пересборка SpatialIndex
    Spatial,
    /// DetectionGate + BehaviorFsm
    Ai,
    /// MovementDriver
    Movement,
    /// Атаки, урон, смерть
    Combat,
    /// Деспавн трупов
    Death,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 64Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
            .init_resource::<SimClock>()
            .init_resource::<SpatialIndex>()
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Clock,
                    SimulationSet::Spatial,
                    SimulationSet::Ai,
                    SimulationSet::Movement,
                    SimulationSet::Combat,
                    SimulationSet::Death,
                )
                    .chain(),
            )
            .add_systems(
                FixedUpdate,
                (
                    clock::advance_sim_clock.in_set(SimulationSet::Clock),
                    physics::rebuild_spatial_index.in_set(SimulationSet::Spatial),
                ),
            )
            // Подсистемы
            .add_plugins((AIPlugin, MovementPlugin, CombatPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время ручное: каждый `app.update()` = ровно один fixed tick (1/64 s),
/// независимо от wall clock.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / FIXED_HZ,
        )))
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin);

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
