//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: маркеры Enemy/Player, Health (HealthTracker), TrackedTarget
//! - movement: KinematicBody, MovementConfig, PatrolRoute, MovementCommand
//! - world: SpatialBody, CollisionLayers (для spatial queries)

pub mod actor;
pub mod movement;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use movement::*;
pub use world::*;
