//! Physics simulation module
//!
//! Spatial queries (overlap/probe/raycast), steering врагов, gravity.
//! Физический движок хоста подставляется через `SpatialQuery`.

pub mod movement;
pub mod query;
pub mod steering;

// Re-export основных типов
pub use movement::{execute_movement_commands, sync_body_transforms, MovementPlugin};
pub use query::{rebuild_spatial_index, RayHit, SpatialIndex, SpatialQuery};
pub use steering::{horizontal_direction, MovementDriver, PatrolStep};
