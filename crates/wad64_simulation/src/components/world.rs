//! World компоненты: CollisionLayers, SpatialBody
//!
//! ## Layers (битовая маска):
//! - Layer 1 (0b1 = 1): Player
//! - Layer 2 (0b10 = 2): Enemies
//! - Layer 3 (0b100 = 4): Obstacles (стены, колонны, ящики)
//!
//! Маска запроса (overlap/probe): OR нужных слоёв:
//! ```rust
//! use wad64_simulation::CollisionLayers;
//!
//! let hitscan_mask = CollisionLayers::ENEMY | CollisionLayers::OBSTACLE;
//! assert!(hitscan_mask.intersects(CollisionLayers::OBSTACLE));
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Битовая маска слоёв коллизий
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollisionLayers(pub u32);

impl CollisionLayers {
    pub const NONE: Self = Self(0);
    pub const PLAYER: Self = Self(0b1);
    pub const ENEMY: Self = Self(0b10);
    pub const OBSTACLE: Self = Self(0b100);
    pub const ALL: Self = Self(u32::MAX);

    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Название слоя для debug логов
    pub fn name(self) -> &'static str {
        match self {
            Self::PLAYER => "Player",
            Self::ENEMY => "Enemy",
            Self::OBSTACLE => "Obstacle",
            Self::NONE => "None",
            _ => "Mixed",
        }
    }
}

impl std::ops::BitOr for CollisionLayers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Физическое представление entity для spatial queries (сфера)
///
/// Центр берётся из Transform. Индексируется в `SpatialIndex` каждый тик.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct SpatialBody {
    pub radius: f32,
    pub layers: CollisionLayers,
}

impl SpatialBody {
    pub fn player() -> Self {
        Self {
            radius: 0.5,
            layers: CollisionLayers::PLAYER,
        }
    }

    pub fn enemy() -> Self {
        Self {
            radius: 0.5,
            layers: CollisionLayers::ENEMY,
        }
    }

    pub fn obstacle(radius: f32) -> Self {
        Self {
            radius,
            layers: CollisionLayers::OBSTACLE,
        }
    }
}
