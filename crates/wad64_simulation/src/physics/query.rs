//! Spatial queries: black-box oracles для AI
//!
//! AI не знает про физический движок: ему нужны только
//! - overlap_sphere (broad-phase detection по слою цели)
//! - probe (forward obstacle probe, line-of-sight)
//! - raycast (hitscan: кто первый на луче)
//!
//! `SpatialIndex`: встроенная реализация на сферах, пересобирается каждый тик.

use bevy::prelude::*;
use crate::combat::Dead;
use crate::components::{CollisionLayers, SpatialBody};

/// Результат raycast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub distance: f32,
    pub layers: CollisionLayers,
}

pub trait SpatialQuery {
    /// Есть ли тело слоя `mask`, пересекающее сферу
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: CollisionLayers) -> bool;

    /// Ближайшее тело слоя `mask` на луче в пределах `max_distance`
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: CollisionLayers,
    ) -> Option<RayHit>;

    /// Hit/no-hit проба (forward obstacle probe)
    fn probe(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: CollisionLayers) -> bool {
        self.raycast(origin, direction, max_distance, mask).is_some()
    }

    /// Нет препятствий между `from` и `to`
    fn line_of_sight(&self, from: Vec3, to: Vec3) -> bool {
        let delta = to - from;
        let distance = delta.length();
        if distance <= f32::EPSILON {
            return true;
        }
        !self.probe(from, delta / distance, distance, CollisionLayers::OBSTACLE)
    }
}

#[derive(Debug, Clone, Copy)]
struct IndexedBody {
    entity: Entity,
    center: Vec3,
    radius: f32,
    layers: CollisionLayers,
}

/// Сферический spatial index (Resource)
///
/// Линейный перебор: в прототипе десятки тел на уровень.
#[derive(Resource, Debug, Clone, Default)]
pub struct SpatialIndex {
    bodies: Vec<IndexedBody>,
}

impl SpatialIndex {
    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    pub fn insert(&mut self, entity: Entity, center: Vec3, body: SpatialBody) {
        self.bodies.push(IndexedBody {
            entity,
            center,
            radius: body.radius.max(0.0),
            layers: body.layers,
        });
    }

    /// Число тел в индексе (живые + препятствия)
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }
}

impl SpatialQuery for SpatialIndex {
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: CollisionLayers) -> bool {
        self.bodies.iter().any(|body| {
            if !body.layers.intersects(mask) {
                return false;
            }
            let reach = radius + body.radius;
            center.distance_squared(body.center) <= reach * reach
        })
    }

    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: CollisionLayers,
    ) -> Option<RayHit> {
        let direction = direction.try_normalize()?;

        let mut best: Option<RayHit> = None;
        for body in self.bodies.iter().filter(|b| b.layers.intersects(mask)) {
            let Some(distance) = ray_sphere(origin, direction, body.center, body.radius) else {
                continue;
            };
            if distance > max_distance {
                continue;
            }

            // Tie-break по Entity index для детерминизма
            let closer = match best {
                None => true,
                Some(hit) => {
                    distance < hit.distance
                        || (distance == hit.distance && body.entity.index() < hit.entity.index())
                }
            };
            if closer {
                best = Some(RayHit {
                    entity: body.entity,
                    distance,
                    layers: body.layers,
                });
            }
        }

        best
    }
}

/// Пересечение луча (direction normalized) со сферой. Ноль если origin внутри.
fn ray_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let c = oc.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }

    let b = oc.dot(direction);
    if b > 0.0 {
        // Сфера позади луча
        return None;
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    Some(-b - discriminant.sqrt())
}

/// Система: пересборка SpatialIndex из Transform + SpatialBody
///
/// Трупы (Dead) в индекс не попадают: не ловят пули и не видны detection.
pub fn rebuild_spatial_index(
    mut index: ResMut<SpatialIndex>,
    bodies: Query<(Entity, &Transform, &SpatialBody), Without<Dead>>,
) {
    index.clear();

    let mut sorted: Vec<_> = bodies.iter().collect();
    sorted.sort_by_key(|(entity, _, _)| entity.index());

    for (entity, transform, body) in sorted {
        index.insert(entity, transform.translation, *body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(index: u32) -> Entity {
        Entity::from_raw(index)
    }

    fn sample_index() -> SpatialIndex {
        let mut index = SpatialIndex::default();
        index.insert(entity(1), Vec3::new(0.0, 0.0, -5.0), SpatialBody::obstacle(1.0));
        index.insert(entity(2), Vec3::new(0.0, 0.0, -10.0), SpatialBody::player());
        index
    }

    #[test]
    fn test_overlap_respects_layers() {
        let index = sample_index();

        assert!(index.overlap_sphere(Vec3::ZERO, 10.0, CollisionLayers::PLAYER));
        assert!(!index.overlap_sphere(Vec3::ZERO, 9.0, CollisionLayers::PLAYER));
        assert!(!index.overlap_sphere(Vec3::ZERO, 10.0, CollisionLayers::ENEMY));
    }

    #[test]
    fn test_raycast_returns_nearest() {
        let index = sample_index();
        let all = CollisionLayers::OBSTACLE | CollisionLayers::PLAYER;

        let hit = index.raycast(Vec3::ZERO, Vec3::NEG_Z, 20.0, all).expect("hit");
        assert_eq!(hit.entity, entity(1));
        assert!((hit.distance - 4.0).abs() < 1e-5);

        let hit = index
            .raycast(Vec3::ZERO, Vec3::NEG_Z, 20.0, CollisionLayers::PLAYER)
            .expect("hit");
        assert_eq!(hit.entity, entity(2));
    }

    #[test]
    fn test_raycast_range_and_direction() {
        let index = sample_index();

        assert!(index.raycast(Vec3::ZERO, Vec3::NEG_Z, 3.0, CollisionLayers::OBSTACLE).is_none());
        assert!(index.raycast(Vec3::ZERO, Vec3::Z, 20.0, CollisionLayers::ALL).is_none());
        assert!(index.raycast(Vec3::ZERO, Vec3::ZERO, 20.0, CollisionLayers::ALL).is_none());
    }

    #[test]
    fn test_line_of_sight() {
        let index = sample_index();

        // Стена между origin и игроком
        assert!(!index.line_of_sight(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0)));
        // Сбоку: чисто
        assert!(index.line_of_sight(Vec3::new(3.0, 0.0, 0.0), Vec3::new(3.0, 0.0, -10.0)));
    }
}
