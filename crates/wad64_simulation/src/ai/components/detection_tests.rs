//! Tests for DetectionGate.

#[cfg(test)]
mod tests {
    use super::super::detection::DetectionGate;
    use super::super::fsm::{AIConfig, AIState};
    use crate::components::CollisionLayers;
    use crate::physics::{RayHit, SpatialQuery};
    use bevy::prelude::*;

    /// Фиксированный ответ broad-phase overlap
    struct FixedOverlap(bool);

    impl SpatialQuery for FixedOverlap {
        fn overlap_sphere(&self, _center: Vec3, _radius: f32, _mask: CollisionLayers) -> bool {
            self.0
        }

        fn raycast(&self, _: Vec3, _: Vec3, _: f32, _: CollisionLayers) -> Option<RayHit> {
            None
        }
    }

    fn target_at(distance: f32) -> Option<Vec3> {
        Some(Vec3::new(distance, 0.0, 0.0))
    }

    #[test]
    fn test_hysteresis_between_radii() {
        let config = AIConfig::default();
        let spatial = FixedOverlap(true);

        for distance in [10.5, 12.0, 14.9] {
            let mut gate = DetectionGate::default();
            assert!(
                gate.evaluate(0.0, Vec3::ZERO, target_at(distance), AIState::Aggro, &config, &spatial),
                "Aggro keeps target at {}",
                distance
            );

            let mut gate = DetectionGate::default();
            assert!(
                !gate.evaluate(0.0, Vec3::ZERO, target_at(distance), AIState::Patrol, &config, &spatial),
                "Patrol does not acquire at {}",
                distance
            );
        }
    }

    #[test]
    fn test_patrol_requires_overlap_agreement() {
        let config = AIConfig::default();

        let mut gate = DetectionGate::default();
        assert!(!gate.evaluate(0.0, Vec3::ZERO, target_at(5.0), AIState::Patrol, &config, &FixedOverlap(false)));

        let mut gate = DetectionGate::default();
        assert!(gate.evaluate(0.0, Vec3::ZERO, target_at(5.0), AIState::Patrol, &config, &FixedOverlap(true)));
    }

    #[test]
    fn test_rate_limited_cache() {
        let config = AIConfig::default();
        let spatial = FixedOverlap(true);
        let mut gate = DetectionGate::default();

        assert!(gate.evaluate(0.0, Vec3::ZERO, target_at(5.0), AIState::Patrol, &config, &spatial));

        // Цель ушла, но интервал не истёк: кэш
        assert!(gate.evaluate(0.1, Vec3::ZERO, target_at(50.0), AIState::Patrol, &config, &spatial));
        assert_eq!(gate.last_check_time(), Some(0.0));

        // Интервал истёк: пересчёт
        assert!(!gate.evaluate(0.25, Vec3::ZERO, target_at(50.0), AIState::Patrol, &config, &spatial));
        assert_eq!(gate.last_check_time(), Some(0.25));
    }

    #[test]
    fn test_missing_target_not_detected_immediately() {
        let config = AIConfig::default();
        let spatial = FixedOverlap(true);
        let mut gate = DetectionGate::default();

        assert!(gate.evaluate(0.0, Vec3::ZERO, target_at(5.0), AIState::Aggro, &config, &spatial));
        assert!(!gate.evaluate(0.05, Vec3::ZERO, None, AIState::Aggro, &config, &spatial));
        assert!(!gate.target_detected());
    }

    #[test]
    fn test_dead_never_detects() {
        let config = AIConfig::default();
        let mut gate = DetectionGate::default();
        assert!(!gate.evaluate(0.0, Vec3::ZERO, target_at(1.0), AIState::Dead, &config, &FixedOverlap(true)));
    }

    #[test]
    fn test_invalidate_forces_refresh() {
        let config = AIConfig::default();
        let spatial = FixedOverlap(true);
        let mut gate = DetectionGate::default();

        gate.evaluate(0.0, Vec3::ZERO, target_at(5.0), AIState::Patrol, &config, &spatial);
        gate.invalidate();
        assert!(gate.is_due(0.01, config.detection_interval));
        assert!(!gate.evaluate(0.01, Vec3::ZERO, target_at(50.0), AIState::Patrol, &config, &spatial));
    }
}
