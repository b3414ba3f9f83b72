//! Collision probe
//!
//! Blocked/clear query used to gate forward movement. Rays are cast from the
//! player's position, lifted along the player's up axis by each configured
//! offset, in the facing direction. The probe never touches player state.

use glam::Vec3;

use super::environment::EnvironmentGeometry;

/// Default blocking distance in world units.
pub const DEFAULT_BLOCK_DISTANCE: f32 = 50.0;

/// Returns true if any ray, one per offset, hits the environment closer than `threshold`.
///
/// An empty environment or a zero direction is never blocked.
pub fn is_blocked(
    env: &EnvironmentGeometry,
    position: Vec3,
    direction: Vec3,
    up: Vec3,
    offsets: &[f32],
    threshold: f32,
) -> bool {
    nearest_hit(env, position, direction, up, offsets)
        .is_some_and(|distance| distance < threshold)
}

/// Nearest hit distance over all offset rays.
pub fn nearest_hit(
    env: &EnvironmentGeometry,
    position: Vec3,
    direction: Vec3,
    up: Vec3,
    offsets: &[f32],
) -> Option<f32> {
    let direction = direction.try_normalize()?;
    let up = up.try_normalize().unwrap_or(Vec3::Y);

    offsets
        .iter()
        .filter_map(|&offset| {
            env.ray_cast(position + up * offset, direction, f32::INFINITY)
                .map(|hit| hit.distance)
        })
        .min_by(f32::total_cmp)
}

/// A probe configuration: the ray heights and the blocking distance.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionProbe {
    /// Ray heights above the player origin, along the player's up axis
    pub offsets: Vec<f32>,
    /// A hit closer than this blocks movement
    pub threshold: f32,
}

impl Default for CollisionProbe {
    fn default() -> Self {
        Self::foot(DEFAULT_BLOCK_DISTANCE)
    }
}

impl CollisionProbe {
    pub fn new(offsets: Vec<f32>, threshold: f32) -> Self {
        Self { offsets, threshold }
    }

    /// Single ray at foot height.
    pub fn foot(threshold: f32) -> Self {
        Self::new(vec![0.0], threshold)
    }

    /// Foot ray plus a head ray `head_offset` above it.
    pub fn foot_and_head(head_offset: f32, threshold: f32) -> Self {
        Self::new(vec![0.0, head_offset], threshold)
    }

    pub fn is_blocked(&self, env: &EnvironmentGeometry, position: Vec3, direction: Vec3, up: Vec3) -> bool {
        is_blocked(env, position, direction, up, &self.offsets, self.threshold)
    }

    pub fn nearest_hit(&self, env: &EnvironmentGeometry, position: Vec3, direction: Vec3, up: Vec3) -> Option<f32> {
        nearest_hit(env, position, direction, up, &self.offsets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{Aabb, EnvironmentMesh};

    fn wall_at(z: f32, bottom: f32, top: f32) -> EnvironmentGeometry {
        EnvironmentGeometry::new(vec![EnvironmentMesh::new(
            "wall",
            Aabb::new(Vec3::new(-100.0, bottom, z), Vec3::new(100.0, top, z + 10.0)),
        )])
    }

    #[test]
    fn test_empty_environment_never_blocked() {
        let probe = CollisionProbe::foot_and_head(1.0, DEFAULT_BLOCK_DISTANCE);
        assert!(!probe.is_blocked(&EnvironmentGeometry::empty(), Vec3::ZERO, Vec3::Z, Vec3::Y));
    }

    #[test]
    fn test_threshold_is_strict() {
        let env = wall_at(50.0, -1.0, 1.0);
        let probe = CollisionProbe::foot(50.0);
        // Exactly at the threshold is still clear
        assert!(!probe.is_blocked(&env, Vec3::ZERO, Vec3::Z, Vec3::Y));
        assert!(probe.is_blocked(&env, Vec3::new(0.0, 0.0, 0.5), Vec3::Z, Vec3::Y));
    }

    #[test]
    fn test_head_ray_catches_overhang() {
        // Obstacle hovers between y=0.5 and y=3: foot ray passes under it
        let env = wall_at(10.0, 0.5, 3.0);

        assert!(!CollisionProbe::foot(50.0).is_blocked(&env, Vec3::ZERO, Vec3::Z, Vec3::Y));
        assert!(CollisionProbe::foot_and_head(1.0, 50.0).is_blocked(&env, Vec3::ZERO, Vec3::Z, Vec3::Y));
    }

    #[test]
    fn test_nearest_hit_over_offsets() {
        let env = wall_at(10.0, -1.0, 3.0);
        let probe = CollisionProbe::foot_and_head(1.0, 50.0);
        let distance = probe.nearest_hit(&env, Vec3::ZERO, Vec3::Z, Vec3::Y).unwrap();
        assert!((distance - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_direction_not_blocked() {
        let env = wall_at(1.0, -1.0, 1.0);
        assert!(!CollisionProbe::foot(50.0).is_blocked(&env, Vec3::ZERO, Vec3::ZERO, Vec3::Y));
    }
}
