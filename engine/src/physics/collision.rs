//! Collision detection module
//!
//! Ray-AABB intersection for static environment meshes. Every collidable is
//! approximated by its world-space axis-aligned bounding box.
//!
//! # Ray-AABB Intersection
//!
//! The slab method is used: entry and exit times are computed per axis and
//! the ray hits when the latest entry precedes the earliest exit. Axes the ray
//! runs parallel to only constrain the origin, which avoids the infinities a
//! plain inverse-direction product produces at a slab boundary.
//!
//! # Example
//!
//! ```ignore
//! use rambler_engine::physics::collision::{ray_aabb_intersect, Aabb};
//! use glam::Vec3;
//!
//! let bounds = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE);
//! let origin = Vec3::new(0.0, 0.0, -5.0);
//! if let Some(t) = ray_aabb_intersect(origin, Vec3::Z, bounds.min, bounds.max) {
//!     println!("Hit at distance {}", t);
//! }
//! ```

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Bounds of this box after `transform`, recomputed from all eight corners.
    pub fn transformed(&self, transform: &Mat4) -> Self {
        let corners = [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ];

        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for corner in corners {
            let p = transform.transform_point3(corner);
            min = min.min(p);
            max = max.max(p);
        }
        Self { min, max }
    }
}

/// Nearest hit of a ray against the environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space position where the ray entered the mesh bounds
    pub position: Vec3,
    /// Outward normal of the face that was hit
    pub normal: Vec3,
    /// Index of the mesh in the environment
    pub mesh_index: usize,
    /// Distance from ray origin to hit point
    pub distance: f32,
}

/// Slab entry/exit times, or `None` if the ray's line misses the box.
fn slab_interval(ray_origin: Vec3, ray_dir: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Option<(f32, f32)> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let origin = ray_origin[axis];
        let dir = ray_dir[axis];

        if dir.abs() < 1e-8 {
            // Parallel to this slab: the origin must already lie within it
            if origin < aabb_min[axis] || origin > aabb_max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / dir;
        let t1 = (aabb_min[axis] - origin) * inv;
        let t2 = (aabb_max[axis] - origin) * inv;
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));

        if t_min > t_max {
            return None;
        }
    }

    Some((t_min, t_max))
}

/// Performs ray-AABB intersection using the slab method.
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the nearest intersection (t >= 0);
///   the exit distance when the ray starts inside the box
/// * `None` - No intersection, or the box is behind the ray origin
pub fn ray_aabb_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<f32> {
    let (t_min, t_max) = slab_interval(ray_origin, ray_dir, aabb_min, aabb_max)?;
    if t_max < 0.0 || !t_max.is_finite() {
        None
    } else if t_min >= 0.0 {
        Some(t_min)
    } else {
        Some(t_max)
    }
}

/// Like [`ray_aabb_intersect`] but only reports front-face entries.
///
/// A ray starting inside the box does not hit it.
pub fn ray_aabb_entry(ray_origin: Vec3, ray_dir: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Option<f32> {
    let (t_min, _) = slab_interval(ray_origin, ray_dir, aabb_min, aabb_max)?;
    (t_min >= 0.0 && t_min.is_finite()).then_some(t_min)
}

/// Outward normal of the AABB face closest to `point`.
pub fn aabb_surface_normal(point: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Vec3 {
    let center = (aabb_min + aabb_max) * 0.5;
    let half_extents = ((aabb_max - aabb_min) * 0.5).max(Vec3::splat(1e-6));
    let normalized = (point - center) / half_extents;
    let abs_normalized = normalized.abs();

    if abs_normalized.x >= abs_normalized.y && abs_normalized.x >= abs_normalized.z {
        Vec3::new(normalized.x.signum(), 0.0, 0.0)
    } else if abs_normalized.y >= abs_normalized.z {
        Vec3::new(0.0, normalized.y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, normalized.z.signum())
    }
}
