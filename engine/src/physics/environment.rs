//! Static environment geometry
//!
//! The ordered set of collidable meshes delivered by the environment asset
//! load. Immutable once built.

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, RayHit, aabb_surface_normal, ray_aabb_entry};

/// A single static collidable mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentMesh {
    pub name: String,
    /// World-space bounds
    pub bounds: Aabb,
}

impl EnvironmentMesh {
    pub fn new(name: impl Into<String>, bounds: Aabb) -> Self {
        Self {
            name: name.into(),
            bounds,
        }
    }

    /// Mesh position used for proximity checks.
    pub fn position(&self) -> Vec3 {
        self.bounds.center()
    }
}

/// Transform the environment model is placed with when it loads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentTransform {
    /// Uniform scale
    pub scale: f32,
    /// Rotation about +Y in radians
    pub rotation_y: f32,
    pub translation: Vec3,
}

impl Default for EnvironmentTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotation_y: 0.0,
            translation: Vec3::ZERO,
        }
    }
}

impl EnvironmentTransform {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_rotation_y(self.rotation_y),
            self.translation,
        )
    }
}

/// Ordered collection of static collidable meshes.
///
/// An empty environment is valid and never blocks anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvironmentGeometry {
    meshes: Vec<EnvironmentMesh>,
}

impl EnvironmentGeometry {
    /// Build from meshes already in world space.
    pub fn new(meshes: Vec<EnvironmentMesh>) -> Self {
        Self { meshes }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from model-local meshes placed with `transform`.
    pub fn from_local(meshes: Vec<EnvironmentMesh>, transform: &EnvironmentTransform) -> Self {
        let matrix = transform.matrix();
        let meshes = meshes
            .into_iter()
            .map(|mesh| EnvironmentMesh {
                bounds: mesh.bounds.transformed(&matrix),
                name: mesh.name,
            })
            .collect();
        Self { meshes }
    }

    /// Parse a JSON array of model-local meshes and place them with `transform`.
    pub fn from_json(json: &str, transform: &EnvironmentTransform) -> Result<Self, serde_json::Error> {
        let meshes: Vec<EnvironmentMesh> = serde_json::from_str(json)?;
        Ok(Self::from_local(meshes, transform))
    }

    pub fn meshes(&self) -> &[EnvironmentMesh] {
        &self.meshes
    }

    pub fn find(&self, name: &str) -> Option<&EnvironmentMesh> {
        self.meshes.iter().find(|mesh| mesh.name == name)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Nearest mesh entered by the ray within `max_dist`.
    ///
    /// Brute-force over every mesh; environments here are a few dozen boxes.
    pub fn ray_cast(&self, origin: Vec3, direction: Vec3, max_dist: f32) -> Option<RayHit> {
        let mut closest: Option<RayHit> = None;
        let mut closest_dist = max_dist;

        for (index, mesh) in self.meshes.iter().enumerate() {
            let Aabb { min, max } = mesh.bounds;
            if let Some(t) = ray_aabb_entry(origin, direction, min, max) {
                if t < closest_dist {
                    let position = origin + direction * t;
                    closest = Some(RayHit {
                        position,
                        normal: aabb_surface_normal(position, min, max),
                        mesh_index: index,
                        distance: t,
                    });
                    closest_dist = t;
                }
            }
        }

        closest
    }
}
