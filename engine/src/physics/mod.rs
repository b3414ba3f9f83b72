//! Physics module
//!
//! Static-environment collision queries. There is no dynamics here: the
//! environment never moves and the player is moved kinematically by the
//! locomotion model.
//!
//! # Submodules
//!
//! - [`collision`] - Ray-AABB slab tests and bounds math
//! - [`environment`] - The loaded collidable mesh set
//! - [`probe`] - Blocked/clear queries at several ray heights

pub mod collision;
pub mod environment;
pub mod probe;

pub use collision::{Aabb, RayHit, aabb_surface_normal, ray_aabb_entry, ray_aabb_intersect};
pub use environment::{EnvironmentGeometry, EnvironmentMesh, EnvironmentTransform};
pub use probe::{CollisionProbe, DEFAULT_BLOCK_DISTANCE};
