//! Camera pose and the render-camera collaborator surface.

use glam::{Mat4, Vec3};

/// Where the render camera sits and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Normalized view direction, or -Z if position and target coincide.
    pub fn direction(&self) -> Vec3 {
        (self.target - self.position)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z)
    }

    /// Right-handed view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        let forward = self.direction();
        // Looking straight up or down - use world Z as the up reference
        let up = if forward.y.abs() > 0.99 { Vec3::Z } else { Vec3::Y };
        Mat4::look_to_rh(self.position, forward, up)
    }

    /// GPU-ready copy of this pose.
    pub fn to_raw(&self) -> RawCameraPose {
        RawCameraPose {
            view: self.view_matrix().to_cols_array_2d(),
            eye: self.position.extend(1.0).to_array(),
        }
    }
}

/// Camera pose laid out for a uniform buffer.
///
/// Layout (80 bytes):
///   offset  0: view (mat4x4<f32>) = 64 bytes, column major
///   offset 64: eye (vec4<f32>)    = 16 bytes, w = 1
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RawCameraPose {
    pub view: [[f32; 4]; 4],
    pub eye: [f32; 4],
}

static_assertions::assert_eq_size!(RawCameraPose, [u8; 80]);

/// The render camera as seen from the core: a settable position and a look-at.
pub trait RenderCamera {
    fn set_position(&mut self, position: Vec3);
    fn look_at(&mut self, target: Vec3);
}

impl RenderCamera for CameraPose {
    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }
}
