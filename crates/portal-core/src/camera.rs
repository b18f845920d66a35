//! Camera description shared between the tick logic and the renderer.
//!
//! Platform-neutral on purpose: the web frontend consumes it to build the
//! view-projection matrix uploaded each frame.

use glam::{Mat4, Vec3};

use crate::constants::{CAMERA_FAR, CAMERA_FOVY_RADIANS, CAMERA_NEAR, CAMERA_START_EYE};

/// Simple right-handed camera with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// The scene's hand-authored starting camera: eye at (4, 2, 4) looking at
    /// the portal origin with a 45 degree vertical field of view.
    pub fn portal_default(aspect: f32) -> Self {
        Self {
            eye: Vec3::from_array(CAMERA_START_EYE),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOVY_RADIANS,
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Combined matrix uploaded to every pipeline.
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
