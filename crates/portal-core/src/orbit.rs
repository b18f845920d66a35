use glam::Vec3;

use crate::camera::Camera;
use crate::constants::{
    ORBIT_DAMPING_FACTOR, ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE, ORBIT_POLAR_EPSILON,
};

/// Damped orbit controls around a fixed target.
///
/// Pointer drags accumulate a pending spherical delta; `update()` applies a
/// `damping_factor` fraction of it each frame and decays the remainder, so
/// the camera keeps drifting briefly after the pointer stops. One `update()`
/// runs per animation tick.
pub struct OrbitControls {
    pub target: Vec3,
    pub damping_factor: f32,
    radius: f32,
    polar: f32,
    azimuth: f32,
    pending_azimuth: f32,
    pending_polar: f32,
}

impl OrbitControls {
    /// Derive the spherical state from an initial eye/target pair.
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let radius = offset.length().max(ORBIT_MIN_DISTANCE);
        let polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
        let azimuth = offset.x.atan2(offset.z);
        Self {
            target,
            damping_factor: ORBIT_DAMPING_FACTOR,
            radius,
            polar,
            azimuth,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
        }
    }

    /// Queue a rotation from pointer input, in radians.
    pub fn rotate(&mut self, d_azimuth: f32, d_polar: f32) {
        self.pending_azimuth += d_azimuth;
        self.pending_polar += d_polar;
    }

    /// Scale the orbit radius (wheel zoom), clamped to the scene's bounds.
    pub fn dolly(&mut self, factor: f32) {
        self.radius = (self.radius * factor).clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }

    /// Advance the damping state by one step.
    pub fn update(&mut self) {
        self.azimuth += self.pending_azimuth * self.damping_factor;
        self.polar += self.pending_polar * self.damping_factor;
        self.pending_azimuth *= 1.0 - self.damping_factor;
        self.pending_polar *= 1.0 - self.damping_factor;
        self.polar = self
            .polar
            .clamp(ORBIT_POLAR_EPSILON, std::f32::consts::PI - ORBIT_POLAR_EPSILON);
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Current eye position on the orbit sphere.
    pub fn eye(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        self.target
            + self.radius
                * Vec3::new(
                    sin_polar * self.azimuth.sin(),
                    self.polar.cos(),
                    sin_polar * self.azimuth.cos(),
                )
    }

    /// Write the orbit state into the camera.
    pub fn apply_to(&self, camera: &mut Camera) {
        camera.eye = self.eye();
        camera.target = self.target;
    }

    /// Remaining undamped rotation, used to gauge inertia in tests.
    pub fn pending_delta(&self) -> (f32, f32) {
        (self.pending_azimuth, self.pending_polar)
    }
}
