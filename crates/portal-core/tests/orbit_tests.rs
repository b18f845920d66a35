use glam::Vec3;
use portal_core::camera::Camera;
use portal_core::constants::{CAMERA_START_EYE, ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE};
use portal_core::orbit::OrbitControls;

fn start_eye() -> Vec3 {
    Vec3::from(CAMERA_START_EYE)
}

#[test]
fn spherical_state_round_trips_the_start_eye() {
    let controls = OrbitControls::new(start_eye(), Vec3::ZERO);
    let eye = controls.eye();
    assert!((eye - start_eye()).length() < 1e-4, "eye drifted: {eye:?}");
    assert!((controls.radius() - 6.0).abs() < 1e-5);
}

#[test]
fn idle_update_leaves_the_eye_in_place() {
    let mut controls = OrbitControls::new(start_eye(), Vec3::ZERO);
    let before = controls.eye();
    for _ in 0..100 {
        controls.update();
    }
    assert!((controls.eye() - before).length() < 1e-4);
}

#[test]
fn rotation_is_applied_gradually_and_converges() {
    let mut controls = OrbitControls::new(start_eye(), Vec3::ZERO);
    let before = controls.eye();
    controls.rotate(1.0, 0.0);

    controls.update();
    let after_one = controls.eye();
    assert!((after_one - before).length() > 1e-4, "one update should move the eye");

    // Pending delta decays by (1 - damping_factor) each step.
    let (pending_az, _) = controls.pending_delta();
    assert!((pending_az - 0.95).abs() < 1e-5);

    for _ in 0..500 {
        controls.update();
    }
    let (pending_az, pending_polar) = controls.pending_delta();
    assert!(pending_az.abs() < 1e-4);
    assert!(pending_polar.abs() < 1e-4);
    // The full queued rotation has been absorbed; radius is untouched.
    assert!((controls.radius() - 6.0).abs() < 1e-4);
}

#[test]
fn polar_angle_never_reaches_the_poles() {
    let mut controls = OrbitControls::new(start_eye(), Vec3::ZERO);
    controls.rotate(0.0, 100.0);
    for _ in 0..200 {
        controls.update();
    }
    let eye = controls.eye();
    // Up vector stays usable: the eye never sits exactly on the y axis.
    assert!(eye.x.abs() + eye.z.abs() > 1e-4);
}

#[test]
fn dolly_clamps_to_distance_bounds() {
    let mut controls = OrbitControls::new(start_eye(), Vec3::ZERO);
    for _ in 0..100 {
        controls.dolly(0.5);
    }
    assert_eq!(controls.radius(), ORBIT_MIN_DISTANCE);

    for _ in 0..100 {
        controls.dolly(2.0);
    }
    assert_eq!(controls.radius(), ORBIT_MAX_DISTANCE);
}

#[test]
fn apply_to_writes_eye_and_target() {
    let mut controls = OrbitControls::new(start_eye(), Vec3::ZERO);
    let mut camera = Camera::portal_default(16.0 / 9.0);
    controls.rotate(0.5, 0.1);
    controls.update();
    controls.apply_to(&mut camera);
    assert_eq!(camera.eye, controls.eye());
    assert_eq!(camera.target, Vec3::ZERO);
}
