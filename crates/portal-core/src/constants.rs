// Scene tuning constants shared by the core tick logic and the web renderer.

// Fireflies
pub const FIREFLIES_COUNT: usize = 40;
pub const FIREFLY_SPREAD: f32 = 4.0; // horizontal extent of the field, centered on the portal
pub const FIREFLY_HEIGHT: f32 = 1.5; // vertical extent above the portal plane

// Pixel-ratio cap: bounds GPU fill-rate cost on high-density displays. The
// same policy is applied at initial setup and on every resize.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

// Fireflies point sizing (panel-tunable)
pub const DEFAULT_POINT_SIZE: f32 = 100.0;
pub const POINT_SIZE_MIN: f32 = 0.0;
pub const POINT_SIZE_MAX: f32 = 500.0;

// Default portal glow gradient and renderer clear color (sRGB hex)
pub const DEFAULT_PORTAL_COLOR_START: &str = "#ffa200";
pub const DEFAULT_PORTAL_COLOR_END: &str = "#4c4b48";
pub const DEFAULT_CLEAR_COLOR: &str = "#191d20";

// Camera
pub const CAMERA_FOVY_RADIANS: f32 = std::f32::consts::FRAC_PI_4; // 45 degrees
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_START_EYE: [f32; 3] = [4.0, 2.0, 4.0];

// Orbit controls
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05; // fraction of the pending delta applied per frame
pub const ORBIT_MIN_DISTANCE: f32 = 1.0;
pub const ORBIT_MAX_DISTANCE: f32 = 20.0;
pub const ORBIT_POLAR_EPSILON: f32 = 0.01; // keeps the eye off the poles
