// DOM and interaction constants for the web frontend.

pub const CANVAS_ID: &str = "app-canvas";
pub const SCENE_URL: &str = "portal.glb";

// Debug panel element ids; absent elements are skipped.
pub const PANEL_PORTAL_COLOR_START: &str = "portal-color-start";
pub const PANEL_PORTAL_COLOR_END: &str = "portal-color-end";
pub const PANEL_FIREFLIES_SIZE: &str = "fireflies-size";
pub const PANEL_CLEAR_COLOR: &str = "clear-color";

// A full-height drag sweeps one turn, scaled by this factor.
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
// Radius multiplier per wheel notch when zooming in; inverted for zooming out.
pub const DOLLY_STEP: f32 = 0.95;
