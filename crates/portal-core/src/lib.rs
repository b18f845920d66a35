pub mod camera;
pub mod clock;
pub mod constants;
pub mod context;
pub mod fireflies;
pub mod orbit;
pub mod scene;
pub mod uniforms;
pub mod viewport;

pub static BAKED_WGSL: &str = include_str!("../shaders/baked.wgsl");
pub static POLE_LIGHT_WGSL: &str = include_str!("../shaders/pole_light.wgsl");
pub static PORTAL_WGSL: &str = include_str!("../shaders/portal.wgsl");
pub static FIREFLIES_WGSL: &str = include_str!("../shaders/fireflies.wgsl");

pub use camera::*;
pub use clock::*;
pub use constants::*;
pub use context::*;
pub use fireflies::*;
pub use orbit::*;
pub use scene::*;
pub use uniforms::*;
pub use viewport::*;
