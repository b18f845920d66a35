//! Time-varying and panel-tunable values consumed by the two shader programs.
//!
//! The store is the only mutation path for these values: the animation loop
//! writes `time`, the viewport responder writes `pixel_ratio` through the
//! shared clamp policy, and the debug panel goes through the color/size
//! setters. Shaders read snapshots of these structs each frame.

use crate::constants::{
    DEFAULT_POINT_SIZE, DEFAULT_PORTAL_COLOR_END, DEFAULT_PORTAL_COLOR_START, MAX_PIXEL_RATIO,
    POINT_SIZE_MAX, POINT_SIZE_MIN,
};

/// Uniforms for the fireflies point program.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FirefliesUniforms {
    pub pixel_ratio: f32,
    pub point_size: f32,
    pub time: f32,
}

/// Uniforms for the portal glow program. Colors are linear RGB.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PortalUniforms {
    pub time: f32,
    pub color_start: [f32; 3],
    pub color_end: [f32; 3],
}

pub struct UniformStore {
    pub fireflies: FirefliesUniforms,
    pub portal: PortalUniforms,
}

impl Default for UniformStore {
    fn default() -> Self {
        Self {
            fireflies: FirefliesUniforms {
                pixel_ratio: 1.0,
                point_size: DEFAULT_POINT_SIZE,
                time: 0.0,
            },
            portal: PortalUniforms {
                time: 0.0,
                color_start: default_color(DEFAULT_PORTAL_COLOR_START),
                color_end: default_color(DEFAULT_PORTAL_COLOR_END),
            },
        }
    }
}

impl UniformStore {
    /// Write the shared clock sample into both uniform sets. Both values are
    /// updated before the next render issues, so the fireflies and portal
    /// programs always agree on `time` within a frame.
    pub fn set_time(&mut self, t: f32) {
        self.fireflies.time = t;
        self.portal.time = t;
    }

    /// Store the device pixel ratio, capped by `MAX_PIXEL_RATIO`.
    pub fn set_pixel_ratio(&mut self, r: f32) {
        self.fireflies.pixel_ratio = clamp_pixel_ratio(r);
    }

    /// Panel-driven point size, clamped to the slider range.
    pub fn set_point_size(&mut self, size: f32) {
        self.fireflies.point_size = size.clamp(POINT_SIZE_MIN, POINT_SIZE_MAX);
    }

    pub fn set_portal_color_start(&mut self, rgb: [f32; 3]) {
        self.portal.color_start = rgb;
    }

    pub fn set_portal_color_end(&mut self, rgb: [f32; 3]) {
        self.portal.color_end = rgb;
    }

    /// Hex setters for the color-picker inputs; malformed strings are ignored.
    pub fn set_portal_color_start_hex(&mut self, hex: &str) {
        if let Some(rgb) = hex_to_linear_rgb(hex) {
            self.portal.color_start = rgb;
        }
    }

    pub fn set_portal_color_end_hex(&mut self, hex: &str) {
        if let Some(rgb) = hex_to_linear_rgb(hex) {
            self.portal.color_end = rgb;
        }
    }
}

/// The one pixel-ratio policy, used at setup and on every resize.
#[inline]
pub fn clamp_pixel_ratio(r: f32) -> f32 {
    r.min(MAX_PIXEL_RATIO)
}

/// Parse `#rrggbb` into normalized sRGB components.
pub fn parse_hex_color(hex: &str) -> Option<[f32; 3]> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    // get() rejects slices that split a multi-byte character instead of
    // panicking; the panel feeds raw DOM input through here
    let r = u8::from_str_radix(digits.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(digits.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(digits.get(4..6)?, 16).ok()?;
    Some([
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
    ])
}

/// sRGB transfer function to linear, per component.
#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Parse `#rrggbb` and convert to the linear working space used for shading.
pub fn hex_to_linear_rgb(hex: &str) -> Option<[f32; 3]> {
    let [r, g, b] = parse_hex_color(hex)?;
    Some([srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b)])
}

fn default_color(hex: &str) -> [f32; 3] {
    hex_to_linear_rgb(hex).unwrap_or([1.0, 1.0, 1.0])
}
