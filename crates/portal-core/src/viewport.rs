use crate::uniforms::clamp_pixel_ratio;

/// Display-surface dimensions and density, mutated only by the viewport
/// responder on resize notifications.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f32,
}

impl ViewportState {
    /// Build from CSS-pixel dimensions and the raw device pixel ratio; the
    /// stored ratio goes through the shared clamp policy.
    pub fn new(width: u32, height: u32, device_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: clamp_pixel_ratio(device_ratio),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Backing-store size in physical pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        let w = (self.width as f32 * self.pixel_ratio) as u32;
        let h = (self.height as f32 * self.pixel_ratio) as u32;
        (w.max(1), h.max(1))
    }
}
