use instant::Instant;

/// Elapsed scene time, sampled once per animation tick.
///
/// Backed by a monotonic source (`instant::Instant`, which maps to
/// `performance.now()` on wasm), so system clock adjustments can never make
/// `elapsed` go backwards.
pub struct FrameClock {
    started: Instant,
}

impl FrameClock {
    /// Capture the reference instant. `elapsed()` is zero immediately after.
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Seconds since `start()`. Non-decreasing across calls.
    pub fn elapsed(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }
}
