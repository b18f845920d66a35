use rand::prelude::*;

/// Static point cloud of firefly particles: one position and one size scale
/// per particle. Generated once at scene setup and uploaded to the GPU as-is.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FireflyField {
    pub positions: Vec<[f32; 3]>,
    pub scales: Vec<f32>,
}

impl FireflyField {
    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }
}

/// Generate `count` fireflies from a source of uniform `[0, 1)` floats.
///
/// Draw order is fixed at exactly four draws per particle (x, y, z, scale) so
/// a seeded source reproduces the same field bit-for-bit. Positions land in a
/// rectangular volume above the portal plane: `x ∈ [-2, 2)`, `y ∈ [0, 1.5)`,
/// `z ∈ (-2, 2]`.
pub fn generate(count: usize, mut uniform: impl FnMut() -> f32) -> FireflyField {
    let mut positions = Vec::with_capacity(count);
    let mut scales = Vec::with_capacity(count);
    for _ in 0..count {
        let x = (uniform() - 0.5) * crate::constants::FIREFLY_SPREAD;
        let y = uniform() * crate::constants::FIREFLY_HEIGHT;
        let z = -(uniform() - 0.5) * crate::constants::FIREFLY_SPREAD;
        positions.push([x, y, z]);
        scales.push(uniform());
    }
    FireflyField { positions, scales }
}

/// Deterministic field from a seed, for tests and reproducible captures.
pub fn generate_seeded(count: usize, seed: u64) -> FireflyField {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(count, move || rng.gen::<f32>())
}

/// Field from ambient entropy, used at scene setup.
pub fn generate_random(count: usize) -> FireflyField {
    let mut rng = rand::thread_rng();
    generate(count, move || rng.gen::<f32>())
}
