use portal_core::fireflies::{generate, generate_seeded};

/// Feed a fixed sequence of "uniform" draws, cycling if exhausted.
fn scripted(values: Vec<f32>) -> impl FnMut() -> f32 {
    let mut i = 0;
    move || {
        let v = values[i % values.len()];
        i += 1;
        v
    }
}

#[test]
fn output_lengths_match_count() {
    for count in [0usize, 1, 7, 40, 1000] {
        let field = generate(count, || 0.25);
        assert_eq!(field.positions.len(), count);
        assert_eq!(field.scales.len(), count);
        assert_eq!(field.len(), count);
    }
}

#[test]
fn zero_count_yields_empty_field() {
    let field = generate(0, || panic!("no draws expected for count=0"));
    assert!(field.is_empty());
}

#[test]
fn known_sequence_produces_expected_particle() {
    let field = generate(1, scripted(vec![0.5, 0.2, 0.9, 0.1]));
    let [x, y, z] = field.positions[0];
    assert_eq!(x, 0.0);
    assert_eq!(y, 0.2f32 * 1.5);
    assert_eq!(z, -(0.9f32 - 0.5) * 4.0);
    assert_eq!(field.scales[0], 0.1);
}

#[test]
fn draw_order_is_x_y_z_scale() {
    // A ramp makes each draw identifiable: draw k returns k/100.
    let mut k = 0u32;
    let field = generate(2, move || {
        let v = k as f32 / 100.0;
        k += 1;
        v
    });
    // Particle 0 consumes draws 0..4, particle 1 draws 4..8.
    assert_eq!(field.positions[0], [(0.00 - 0.5) * 4.0, 0.01 * 1.5, -(0.02 - 0.5) * 4.0]);
    assert_eq!(field.scales[0], 0.03);
    assert_eq!(field.positions[1], [(0.04 - 0.5) * 4.0, 0.05 * 1.5, -(0.06 - 0.5) * 4.0]);
    assert_eq!(field.scales[1], 0.07);
}

#[test]
fn seeded_generation_is_reproducible() {
    let a = generate_seeded(40, 42);
    let b = generate_seeded(40, 42);
    assert_eq!(a, b);

    let c = generate_seeded(40, 43);
    assert_ne!(a, c);
}

#[test]
fn particles_stay_inside_the_field_volume() {
    let field = generate_seeded(1000, 7);
    for (pos, scale) in field.positions.iter().zip(field.scales.iter()) {
        let [x, y, z] = *pos;
        assert!((-2.0..2.0).contains(&x), "x out of range: {x}");
        assert!((0.0..1.5).contains(&y), "y out of range: {y}");
        assert!(z > -2.0 && z <= 2.0, "z out of range: {z}");
        assert!((0.0..1.0).contains(scale), "scale out of range: {scale}");
    }
}
