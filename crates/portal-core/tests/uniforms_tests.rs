use portal_core::uniforms::{
    clamp_pixel_ratio, hex_to_linear_rgb, parse_hex_color, srgb_to_linear, UniformStore,
};

#[test]
fn set_time_updates_both_uniform_sets() {
    let mut store = UniformStore::default();
    store.set_time(1.25);
    assert_eq!(store.fireflies.time, 1.25);
    assert_eq!(store.portal.time, 1.25);

    store.set_time(2.5);
    assert_eq!(store.fireflies.time, 2.5);
    assert_eq!(store.portal.time, 2.5);
}

#[test]
fn pixel_ratio_is_capped_at_two() {
    let mut store = UniformStore::default();
    store.set_pixel_ratio(3.0);
    assert_eq!(store.fireflies.pixel_ratio, 2.0);
    store.set_pixel_ratio(1.5);
    assert_eq!(store.fireflies.pixel_ratio, 1.5);

    assert_eq!(clamp_pixel_ratio(3.0), 2.0);
    assert_eq!(clamp_pixel_ratio(2.0), 2.0);
    assert_eq!(clamp_pixel_ratio(0.75), 0.75);
}

#[test]
fn point_size_clamps_to_slider_range() {
    let mut store = UniformStore::default();
    assert_eq!(store.fireflies.point_size, 100.0);

    store.set_point_size(250.0);
    assert_eq!(store.fireflies.point_size, 250.0);
    store.set_point_size(-10.0);
    assert_eq!(store.fireflies.point_size, 0.0);
    store.set_point_size(9999.0);
    assert_eq!(store.fireflies.point_size, 500.0);
}

#[test]
fn hex_parsing_round_trips_the_default_colors() {
    let srgb = parse_hex_color("#ffa200").unwrap();
    assert_eq!(srgb[0], 1.0);
    assert!((srgb[1] - 162.0 / 255.0).abs() < 1e-6);
    assert_eq!(srgb[2], 0.0);

    let linear = hex_to_linear_rgb("#ffa200").unwrap();
    assert_eq!(linear[0], 1.0);
    assert!(linear[1] < srgb[1]); // linearization darkens mid-range values
    assert_eq!(linear[2], 0.0);
}

#[test]
fn malformed_hex_is_rejected_and_ignored() {
    assert!(parse_hex_color("ffa200").is_none());
    assert!(parse_hex_color("#ffa2").is_none());
    assert!(parse_hex_color("#ggg000").is_none());
    assert!(parse_hex_color("").is_none());
    // 6 bytes but not 6 hex digits: the é spans a digit-pair boundary
    assert!(parse_hex_color("#a\u{e9}abc").is_none());

    let mut store = UniformStore::default();
    let before = store.portal.color_start;
    store.set_portal_color_start_hex("not-a-color");
    assert_eq!(store.portal.color_start, before);

    store.set_portal_color_start_hex("#ffffff");
    assert_eq!(store.portal.color_start, [1.0, 1.0, 1.0]);
}

#[test]
fn srgb_transfer_function_endpoints() {
    assert_eq!(srgb_to_linear(0.0), 0.0);
    assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
    // Dark values use the linear segment
    assert!((srgb_to_linear(0.02) - 0.02 / 12.92).abs() < 1e-7);
}
