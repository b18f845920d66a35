use portal_core::clock::FrameClock;
use std::thread::sleep;
use std::time::Duration;

#[test]
fn elapsed_starts_near_zero() {
    let clock = FrameClock::start();
    assert!(clock.elapsed() < 0.05);
}

#[test]
fn elapsed_is_monotonic() {
    let clock = FrameClock::start();
    let mut last = clock.elapsed();
    for _ in 0..5 {
        let now = clock.elapsed();
        assert!(now >= last);
        last = now;
    }
}

#[test]
fn elapsed_advances_with_wall_time() {
    let clock = FrameClock::start();
    sleep(Duration::from_millis(20));
    assert!(clock.elapsed() >= 0.01);
}
