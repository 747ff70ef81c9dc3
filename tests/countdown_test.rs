//! Countdown engine tests
//!
//! Release boundaries of the 15-day cycle, rollover, skipped ticks and
//! instants before the schedule anchor.

use chrono::{DateTime, Duration, TimeZone, Utc};
use redlotus::countdown::{default_anchor, CountdownEngine, Remaining, CYCLE_DAYS};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

// =============================================================================
// Boundaries
// =============================================================================

#[test]
fn test_anchor_is_first_boundary() {
    let engine = CountdownEngine::standard();
    assert_eq!(engine.anchor(), at(2024, 1, 1, 0, 0, 0));
    assert_eq!(engine.cycle(), Duration::days(CYCLE_DAYS));
    assert_eq!(engine.next_boundary(default_anchor()), default_anchor());
}

#[test]
fn test_twenty_days_after_anchor() {
    let mut engine = CountdownEngine::standard();
    let remaining = engine.tick(default_anchor() + Duration::days(20));
    assert_eq!(engine.target(), Some(default_anchor() + Duration::days(30)));
    assert_eq!(remaining.days, 10);
    assert_eq!(remaining.total_seconds(), 10 * 86_400);
}

#[test]
fn test_remaining_always_within_one_cycle() {
    let mut engine = CountdownEngine::standard();
    let cycle_secs = CYCLE_DAYS * 86_400;
    // Sample across a year at an awkward stride
    let mut now = default_anchor() + Duration::seconds(1);
    for _ in 0..400 {
        let remaining = engine.tick(now);
        assert!(remaining.total_seconds() < cycle_secs);
        let target = engine.target().unwrap();
        assert!(target >= now);
        assert_eq!((target - default_anchor()).num_seconds() % cycle_secs, 0);
        now += Duration::seconds(78_901);
    }
}

#[test]
fn test_display_format() {
    let remaining = Remaining {
        days: 3,
        hours: 4,
        minutes: 5,
        seconds: 6,
    };
    assert_eq!(remaining.to_string(), "03 : 04 : 05 : 06");
    assert_eq!(Remaining::default().to_string(), "00 : 00 : 00 : 00");
}

#[test]
fn test_sub_second_remainder_truncated() {
    assert_eq!(Remaining::from_millis(1_999).seconds, 1);
    assert!(Remaining::from_millis(999).is_zero());
    assert!(Remaining::from_millis(-5_000).is_zero());
}

// =============================================================================
// Ticking
// =============================================================================

#[test]
fn test_rollover_after_boundary() {
    let mut engine = CountdownEngine::standard();
    let boundary = at(2024, 1, 16, 0, 0, 0);

    assert_eq!(engine.tick(boundary - Duration::seconds(1)).total_seconds(), 1);
    assert!(engine.tick(boundary).is_zero());
    assert_eq!(engine.target(), Some(boundary));

    let remaining = engine.tick(boundary + Duration::seconds(1));
    assert_eq!(engine.target(), Some(boundary + Duration::days(CYCLE_DAYS)));
    assert_eq!(remaining.total_seconds(), CYCLE_DAYS * 86_400 - 1);
}

#[test]
fn test_skipped_ticks_do_not_drift() {
    // A suspended process wakes up several cycles later
    let mut engine = CountdownEngine::standard();
    engine.tick(at(2024, 1, 2, 0, 0, 0));
    let remaining = engine.tick(at(2024, 3, 1, 12, 0, 0));

    // Boundaries: Jan 1, 16, 31, Feb 15, Mar 1, Mar 16
    assert_eq!(engine.target(), Some(at(2024, 3, 16, 0, 0, 0)));
    assert_eq!(remaining.days, 14);
    assert_eq!(remaining.hours, 12);
}

#[test]
fn test_before_anchor_counts_to_anchor() {
    let mut engine = CountdownEngine::standard();
    let remaining = engine.tick(at(2023, 12, 1, 0, 0, 0));
    assert_eq!(engine.target(), Some(default_anchor()));
    assert_eq!(remaining.days, 31);
}

#[test]
fn test_custom_cycle() {
    let anchor = at(2025, 6, 1, 18, 0, 0);
    let mut engine = CountdownEngine::new(anchor, Duration::hours(1));
    let remaining = engine.tick(anchor + Duration::minutes(90));
    assert_eq!(engine.target(), Some(anchor + Duration::hours(2)));
    assert_eq!(remaining.minutes, 30);

    // Non-positive cycles fall back to one second
    let engine = CountdownEngine::new(anchor, Duration::zero());
    assert_eq!(engine.cycle(), Duration::seconds(1));
}

#[test]
fn test_clock_stepping_backwards_retargets() {
    let mut engine = CountdownEngine::standard();
    engine.tick(default_anchor() + Duration::days(20));
    assert_eq!(engine.target(), Some(default_anchor() + Duration::days(30)));

    // Wall clock corrected back into the first cycle
    let remaining = engine.tick(default_anchor() + Duration::days(1));
    assert_eq!(engine.target(), Some(default_anchor() + Duration::days(15)));
    assert_eq!(remaining.days, 14);
    assert!(remaining.total_seconds() < CYCLE_DAYS * 86_400);
}
