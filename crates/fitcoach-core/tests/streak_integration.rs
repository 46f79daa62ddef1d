//! Integration tests for the check-in streak tracker.
//!
//! Scenario tests for the documented streak rules plus property tests over
//! arbitrary marker sets.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use fitcoach_core::streak::streak_length;
use fitcoach_core::StreakTracker;
use proptest::prelude::*;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn noon(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap())
}

#[test]
fn test_same_day_check_in_twice() {
    let tracker = StreakTracker::new();
    let today = day(2024, 5, 1);

    let first = tracker.check_in_at("client-1", noon(today));
    let streak_after_first = tracker.get_streak("client-1");
    let second = tracker.check_in_at("client-1", noon(today) + Duration::hours(3));

    assert_eq!(first, second);
    assert_eq!(first, today.and_time(NaiveTime::MIN));
    assert_eq!(tracker.total_check_in_days("client-1"), 1);
    assert_eq!(tracker.get_streak("client-1"), streak_after_first);
}

#[test]
fn test_gap_rule() {
    let tracker = StreakTracker::new();
    let d = day(2024, 5, 10);
    for offset in [0, 1, 2, 4] {
        tracker.check_in_on("client-1", d - Duration::days(offset));
    }
    assert_eq!(tracker.get_streak("client-1"), 3);
    assert_eq!(
        tracker.get_last_check_in("client-1"),
        Some(d.and_time(NaiveTime::MIN))
    );
}

#[test]
fn test_zero_and_one_marker() {
    let tracker = StreakTracker::new();
    assert_eq!(tracker.get_streak("client-1"), 0);
    tracker.check_in_on("client-1", day(2024, 5, 1));
    assert_eq!(tracker.get_streak("client-1"), 1);
}

#[test]
fn test_reset_same_day_as_check_in() {
    let tracker = StreakTracker::new();
    let now = noon(day(2024, 5, 1));
    tracker.check_in_at("client-1", now);
    assert!(tracker.has_checked_in_on("client-1", now));

    tracker.reset_streak("client-1");
    assert_eq!(tracker.get_streak("client-1"), 0);
    assert!(!tracker.has_checked_in_on("client-1", now));

    // Checking in again after a reset starts a fresh streak.
    tracker.check_in_at("client-1", now);
    assert_eq!(tracker.get_streak("client-1"), 1);
}

#[test]
fn test_wall_clock_check_in() {
    let tracker = StreakTracker::new();
    let marker = tracker.check_in("client-1");
    assert_eq!(marker.time(), NaiveTime::MIN);
    assert!(tracker.has_checked_in_today("client-1"));
    assert_eq!(tracker.get_streak("client-1"), 1);
}

fn arb_days() -> impl Strategy<Value = Vec<NaiveDate>> {
    prop::collection::vec(0i64..60, 0..40).prop_map(|offsets| {
        let base = day(2024, 1, 1);
        offsets
            .into_iter()
            .map(|o| base + Duration::days(o))
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_streak_never_exceeds_distinct_days(days in arb_days()) {
        let mut distinct = days.clone();
        distinct.sort();
        distinct.dedup();
        let streak = streak_length(&days) as usize;
        prop_assert!(streak <= distinct.len());
        prop_assert_eq!(streak == 0, distinct.is_empty());
    }

    #[test]
    fn prop_streak_ignores_arrival_order(days in arb_days()) {
        let mut reversed = days.clone();
        reversed.reverse();
        prop_assert_eq!(streak_length(&days), streak_length(&reversed));
    }

    #[test]
    fn prop_repeated_check_ins_are_idempotent(days in arb_days()) {
        let tracker = StreakTracker::new();
        for d in &days {
            tracker.check_in_on("u", *d);
        }
        let streak = tracker.get_streak("u");
        let total = tracker.total_check_in_days("u");
        for d in &days {
            tracker.check_in_on("u", *d);
        }
        prop_assert_eq!(tracker.get_streak("u"), streak);
        prop_assert_eq!(tracker.total_check_in_days("u"), total);
    }

    #[test]
    fn prop_next_day_extends_streak(days in arb_days()) {
        prop_assume!(!days.is_empty());
        let latest = *days.iter().max().unwrap();
        let mut extended = days.clone();
        extended.push(latest + Duration::days(1));
        prop_assert_eq!(streak_length(&extended), streak_length(&days) + 1);
    }
}
