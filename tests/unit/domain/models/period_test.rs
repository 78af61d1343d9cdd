// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use teamup::domain::models::period::Period;

fn ts(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap()
}

fn period(start: &str, end: &str) -> Period {
    Period::new(ts(start), ts(end))
}

#[test]
fn test_period_validity() {
    assert!(period("2024-01-01T10:00:00+09:00", "2024-01-01T12:00:00+09:00").is_valid());
    // 开始时间等于或晚于结束时间都无效
    assert!(!period("2024-01-01T12:00:00+09:00", "2024-01-01T12:00:00+09:00").is_valid());
    assert!(!period("2024-01-01T13:00:00+09:00", "2024-01-01T12:00:00+09:00").is_valid());
}

#[test]
fn test_containment_is_boundary_inclusive() {
    let window = period("2024-01-01T10:00:00+09:00", "2024-01-01T12:00:00+09:00");

    // 完全相同的时间段视为包含
    assert!(window.is_in_range(&window));
    // 内缩的时间段包含
    assert!(window.is_in_range(&period(
        "2024-01-01T10:30:00+09:00",
        "2024-01-01T11:30:00+09:00"
    )));
}

#[test]
fn test_containment_rejects_overflow_on_either_side() {
    let window = period("2024-01-01T10:00:00+09:00", "2024-01-01T12:00:00+09:00");

    assert!(!window.is_in_range(&period(
        "2024-01-01T09:59:00+09:00",
        "2024-01-01T11:00:00+09:00"
    )));
    assert!(!window.is_in_range(&period(
        "2024-01-01T11:00:00+09:00",
        "2024-01-01T12:01:00+09:00"
    )));
    assert!(!window.is_in_range(&period(
        "2024-01-01T09:00:00+09:00",
        "2024-01-01T13:00:00+09:00"
    )));
}

#[test]
fn test_containment_compares_instants_across_offsets() {
    let window = period("2024-01-01T10:00:00+09:00", "2024-01-01T12:00:00+09:00");
    // 01:30 UTC == 10:30 +09:00
    let candidate = period("2024-01-01T01:30:00+00:00", "2024-01-01T02:30:00+00:00");
    assert!(window.is_in_range(&candidate));
}
