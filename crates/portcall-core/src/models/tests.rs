use std::collections::BTreeSet;

use jiff::{civil::date, Timestamp};

use crate::models::{Plan, PlanSummary, Stop};

fn three_port_plan(stop_count: usize) -> Plan {
    let route = vec![
        "Vladivostok".to_string(),
        "Korsakov (Sakhalin)".to_string(),
        "Nevelsk".to_string(),
    ];
    let stops = (0..stop_count)
        .map(|i| Stop::scheduled(route[i % 3].as_str(), date(2026, 1, 1), date(2026, 1, 2)))
        .collect();
    Plan {
        id: 11,
        ship: "Russky Vostok".to_string(),
        route,
        start_date: date(2026, 1, 1),
        end_date: date(2026, 2, 1),
        stops,
        frozen_periods: BTreeSet::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

#[test]
fn test_periods_follow_route_length() {
    let plan = three_port_plan(7);

    assert_eq!(plan.period_of(0), 0);
    assert_eq!(plan.period_of(2), 0);
    assert_eq!(plan.period_of(3), 1);
    assert_eq!(plan.period_of(6), 2);
    assert_eq!(plan.period_count(), 3);
    assert_eq!(plan.max_period(), Some(2));
}

#[test]
fn test_empty_plan_has_no_periods() {
    let plan = three_port_plan(0);
    assert_eq!(plan.period_count(), 0);
    assert_eq!(plan.max_period(), None);
}

#[test]
fn test_protection_requires_dated_or_skipped_stop() {
    let mut plan = three_port_plan(6);
    plan.frozen_periods.insert(1);
    plan.stops[4].clear();
    plan.stops[5].skip();

    assert!(!plan.is_protected(0));
    assert!(plan.is_protected(3));
    assert!(!plan.is_protected(4));
    assert!(plan.is_protected(5));
    assert!(!plan.is_protected(99));
}

#[test]
fn test_stop_state_helpers() {
    let mut stop = Stop::scheduled("Nevelsk", date(2026, 1, 1), date(2026, 1, 3));
    assert!(stop.is_dated());

    stop.skip();
    assert!(stop.skipped);
    assert!(!stop.has_any_date());

    stop.clear();
    assert!(!stop.skipped);
    assert_eq!(stop, Stop::undated("Nevelsk"));

    stop.arrival = Some(date(2026, 1, 1));
    assert!(stop.has_any_date());
    assert!(!stop.is_dated());
}

#[test]
fn test_summary_counts() {
    let mut plan = three_port_plan(5);
    plan.stops[1].skip();
    plan.stops[4].skip();
    plan.frozen_periods.insert(0);

    let summary = PlanSummary::from(&plan);
    assert_eq!(summary.total_stops, 5);
    assert_eq!(summary.skipped_stops, 2);
    assert_eq!(summary.frozen_periods, 1);
    assert_eq!(summary.route.len(), 3);
}

#[test]
fn test_plan_serializes_dates_as_days() {
    let plan = three_port_plan(1);
    let json = serde_json::to_value(&plan).unwrap();

    assert_eq!(json["start_date"], "2026-01-01");
    assert_eq!(json["stops"][0]["departure"], "2026-01-02");
    assert_eq!(json["stops"][0]["skipped"], false);
}
