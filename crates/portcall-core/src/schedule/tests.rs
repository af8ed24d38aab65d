use std::collections::BTreeSet;

use jiff::{
    civil::{date, Date},
    Timestamp,
};

use super::*;
use crate::{
    error::PlannerError,
    models::{Plan, Stop},
    timing::TimingRules,
};

fn route() -> Vec<String> {
    vec!["Vladivostok".to_string(), "Korsakov".to_string()]
}

fn rules() -> TimingRules {
    TimingRules::with_defaults(route())
}

fn start() -> Date {
    date(2026, 1, 1)
}

fn plan_with(stops: Vec<Stop>) -> Plan {
    Plan {
        id: 1,
        ship: "Anatoly Ivanov".to_string(),
        route: route(),
        start_date: start(),
        end_date: date(2026, 1, 11),
        stops,
        frozen_periods: BTreeSet::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// Four stops: V 01-01..02, K 01-04..05, V 01-07..08, K 01-10..11.
fn generated_plan() -> Plan {
    plan_with(generate(&route(), start(), &rules(), 10).unwrap())
}

fn dates(stop: &Stop) -> (Option<Date>, Option<Date>) {
    (stop.arrival, stop.departure)
}

fn dated(arrival: Date, departure: Date) -> (Option<Date>, Option<Date>) {
    (Some(arrival), Some(departure))
}

#[test]
fn test_generate_two_port_route() {
    let stops = generate(&route(), start(), &rules(), 7).unwrap();

    assert_eq!(stops.len(), 3);
    assert_eq!(stops[0], Stop::scheduled("Vladivostok", date(2026, 1, 1), date(2026, 1, 2)));
    assert_eq!(stops[1], Stop::scheduled("Korsakov", date(2026, 1, 4), date(2026, 1, 5)));
    assert_eq!(stops[2], Stop::scheduled("Vladivostok", date(2026, 1, 7), date(2026, 1, 8)));
}

#[test]
fn test_generate_is_monotonic_and_follows_route() {
    let stops = generate(&route(), start(), &rules(), 365).unwrap();
    let limit = date(2027, 1, 1);

    for (index, stop) in stops.iter().enumerate() {
        assert_eq!(stop.port, route()[index % 2]);
        assert!(stop.departure.unwrap() >= stop.arrival.unwrap());
    }
    for pair in stops.windows(2) {
        assert!(pair[1].arrival.unwrap() >= pair[0].departure.unwrap());
    }
    let last = stops.last().unwrap().departure.unwrap();
    assert!(last >= limit);
    let before_last = stops[stops.len() - 2].departure.unwrap();
    assert!(before_last < limit);
}

#[test]
fn test_generate_degenerate_route_terminates() {
    let mut rules = rules();
    for from in route() {
        for to in route() {
            rules.set_transition(&from, &to, 0).unwrap();
        }
        rules.set_stay(&from, 0).unwrap();
    }

    let stops = generate(&route(), start(), &rules, 3).unwrap();
    assert_eq!(stops.len(), 8);
    assert!(stops.iter().all(|s| s.arrival == Some(start())));
}

#[test]
fn test_generate_rejects_bad_input() {
    let short = vec!["Vladivostok".to_string()];
    assert!(generate(&short, start(), &rules(), 10).unwrap_err().is_validation());

    let unknown = vec!["Vladivostok".to_string(), "Atlantis".to_string()];
    assert!(generate(&unknown, start(), &rules(), 10).unwrap_err().is_validation());

    assert!(generate(&route(), start(), &rules(), 0).unwrap_err().is_validation());
}

#[test]
fn test_empty_batch_round_trips() {
    let plan = generated_plan();
    let result = reconcile(&plan, &EditBatch::new(), &rules()).unwrap();

    assert_eq!(result.stops, plan.stops);
    assert_eq!(result.count(StopClass::Derived), plan.stops.len());
}

#[test]
fn test_anchor_redrives_following_stops() {
    let plan = generated_plan();
    let mut edits = EditBatch::new();
    edits.insert(1, StopEdit::dated(date(2026, 1, 6), date(2026, 1, 8)));

    let result = reconcile(&plan, &edits, &rules()).unwrap();

    assert_eq!(result.classes[1], StopClass::Anchored);
    assert_eq!(dates(&result.stops[0]), dates(&plan.stops[0]));
    assert_eq!(dates(&result.stops[1]), dated(date(2026, 1, 6), date(2026, 1, 8)));
    assert_eq!(dates(&result.stops[2]), dated(date(2026, 1, 10), date(2026, 1, 11)));
    assert_eq!(dates(&result.stops[3]), dated(date(2026, 1, 13), date(2026, 1, 14)));
}

#[test]
fn test_reconcile_is_deterministic() {
    let plan = generated_plan();
    let mut edits = EditBatch::new();
    edits.insert(2, StopEdit::dated(date(2026, 1, 9), date(2026, 1, 9)));

    let first = reconcile(&plan, &edits, &rules()).unwrap();
    let second = reconcile(&plan, &edits, &rules()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unchanged_edit_is_derived() {
    let plan = generated_plan();
    let mut edits = EditBatch::new();
    edits.insert(1, StopEdit::dated(date(2026, 1, 4), date(2026, 1, 5)));

    let result = reconcile(&plan, &edits, &rules()).unwrap();
    assert_eq!(result.classes[1], StopClass::Derived);
    assert_eq!(result.stops, plan.stops);
}

#[test]
fn test_skip_chains_next_stop_from_previous() {
    let plan = generated_plan();
    let mut edits = EditBatch::new();
    edits.insert(1, StopEdit::skip());

    let result = reconcile(&plan, &edits, &rules()).unwrap();

    assert_eq!(result.classes[1], StopClass::Skipped);
    assert!(result.stops[1].skipped);
    assert_eq!(dates(&result.stops[1]), (None, None));
    // Vladivostok to Vladivostok takes no days
    assert_eq!(dates(&result.stops[2]), dated(date(2026, 1, 2), date(2026, 1, 3)));
    assert_eq!(dates(&result.stops[3]), dated(date(2026, 1, 5), date(2026, 1, 6)));
}

#[test]
fn test_skip_is_idempotent() {
    let mut plan = generated_plan();
    let mut edits = EditBatch::new();
    edits.insert(1, StopEdit::skip());

    let once = reconcile(&plan, &edits, &rules()).unwrap();
    plan.stops = once.stops.clone();
    let twice = reconcile(&plan, &edits, &rules()).unwrap();

    assert_eq!(once.stops, twice.stops);
    assert!(twice.stops[1].skipped);
}

#[test]
fn test_skipping_first_stop_keeps_start_date() {
    let plan = generated_plan();
    let mut edits = EditBatch::new();
    edits.insert(0, StopEdit::skip());

    let result = reconcile(&plan, &edits, &rules()).unwrap();
    assert!(result.stops[0].skipped);
    assert_eq!(dates(&result.stops[1]), dated(date(2026, 1, 1), date(2026, 1, 2)));
}

#[test]
fn test_empty_edit_on_undated_stop_does_not_skip() {
    let mut plan = generated_plan();
    plan.stops.iter_mut().for_each(Stop::clear);
    let mut edits = EditBatch::new();
    edits.insert(1, StopEdit::skip());

    let result = reconcile(&plan, &edits, &rules()).unwrap();

    assert!(!result.stops[1].skipped);
    assert_eq!(result.stops, generated_plan().stops);
}

#[test]
fn test_dated_edit_unskips_stop() {
    let mut plan = generated_plan();
    plan.stops[1].skip();
    let mut edits = EditBatch::new();
    edits.insert(1, StopEdit::dated(date(2026, 1, 4), date(2026, 1, 5)));

    let result = reconcile(&plan, &edits, &rules()).unwrap();
    assert!(!result.stops[1].skipped);
    assert_eq!(result.classes[1], StopClass::Anchored);
}

#[test]
fn test_frozen_period_is_protected() {
    let mut plan = generated_plan();
    plan.frozen_periods.insert(0);
    let mut edits = EditBatch::new();
    edits.insert(1, StopEdit::dated(date(2026, 2, 1), date(2026, 2, 2)));
    edits.insert(2, StopEdit::dated(date(2026, 1, 9), date(2026, 1, 10)));

    let result = reconcile(&plan, &edits, &rules()).unwrap();

    assert_eq!(result.classes[0], StopClass::Frozen);
    assert_eq!(result.classes[1], StopClass::Frozen);
    assert_eq!(result.stops[..2], plan.stops[..2]);
    assert_eq!(dates(&result.stops[3]), dated(date(2026, 1, 12), date(2026, 1, 13)));
}

#[test]
fn test_frozen_stops_survive_rule_changes() {
    let mut plan = generated_plan();
    plan.frozen_periods.insert(0);
    let mut rules = rules();
    rules.set_transition("Vladivostok", "Korsakov", 5).unwrap();
    rules.set_transition("Korsakov", "Vladivostok", 3).unwrap();

    let result = reconcile(&plan, &EditBatch::new(), &rules).unwrap();

    assert_eq!(result.stops[..2], plan.stops[..2]);
    assert_eq!(dates(&result.stops[2]), dated(date(2026, 1, 8), date(2026, 1, 9)));
    assert_eq!(dates(&result.stops[3]), dated(date(2026, 1, 14), date(2026, 1, 15)));
}

#[test]
fn test_frozen_period_with_undated_stop_is_not_protected() {
    let mut plan = generated_plan();
    plan.stops[1].clear();
    plan.frozen_periods.insert(0);

    let result = reconcile(&plan, &EditBatch::new(), &rules()).unwrap();
    assert_eq!(result.classes[1], StopClass::Derived);
    assert_eq!(dates(&result.stops[1]), dated(date(2026, 1, 4), date(2026, 1, 5)));
}

#[test]
fn test_batch_validation() {
    let plan = generated_plan();

    let mut out_of_range = EditBatch::new();
    out_of_range.insert(4, StopEdit::skip());
    assert!(matches!(
        reconcile(&plan, &out_of_range, &rules()),
        Err(PlannerError::StopNotFound { plan_id: 1, index: 4 })
    ));

    let mut partial = EditBatch::new();
    partial.insert(1, StopEdit { arrival: Some(date(2026, 1, 4)), departure: None });
    assert!(reconcile(&plan, &partial, &rules()).unwrap_err().is_validation());

    let mut reversed = EditBatch::new();
    reversed.insert(1, StopEdit::dated(date(2026, 1, 5), date(2026, 1, 4)));
    assert!(reconcile(&plan, &reversed, &rules()).unwrap_err().is_validation());
}

#[test]
fn test_stop_edit_parse() {
    let edit = StopEdit::parse("2026-01-04", "2026-01-05").unwrap();
    assert_eq!(edit, StopEdit::dated(date(2026, 1, 4), date(2026, 1, 5)));
    assert!(StopEdit::parse("", "").unwrap().is_skip());
    assert!(StopEdit::parse("2026-01-04", "").is_err());
    assert!(StopEdit::parse("04.01.2026", "2026-01-05").is_err());
}

#[test]
fn test_shift_moves_following_stops() {
    let plan = generated_plan();
    let result = shift_stop(&plan, 1, None, Some(date(2026, 1, 10)), true).unwrap();

    assert_eq!(result.shift_days, 5);
    assert_eq!(result.stops[0], plan.stops[0]);
    assert_eq!(dates(&result.stops[1]), dated(date(2026, 1, 4), date(2026, 1, 10)));
    assert_eq!(dates(&result.stops[2]), dated(date(2026, 1, 12), date(2026, 1, 13)));
    assert_eq!(dates(&result.stops[3]), dated(date(2026, 1, 15), date(2026, 1, 16)));
}

#[test]
fn test_shift_falls_back_to_arrival_delta() {
    let plan = generated_plan();
    let result = shift_stop(&plan, 1, Some(date(2026, 1, 3)), None, true).unwrap();

    assert_eq!(result.shift_days, -1);
    assert_eq!(dates(&result.stops[1]), dated(date(2026, 1, 3), date(2026, 1, 5)));
    assert_eq!(dates(&result.stops[2]), dated(date(2026, 1, 6), date(2026, 1, 7)));
}

#[test]
fn test_shift_without_propagation() {
    let plan = generated_plan();
    let result = shift_stop(&plan, 1, None, Some(date(2026, 1, 6)), false).unwrap();

    assert_eq!(result.shift_days, 0);
    assert_eq!(result.stops[2..], plan.stops[2..]);
}

#[test]
fn test_shift_leaves_frozen_and_skipped_stops() {
    let mut plan = generated_plan();
    plan.frozen_periods.insert(1);
    let result = shift_stop(&plan, 1, None, Some(date(2026, 1, 10)), true).unwrap();
    assert_eq!(result.stops[2..], plan.stops[2..]);

    let mut plan = generated_plan();
    plan.stops[2].skip();
    let result = shift_stop(&plan, 1, None, Some(date(2026, 1, 10)), true).unwrap();
    assert!(result.stops[2].skipped);
    assert_eq!(dates(&result.stops[2]), (None, None));
    assert_eq!(dates(&result.stops[3]), dated(date(2026, 1, 15), date(2026, 1, 16)));
}

#[test]
fn test_shift_errors() {
    let plan = generated_plan();
    assert!(matches!(
        shift_stop(&plan, 9, None, Some(date(2026, 1, 10)), true),
        Err(PlannerError::StopNotFound { index: 9, .. })
    ));
    assert!(shift_stop(&plan, 1, None, None, true).unwrap_err().is_validation());
    assert!(shift_stop(&plan, 1, Some(date(2026, 1, 6)), None, true)
        .unwrap_err()
        .is_validation());

    let mut frozen = generated_plan();
    frozen.frozen_periods.insert(0);
    assert!(shift_stop(&frozen, 1, None, Some(date(2026, 1, 10)), true)
        .unwrap_err()
        .is_validation());

    let mut undated = generated_plan();
    undated.stops[1].clear();
    assert!(shift_stop(&undated, 1, None, Some(date(2026, 1, 10)), true)
        .unwrap_err()
        .is_validation());
}

#[test]
fn test_frozen_period_set() {
    let plan = generated_plan();

    let periods = frozen_period_set(&plan, &[1, 1, 0]).unwrap();
    assert_eq!(periods, BTreeSet::from([0, 1]));
    assert!(frozen_period_set(&plan, &[]).unwrap().is_empty());
    assert!(frozen_period_set(&plan, &[2]).unwrap_err().is_validation());

    let empty = plan_with(Vec::new());
    assert!(frozen_period_set(&empty, &[0]).unwrap_err().is_validation());
}

#[test]
fn test_table_projection() {
    let mut plan = generated_plan();
    plan.stops.truncate(3);
    plan.stops[1].skip();
    plan.frozen_periods.insert(0);

    let table = ScheduleTable::build(&plan);

    assert_eq!(table.ports, route());
    assert_eq!(table.period_count(), 2);
    assert!(table.rows[0].frozen);
    assert_eq!(
        table.rows[0].cells[1],
        ScheduleCell::Stop { index: 1, arrival: None, departure: None, skipped: true }
    );
    assert_eq!(
        table.rows[1].cells[0],
        ScheduleCell::Stop {
            index: 2,
            arrival: Some(date(2026, 1, 7)),
            departure: Some(date(2026, 1, 8)),
            skipped: false,
        }
    );
    assert!(table.rows[1].cells[1].is_placeholder());
    assert_eq!(table.placeholder, PLACEHOLDER);
}

#[test]
fn test_table_repeated_port_uses_later_stop() {
    let mut plan = plan_with(vec![
        Stop::undated("Vladivostok"),
        Stop::undated("Korsakov"),
        Stop::undated("Vladivostok"),
        Stop::undated("Vladivostok"),
    ]);
    plan.route = vec![
        "Vladivostok".to_string(),
        "Korsakov".to_string(),
        "Vladivostok".to_string(),
    ];

    let table = ScheduleTable::build_with_placeholder(&plan, "-");

    assert_eq!(table.ports.len(), 2);
    assert!(matches!(table.rows[0].cells[0], ScheduleCell::Stop { index: 2, .. }));
    assert!(matches!(table.rows[1].cells[0], ScheduleCell::Stop { index: 3, .. }));
    assert!(table.rows[1].cells[1].is_placeholder());
    assert_eq!(table.placeholder, "-");
}
