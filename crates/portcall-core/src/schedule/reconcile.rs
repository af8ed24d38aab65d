//! Merging manual date edits into an existing timetable.
//!
//! Two edit paths exist:
//!
//! - [`reconcile`] takes a batch of `index -> (arrival, departure)` edits,
//!   classifies every stop once into a [`StopClass`], then rebuilds all
//!   derived stops in a single left-to-right sweep. Frozen and anchored stops
//!   are pivots: everything after a pivot is re-derived from it.
//! - [`shift_stop`] edits one stop and translates every following stop by the
//!   same number of days, without re-deriving anything.
//!
//! Both work on a copy of the stops and hand back the new sequence; the
//! caller swaps it in only after the whole pass has succeeded.

use std::collections::{BTreeMap, BTreeSet};

use jiff::civil::Date;
use log::debug;

use crate::{
    dates::{add_days, days_between, parse_optional_date},
    error::{PlannerError, Result},
    models::{Plan, Stop},
    timing::TimingRules,
};

/// A manual edit for one stop. Both dates set pins the stop, both empty
/// requests a skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StopEdit {
    pub arrival: Option<Date>,
    pub departure: Option<Date>,
}

impl StopEdit {
    /// An edit pinning both dates.
    pub fn dated(arrival: Date, departure: Date) -> Self {
        Self {
            arrival: Some(arrival),
            departure: Some(departure),
        }
    }

    /// An edit asking to skip the port call.
    pub fn skip() -> Self {
        Self::default()
    }

    /// Parses wire-format dates, where the empty string means "no date".
    pub fn parse(arrival: &str, departure: &str) -> Result<Self> {
        let edit = Self {
            arrival: parse_optional_date("arrival", arrival)?,
            departure: parse_optional_date("departure", departure)?,
        };
        edit.validate()?;
        Ok(edit)
    }

    /// Whether this edit asks for a skip.
    pub fn is_skip(&self) -> bool {
        self.arrival.is_none() && self.departure.is_none()
    }

    /// Rejects half-filled edits and departures before arrivals.
    pub fn validate(&self) -> Result<()> {
        match (self.arrival, self.departure) {
            (Some(arrival), Some(departure)) if departure < arrival => {
                Err(PlannerError::invalid_input("departure").with_reason(format!(
                    "Departure {departure} is earlier than arrival {arrival}"
                )))
            }
            (Some(_), None) | (None, Some(_)) => Err(PlannerError::invalid_input("dates")
                .with_reason(
                    "Give both arrival and departure, or clear both to skip the port",
                )),
            _ => Ok(()),
        }
    }
}

/// Batch of manual edits keyed by stop index.
pub type EditBatch = BTreeMap<usize, StopEdit>;

/// Role a stop plays in one reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopClass {
    /// Dropped from the voyage; ignored by the chain
    Skipped,
    /// Inside a frozen period and already dated; read-only pivot
    Frozen,
    /// Explicitly re-dated by this batch; pivot with the submitted dates
    Anchored,
    /// Recomputed from the nearest preceding pivot
    Derived,
}

/// Result of a reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    /// The rebuilt stop sequence
    pub stops: Vec<Stop>,
    /// Classification of every stop, aligned with `stops`
    pub classes: Vec<StopClass>,
}

impl Reconciled {
    /// Number of stops in the given class.
    pub fn count(&self, class: StopClass) -> usize {
        self.classes.iter().filter(|c| **c == class).count()
    }
}

/// Result of a single-stop edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shifted {
    /// The stop sequence after the edit
    pub stops: Vec<Stop>,
    /// Days every following stop moved by (0 when nothing propagated)
    pub shift_days: i64,
}

/// Applies a batch of edits and re-derives every stop that is neither
/// frozen, anchored nor skipped.
///
/// # Errors
///
/// - `PlannerError::StopNotFound` for an edit index outside the plan
/// - `PlannerError::InvalidInput` for half-filled edits or a departure
///   before the arrival
///
/// The plan itself is never modified.
pub fn reconcile(plan: &Plan, edits: &EditBatch, rules: &TimingRules) -> Result<Reconciled> {
    for (&index, edit) in edits {
        if index >= plan.stops.len() {
            return Err(PlannerError::StopNotFound {
                plan_id: plan.id,
                index,
            });
        }
        edit.validate()?;
    }

    let (mut stops, classes) = classify(plan, edits);
    sweep(&mut stops, &classes, plan.start_date, rules)?;

    let reconciled = Reconciled { stops, classes };
    debug!(
        "Reconciled plan {}: {} anchored, {} frozen, {} skipped, {} derived",
        plan.id,
        reconciled.count(StopClass::Anchored),
        reconciled.count(StopClass::Frozen),
        reconciled.count(StopClass::Skipped),
        reconciled.count(StopClass::Derived)
    );
    Ok(reconciled)
}

/// Applies the batch to a copy of the stops and tags each one.
///
/// Protection is decided from the stops as they were before the batch, so an
/// edit aimed at a frozen stop is ignored.
fn classify(plan: &Plan, edits: &EditBatch) -> (Vec<Stop>, Vec<StopClass>) {
    let mut stops = plan.stops.clone();
    let mut classes = Vec::with_capacity(stops.len());

    for (index, stop) in stops.iter_mut().enumerate() {
        let class = if plan.is_protected(index) {
            if stop.skipped {
                StopClass::Skipped
            } else {
                StopClass::Frozen
            }
        } else if let Some(edit) = edits.get(&index) {
            apply_edit(stop, edit)
        } else if stop.skipped {
            StopClass::Skipped
        } else {
            StopClass::Derived
        };
        classes.push(class);
    }

    (stops, classes)
}

fn apply_edit(stop: &mut Stop, edit: &StopEdit) -> StopClass {
    if edit.is_skip() {
        if stop.has_any_date() || stop.skipped {
            stop.skip();
            return StopClass::Skipped;
        }
        stop.skipped = false;
        return StopClass::Derived;
    }

    let changed = edit.arrival != stop.arrival || edit.departure != stop.departure;
    stop.arrival = edit.arrival;
    stop.departure = edit.departure;
    stop.skipped = false;
    if changed {
        StopClass::Anchored
    } else {
        StopClass::Derived
    }
}

fn sweep(
    stops: &mut [Stop],
    classes: &[StopClass],
    start_date: Date,
    rules: &TimingRules,
) -> Result<()> {
    let mut prev_port: Option<String> = None;
    let mut current_departure = start_date;

    for (index, (stop, class)) in stops.iter_mut().zip(classes).enumerate() {
        match class {
            StopClass::Skipped => continue,
            StopClass::Frozen | StopClass::Anchored => {
                let Some(departure) = stop.departure else {
                    return Err(PlannerError::invalid_input("stops")
                        .with_reason(format!("Pinned stop {index} has no departure date")));
                };
                current_departure = departure;
            }
            StopClass::Derived => {
                let arrival = match prev_port.as_deref() {
                    None => current_departure,
                    Some(prev) => add_days(
                        current_departure,
                        i64::from(rules.transition(prev, &stop.port)?),
                    )?,
                };
                let departure = add_days(arrival, i64::from(rules.stay(&stop.port)))?;
                stop.arrival = Some(arrival);
                stop.departure = Some(departure);
                current_departure = departure;
            }
        }
        prev_port = Some(stop.port.clone());
    }

    Ok(())
}

/// Re-dates one stop and, with `propagate`, moves every following dated
/// stop by the same number of days.
///
/// The shift is the change in departure, or the change in arrival when the
/// departure did not move. Stops protected by a frozen period are neither
/// editable nor moved.
pub fn shift_stop(
    plan: &Plan,
    index: usize,
    arrival: Option<Date>,
    departure: Option<Date>,
    propagate: bool,
) -> Result<Shifted> {
    let Some(stop) = plan.stops.get(index) else {
        return Err(PlannerError::StopNotFound {
            plan_id: plan.id,
            index,
        });
    };
    if plan.is_protected(index) {
        return Err(PlannerError::invalid_input("index").with_reason(format!(
            "Stop {index} belongs to frozen period {}",
            plan.period_of(index)
        )));
    }
    let (Some(old_arrival), Some(old_departure)) = (stop.arrival, stop.departure) else {
        return Err(PlannerError::invalid_input("index").with_reason(format!(
            "Stop {index} has no dates to move; re-date it with a batch edit"
        )));
    };
    if arrival.is_none() && departure.is_none() {
        return Err(PlannerError::invalid_input("dates")
            .with_reason("Give a new arrival, a new departure, or both"));
    }

    let new_arrival = arrival.unwrap_or(old_arrival);
    let new_departure = departure.unwrap_or(old_departure);
    StopEdit::dated(new_arrival, new_departure).validate()?;

    let mut stops = plan.stops.clone();
    stops[index].arrival = Some(new_arrival);
    stops[index].departure = Some(new_departure);

    let mut shift_days = 0;
    if propagate {
        shift_days = days_between(old_departure, new_departure)?;
        if shift_days == 0 {
            shift_days = days_between(old_arrival, new_arrival)?;
        }
        if shift_days != 0 {
            translate(plan, &mut stops, index + 1, shift_days)?;
        }
    }

    debug!(
        "Moved stop {index} of plan {} to {new_arrival}..{new_departure}, shift {shift_days} days",
        plan.id
    );
    Ok(Shifted { stops, shift_days })
}

fn translate(plan: &Plan, stops: &mut [Stop], from: usize, days: i64) -> Result<()> {
    for (index, stop) in stops.iter_mut().enumerate().skip(from) {
        if plan.is_protected(index) {
            continue;
        }
        if let (Some(arrival), Some(departure)) = (stop.arrival, stop.departure) {
            stop.arrival = Some(add_days(arrival, days)?);
            stop.departure = Some(add_days(departure, days)?);
        }
    }
    Ok(())
}

/// Validates and normalizes a list of period indices to freeze.
///
/// Every index must lie in `[0, max_period]`; duplicates collapse and an
/// empty list clears freezing.
pub fn frozen_period_set(plan: &Plan, periods: &[usize]) -> Result<BTreeSet<usize>> {
    if periods.is_empty() {
        return Ok(BTreeSet::new());
    }
    let Some(max_period) = plan.max_period() else {
        return Err(PlannerError::invalid_input("periods")
            .with_reason("The plan has no stops to freeze"));
    };
    periods
        .iter()
        .map(|&period| {
            if period > max_period {
                Err(PlannerError::invalid_input("periods").with_reason(format!(
                    "Period {period} is out of range 0..={max_period}"
                )))
            } else {
                Ok(period)
            }
        })
        .collect()
}
