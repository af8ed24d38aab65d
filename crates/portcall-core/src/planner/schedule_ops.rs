//! Timetable edits for the Planner.
//!
//! Every operation here is a read-modify-write pass run through
//! [`crate::db::Database::update_plan`]: the engine works on the loaded plan
//! and the new stops are written back in the same transaction, or not at all.

use log::info;

use super::Planner;
use crate::{
    display::UpdateResult,
    error::Result,
    models::{Plan, Stop},
    params::{EditStop, FreezePeriods, Id, ReconcilePlan},
    schedule::{self, frozen_period_set, shift_stop, StopClass},
};

fn describe_periods(plan: &Plan) -> String {
    if plan.frozen_periods.is_empty() {
        "Frozen periods: none".to_string()
    } else {
        let periods: Vec<String> = plan.frozen_periods.iter().map(ToString::to_string).collect();
        format!("Frozen periods: {}", periods.join(", "))
    }
}

impl Planner {
    /// Re-dates one stop and optionally shifts every following stop by the
    /// same number of days.
    ///
    /// # Errors
    ///
    /// - `PlannerError::PlanNotFound` / `PlannerError::StopNotFound`
    /// - `PlannerError::InvalidInput` for malformed dates, a departure before
    ///   the arrival, an undated stop, or a stop inside a frozen period
    pub async fn edit_stop(&self, params: &EditStop) -> Result<UpdateResult<Plan>> {
        let (arrival, departure) = params.parse_dates()?;
        let plan_id = params.plan_id;
        let index = params.index;
        let propagate = params.propagate;

        let (plan, shift_days) = self
            .with_database(move |db| {
                db.update_plan(plan_id, |plan, _rules| {
                    let shifted = shift_stop(plan, index, arrival, departure, propagate)?;
                    plan.stops = shifted.stops;
                    Ok(shifted.shift_days)
                })
            })
            .await?;

        info!("Edited stop {index} of plan {plan_id}, shift {shift_days} days");
        let mut changes = vec![format!("Re-dated stop {index} ({})", plan.stops[index].port)];
        if shift_days != 0 {
            changes.push(format!("Shifted following stops by {shift_days} days"));
        }
        Ok(UpdateResult::with_changes(plan, changes))
    }

    /// Applies a batch of manual edits and re-derives the rest of the
    /// timetable, optionally replacing the frozen period set first.
    ///
    /// An empty batch with no frozen periods regenerates every date from the
    /// plan's start date.
    pub async fn reconcile(&self, params: &ReconcilePlan) -> Result<UpdateResult<Plan>> {
        let edits = params.parse_edits()?;
        let plan_id = params.plan_id;
        let frozen = params.frozen_periods.clone();

        let (plan, classes) = self
            .with_database(move |db| {
                db.update_plan(plan_id, |plan, rules| {
                    if let Some(periods) = frozen {
                        plan.frozen_periods = frozen_period_set(plan, &periods)?;
                    }
                    let reconciled = schedule::reconcile(plan, &edits, rules)?;
                    plan.stops = reconciled.stops;
                    Ok(reconciled.classes)
                })
            })
            .await?;

        let count = |class: StopClass| classes.iter().filter(|c| **c == class).count();
        info!(
            "Reconciled plan {plan_id}: {} anchored, {} skipped",
            count(StopClass::Anchored),
            count(StopClass::Skipped)
        );
        let changes = vec![
            format!("Anchored stops: {}", count(StopClass::Anchored)),
            format!("Frozen stops: {}", count(StopClass::Frozen)),
            format!("Skipped stops: {}", count(StopClass::Skipped)),
            format!("Derived stops: {}", count(StopClass::Derived)),
            describe_periods(&plan),
        ];
        Ok(UpdateResult::with_changes(plan, changes))
    }

    /// Replaces the frozen period set of a plan.
    ///
    /// Freezing is declarative: dates are not touched until the next
    /// reconciliation pass.
    pub async fn freeze_periods(&self, params: &FreezePeriods) -> Result<UpdateResult<Plan>> {
        let plan_id = params.plan_id;
        let periods = params.periods.clone();

        let (plan, ()) = self
            .with_database(move |db| {
                db.update_plan(plan_id, |plan, _rules| {
                    plan.frozen_periods = frozen_period_set(plan, &periods)?;
                    Ok(())
                })
            })
            .await?;

        info!("Updated frozen periods of plan {plan_id}");
        let changes = vec![describe_periods(&plan)];
        Ok(UpdateResult::with_changes(plan, changes))
    }

    /// Wipes every date, un-skips every stop and clears freezing, keeping
    /// the port sequence.
    pub async fn clear_schedule(&self, params: &Id) -> Result<UpdateResult<Plan>> {
        let plan_id = params.id;

        let (plan, ()) = self
            .with_database(move |db| {
                db.update_plan(plan_id, |plan, _rules| {
                    plan.stops.iter_mut().for_each(Stop::clear);
                    plan.frozen_periods.clear();
                    Ok(())
                })
            })
            .await?;

        info!("Cleared schedule of plan {plan_id}");
        let changes = vec![format!("Cleared dates of {} stops", plan.stops.len())];
        Ok(UpdateResult::with_changes(plan, changes))
    }
}
