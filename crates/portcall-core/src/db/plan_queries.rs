//! Plan CRUD operations and queries.

use std::collections::BTreeSet;

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};

use super::{
    registry_queries::load_rules,
    utils::{date_column, json_column, optional_date_column, timestamp_column},
};
use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{Plan, PlanSummary, Stop},
    schedule::{generate, horizon_end},
    timing::TimingRules,
};

const INSERT_PLAN_SQL: &str = "INSERT INTO plans (ship, route, start_date, end_date, frozen_periods, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const SELECT_PLAN_SQL: &str = "SELECT id, ship, route, start_date, end_date, frozen_periods, created_at, updated_at FROM plans WHERE id = ?1";
const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)";
const UPDATE_PLAN_SQL: &str =
    "UPDATE plans SET frozen_periods = ?1, updated_at = ?2 WHERE id = ?3";
const DELETE_PLAN_STOPS_SQL: &str = "DELETE FROM stops WHERE plan_id = ?1";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1";
const INSERT_STOP_SQL: &str = "INSERT INTO stops (plan_id, stop_index, port, arrival, departure, skipped) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_STOPS_SQL: &str = "SELECT port, arrival, departure, skipped FROM stops WHERE plan_id = ?1 ORDER BY stop_index";
const SELECT_SUMMARIES_SQL: &str = "SELECT id, ship, route, start_date, end_date, total_stops, skipped_stops, frozen_periods FROM plan_summaries ORDER BY id";

fn plan_from_row(row: &Row) -> rusqlite::Result<Plan> {
    Ok(Plan {
        id: row.get::<_, i64>(0)? as u64,
        ship: row.get(1)?,
        route: json_column(row, 2)?,
        start_date: date_column(row, 3)?,
        end_date: date_column(row, 4)?,
        stops: Vec::new(),
        frozen_periods: json_column(row, 5)?,
        created_at: timestamp_column(row, 6)?,
        updated_at: timestamp_column(row, 7)?,
    })
}

fn summary_from_row(row: &Row) -> rusqlite::Result<PlanSummary> {
    Ok(PlanSummary {
        id: row.get::<_, i64>(0)? as u64,
        ship: row.get(1)?,
        route: json_column(row, 2)?,
        start_date: date_column(row, 3)?,
        end_date: date_column(row, 4)?,
        total_stops: row.get(5)?,
        skipped_stops: row.get(6)?,
        frozen_periods: row.get(7)?,
    })
}

fn stop_from_row(row: &Row) -> rusqlite::Result<Stop> {
    Ok(Stop {
        port: row.get(0)?,
        arrival: optional_date_column(row, 1)?,
        departure: optional_date_column(row, 2)?,
        skipped: row.get(3)?,
    })
}

fn read_plan(conn: &Connection, id: u64) -> Result<Option<Plan>> {
    let mut plan = conn
        .query_row(SELECT_PLAN_SQL, params![id as i64], plan_from_row)
        .optional()
        .db_context("Failed to query plan")?;

    if let Some(ref mut plan) = plan {
        let mut stmt = conn
            .prepare(SELECT_STOPS_SQL)
            .db_context("Failed to prepare query")?;
        plan.stops = stmt
            .query_map(params![id as i64], stop_from_row)
            .db_context("Failed to query stops")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch stops")?;
    }

    Ok(plan)
}

fn write_stops(conn: &Connection, plan_id: u64, stops: &[Stop]) -> Result<()> {
    conn.execute(DELETE_PLAN_STOPS_SQL, params![plan_id as i64])
        .db_context("Failed to clear plan stops")?;

    let mut stmt = conn
        .prepare(INSERT_STOP_SQL)
        .db_context("Failed to prepare stop insert")?;
    for (index, stop) in stops.iter().enumerate() {
        stmt.execute(params![
            plan_id as i64,
            index as i64,
            stop.port,
            stop.arrival.map(|d| d.to_string()),
            stop.departure.map(|d| d.to_string()),
            stop.skipped,
        ])
        .db_context("Failed to insert stop")?;
    }
    Ok(())
}

fn encode_periods(periods: &BTreeSet<usize>) -> Result<String> {
    Ok(serde_json::to_string(periods)?)
}

fn write_plan(conn: &Connection, plan: &Plan) -> Result<()> {
    let updated = conn
        .execute(
            UPDATE_PLAN_SQL,
            params![
                encode_periods(&plan.frozen_periods)?,
                plan.updated_at.to_string(),
                plan.id as i64
            ],
        )
        .db_context("Failed to update plan")?;
    if updated == 0 {
        return Err(PlannerError::PlanNotFound { id: plan.id });
    }
    write_stops(conn, plan.id, &plan.stops)
}

impl super::Database {
    /// Generates and stores a new plan for `ship` sailing `route` from
    /// `start_date` over `horizon_days`.
    ///
    /// The ship must be registered and every route port known to the timing
    /// rules. Plan ids are assigned sequentially and never reused.
    pub fn create_plan(
        &mut self,
        ship: &str,
        route: &[String],
        start_date: Date,
        horizon_days: u32,
    ) -> Result<Plan> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        if !super::registry_queries::ship_exists_in(&tx, ship)? {
            return Err(PlannerError::invalid_input("ship")
                .with_reason(format!("Unknown ship: {ship}")));
        }
        let rules = load_rules(&tx)?;
        let stops = generate(route, start_date, &rules, horizon_days)?;
        let end_date = horizon_end(start_date, horizon_days)?;

        let now = Timestamp::now();
        let now_str = now.to_string();
        let frozen_periods = BTreeSet::new();

        tx.execute(
            INSERT_PLAN_SQL,
            params![
                ship,
                serde_json::to_string(route)?,
                start_date.to_string(),
                end_date.to_string(),
                encode_periods(&frozen_periods)?,
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert plan")?;
        let id = tx.last_insert_rowid() as u64;
        write_stops(&tx, id, &stops)?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Plan {
            id,
            ship: ship.to_string(),
            route: route.to_vec(),
            start_date,
            end_date,
            stops,
            frozen_periods,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a plan with its stops by ID.
    pub fn get_plan(&self, id: u64) -> Result<Option<Plan>> {
        read_plan(&self.connection, id)
    }

    /// Lists every plan as a summary, oldest first.
    pub fn list_plans(&self) -> Result<Vec<PlanSummary>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_SUMMARIES_SQL)
            .db_context("Failed to prepare query")?;
        let summaries = stmt
            .query_map([], summary_from_row)
            .db_context("Failed to query plans")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch plans")?;
        Ok(summaries)
    }

    /// Replaces the stops and the frozen set of an existing plan.
    pub fn save_plan(&mut self, plan: &Plan) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        write_plan(&tx, plan)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Runs a read-modify-write pass over one plan.
    ///
    /// The plan and the timing rules are read inside an IMMEDIATE
    /// transaction, `change` edits the plan in place, and the result is
    /// written back before commit. When `change` fails nothing is written.
    pub fn update_plan<T, F>(&mut self, id: u64, change: F) -> Result<(Plan, T)>
    where
        F: FnOnce(&mut Plan, &TimingRules) -> Result<T>,
    {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let mut plan = read_plan(&tx, id)?.ok_or(PlannerError::PlanNotFound { id })?;
        let rules = load_rules(&tx)?;
        let output = change(&mut plan, &rules)?;
        plan.updated_at = Timestamp::now();
        write_plan(&tx, &plan)?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok((plan, output))
    }

    /// Permanently deletes a plan and its stops.
    pub fn delete_plan(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CHECK_PLAN_EXISTS_SQL, params![id as i64], |row| row.get(0))
            .db_context("Failed to check plan existence")?;
        if !exists {
            return Err(PlannerError::PlanNotFound { id });
        }

        tx.execute(DELETE_PLAN_STOPS_SQL, params![id as i64])
            .db_context("Failed to delete plan stops")?;
        tx.execute(DELETE_PLAN_SQL, params![id as i64])
            .db_context("Failed to delete plan")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }
}
