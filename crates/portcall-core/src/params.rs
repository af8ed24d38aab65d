//! Parameter structures for planner operations.
//!
//! These structures are shared by every interface (CLI, MCP) and carry no
//! framework-specific derives apart from the optional `schemars` schema.
//! Interface layers wrap them with their own derives and convert with
//! `.into()`:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Dates stay in their wire form (`YYYY-MM-DD`, empty for "no date") until
//! the planner parses them, so every interface reports malformed dates the
//! same way.

use std::fmt;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    dates::{parse_date, parse_optional_date},
    error::{PlannerError, Result},
    schedule::{EditBatch, StopEdit},
};

/// Generic parameters for operations requiring just a plan ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the plan to operate on
    pub id: u64,
}

/// Parameters for generating a new plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreatePlan {
    /// Registered ship sailing the plan
    pub ship: String,
    /// Ports in visiting order (at least two); the route repeats until the
    /// horizon ends
    pub route: Vec<String>,
    /// First day of the plan as YYYY-MM-DD
    pub start_date: String,
}

impl CreatePlan {
    /// Parses the start date.
    pub fn parse_start_date(&self) -> Result<jiff::civil::Date> {
        parse_date("start_date", &self.start_date)
    }
}

/// Parameters for deleting a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeletePlan {
    /// The ID of the plan to delete
    pub id: u64,
    /// Must be true; deletion cannot be undone
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for re-dating a single stop.
///
/// Either date may be omitted to keep the stop's current value. With
/// `propagate`, every following dated stop moves by the same number of days.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct EditStop {
    /// Plan containing the stop
    pub plan_id: u64,
    /// Zero-based stop index
    pub index: usize,
    /// New arrival date as YYYY-MM-DD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival: Option<String>,
    /// New departure date as YYYY-MM-DD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure: Option<String>,
    /// Shift every following stop by the same number of days
    #[serde(default = "default_propagate")]
    pub propagate: bool,
}

fn default_propagate() -> bool {
    true
}

impl EditStop {
    /// Parses the optional arrival and departure.
    pub fn parse_dates(
        &self,
    ) -> Result<(Option<jiff::civil::Date>, Option<jiff::civil::Date>)> {
        let arrival = match self.arrival.as_deref() {
            Some(value) => parse_optional_date("arrival", value)?,
            None => None,
        };
        let departure = match self.departure.as_deref() {
            Some(value) => parse_optional_date("departure", value)?,
            None => None,
        };
        Ok((arrival, departure))
    }
}

/// One manual edit inside a batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ManualStop {
    /// Zero-based stop index
    pub index: usize,
    /// Arrival as YYYY-MM-DD; leave both dates empty to skip the port call
    #[serde(default)]
    pub arrival: String,
    /// Departure as YYYY-MM-DD; leave both dates empty to skip the port call
    #[serde(default)]
    pub departure: String,
}

/// Parameters for a batch reconciliation pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ReconcilePlan {
    /// Plan to reconcile
    pub plan_id: u64,
    /// Manual edits, at most one per stop index
    #[serde(default)]
    pub edits: Vec<ManualStop>,
    /// Replacement set of frozen period indices, applied before the pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frozen_periods: Option<Vec<usize>>,
}

impl ReconcilePlan {
    /// Parses the edits into a batch keyed by stop index.
    ///
    /// A stop index may appear only once per batch.
    pub fn parse_edits(&self) -> Result<EditBatch> {
        let mut batch = EditBatch::new();
        for edit in &self.edits {
            let parsed = StopEdit::parse(&edit.arrival, &edit.departure)?;
            if batch.insert(edit.index, parsed).is_some() {
                return Err(PlannerError::invalid_input("edits").with_reason(format!(
                    "Stop {} is edited more than once",
                    edit.index
                )));
            }
        }
        Ok(batch)
    }
}

/// Parameters for replacing the frozen period set of a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct FreezePeriods {
    /// Plan to update
    pub plan_id: u64,
    /// Period indices to freeze; an empty list clears freezing
    #[serde(default)]
    pub periods: Vec<usize>,
}

/// Export format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Html,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Html => write!(f, "html"),
        }
    }
}

/// Parameters for exporting a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ExportPlan {
    /// The ID of the plan to export
    pub id: u64,
    /// Output format
    #[serde(default)]
    pub format: ExportFormat,
}

/// Parameters for setting the days at sea between two ports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetTransition {
    /// Origin port
    pub from: String,
    /// Destination port
    pub to: String,
    /// Days at sea (non-negative)
    pub days: i64,
}

/// Parameters for setting the days alongside at one port.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetStay {
    /// Port name
    pub port: String,
    /// Days alongside (non-negative)
    pub days: i64,
}

/// Parameters for registering a ship or a port.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Register {
    /// Name to register
    pub name: String,
}
