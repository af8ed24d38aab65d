//! Period-by-port projection of a plan, used by the terminal and HTML views.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::models::Plan;

/// Marker shown in a cell that holds no stop.
///
/// Kept distinct from the empty string, which stands for a skipped date.
pub const PLACEHOLDER: &str = "¤";

/// One cell of the schedule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleCell {
    /// No stop for this port in this period
    Placeholder,
    /// A stop of the plan
    Stop {
        index: usize,
        arrival: Option<Date>,
        departure: Option<Date>,
        skipped: bool,
    },
}

impl ScheduleCell {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }
}

/// One route traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub period: usize,
    pub frozen: bool,
    /// Cells aligned with [`ScheduleTable::ports`]
    pub cells: Vec<ScheduleCell>,
}

/// A plan laid out as periods (rows) by ports (columns).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleTable {
    pub plan_id: u64,
    pub ship: String,
    pub start_date: Date,
    pub end_date: Date,
    /// Distinct route ports in order of first appearance
    pub ports: Vec<String>,
    pub rows: Vec<ScheduleRow>,
    pub placeholder: String,
}

impl ScheduleTable {
    /// Projects `plan` using the default [`PLACEHOLDER`].
    pub fn build(plan: &Plan) -> Self {
        Self::build_with_placeholder(plan, PLACEHOLDER)
    }

    /// Projects `plan` with a custom placeholder marker.
    ///
    /// When a port repeats within the route, the later stop of the period
    /// takes the cell.
    pub fn build_with_placeholder(plan: &Plan, placeholder: &str) -> Self {
        let mut ports: Vec<String> = Vec::new();
        for port in &plan.route {
            if !ports.contains(port) {
                ports.push(port.clone());
            }
        }

        let route_len = plan.route_len().max(1);
        let rows = plan
            .stops
            .chunks(route_len)
            .enumerate()
            .map(|(period, chunk)| {
                let mut cells = vec![ScheduleCell::Placeholder; ports.len()];
                for (offset, stop) in chunk.iter().enumerate() {
                    if let Some(column) = ports.iter().position(|p| *p == stop.port) {
                        cells[column] = ScheduleCell::Stop {
                            index: period * route_len + offset,
                            arrival: stop.arrival,
                            departure: stop.departure,
                            skipped: stop.skipped,
                        };
                    }
                }
                ScheduleRow {
                    period,
                    frozen: plan.frozen_periods.contains(&period),
                    cells,
                }
            })
            .collect();

        Self {
            plan_id: plan.id,
            ship: plan.ship.clone(),
            start_date: plan.start_date,
            end_date: plan.end_date,
            ports,
            rows,
            placeholder: placeholder.to_string(),
        }
    }

    /// Number of periods.
    pub fn period_count(&self) -> usize {
        self.rows.len()
    }
}
