//! Plan summary types and functionality.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::Plan;

/// Summary information about a plan with stop statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Plan ID
    pub id: u64,
    /// Ship sailing the plan
    pub ship: String,
    /// Route ports in order
    pub route: Vec<String>,
    /// First day of the plan
    pub start_date: Date,
    /// End of the planning horizon
    pub end_date: Date,
    /// Total number of stops
    pub total_stops: u32,
    /// Number of skipped stops
    pub skipped_stops: u32,
    /// Number of frozen periods
    pub frozen_periods: u32,
}

impl From<&Plan> for PlanSummary {
    fn from(plan: &Plan) -> Self {
        Self {
            id: plan.id,
            ship: plan.ship.clone(),
            route: plan.route.clone(),
            start_date: plan.start_date,
            end_date: plan.end_date,
            total_stops: plan.stops.len() as u32,
            skipped_stops: plan.skipped_count() as u32,
            frozen_periods: plan.frozen_periods.len() as u32,
        }
    }
}
