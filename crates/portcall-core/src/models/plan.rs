//! Plan model definition and related functionality.

use std::collections::BTreeSet;

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::Stop;

/// Represents a ship's timetable over one planning horizon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Ship sailing this plan
    pub ship: String,

    /// Ports visited in order; the sequence repeats until the horizon ends
    pub route: Vec<String>,

    /// First day of the plan
    pub start_date: Date,

    /// End of the planning horizon (not the date of the last stop)
    pub end_date: Date,

    /// Port calls in generation order
    #[serde(default)]
    pub stops: Vec<Stop>,

    /// Period indices the operator has frozen
    #[serde(default)]
    pub frozen_periods: BTreeSet<usize>,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,
}

impl Plan {
    /// Number of ports in one traversal of the route.
    pub fn route_len(&self) -> usize {
        self.route.len()
    }

    /// Period (route traversal) that the stop at `index` belongs to.
    pub fn period_of(&self, index: usize) -> usize {
        index / self.route_len().max(1)
    }

    /// Number of periods touched by the stop sequence, counting a partial
    /// last traversal.
    pub fn period_count(&self) -> usize {
        let len = self.route_len().max(1);
        self.stops.len().div_ceil(len)
    }

    /// Highest period index that may be frozen, `None` for an empty plan.
    pub fn max_period(&self) -> Option<usize> {
        self.stops
            .len()
            .checked_sub(1)
            .map(|last| last / self.route_len().max(1))
    }

    /// Whether the stop at `index` is protected by a frozen period.
    ///
    /// Marking a period frozen only protects stops that already carry both
    /// dates or have been skipped.
    pub fn is_protected(&self, index: usize) -> bool {
        if !self.frozen_periods.contains(&self.period_of(index)) {
            return false;
        }
        self.stops
            .get(index)
            .is_some_and(|stop| stop.skipped || stop.is_dated())
    }

    /// Number of skipped stops.
    pub fn skipped_count(&self) -> usize {
        self.stops.iter().filter(|stop| stop.skipped).count()
    }
}
