//! Data models for plans and their port calls.
//!
//! This module contains the core domain models of the timetable planner.
//! Display implementations for these models are located in
//! [`crate::display::models`] to keep data structures apart from
//! presentation logic.
//!
//! # Model Overview
//!
//! - [`Plan`]: one ship, one route, one planning horizon, and the generated
//!   sequence of [`Stop`]s together with the set of frozen periods
//! - [`Stop`]: a single port call with optional arrival/departure dates and a
//!   skip flag
//! - [`PlanSummary`]: compact projection used by list views
//!
//! A *period* is one full traversal of the route: stops
//! `[k * L, (k + 1) * L)` for a route of length `L`.
//!
//! # Examples
//!
//! ```rust
//! use std::collections::BTreeSet;
//!
//! use jiff::{civil::date, Timestamp};
//! use portcall_core::models::{Plan, Stop};
//!
//! let plan = Plan {
//!     id: 1,
//!     ship: "Anatoly Ivanov".to_string(),
//!     route: vec!["Vladivostok".to_string(), "Korsakov".to_string()],
//!     start_date: date(2026, 1, 1),
//!     end_date: date(2027, 1, 1),
//!     stops: vec![
//!         Stop::scheduled("Vladivostok", date(2026, 1, 1), date(2026, 1, 2)),
//!         Stop::scheduled("Korsakov", date(2026, 1, 4), date(2026, 1, 5)),
//!         Stop::scheduled("Vladivostok", date(2026, 1, 7), date(2026, 1, 8)),
//!     ],
//!     frozen_periods: BTreeSet::new(),
//!     created_at: Timestamp::now(),
//!     updated_at: Timestamp::now(),
//! };
//! assert_eq!(plan.period_of(2), 1);
//! assert_eq!(plan.period_count(), 2);
//! ```

pub mod plan;
pub mod stop;
pub mod summary;

#[cfg(test)]
mod tests;

pub use plan::Plan;
pub use stop::Stop;
pub use summary::PlanSummary;
