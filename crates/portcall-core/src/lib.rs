//! Core library for the Portcall timetable planner.
//!
//! Portcall computes a cyclic port-call timetable for a ship sailing a fixed
//! route, lets an operator override individual arrival and departure dates,
//! and keeps the rest of the timetable consistent around those overrides.
//!
//! - [`timing`]: transition and stay rules between registered ports
//! - [`schedule`]: generation, reconciliation and the schedule table
//! - [`db`]: SQLite plan store
//! - [`planner`]: async facade used by the CLI and the MCP server
//! - [`display`] and [`export`]: markdown, CSV and HTML output
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use portcall_core::{
//!     params::{CreatePlan, EditStop},
//!     PlannerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("portcall.db"))
//!     .build()
//!     .await?;
//!
//! let plan = planner
//!     .create_plan(&CreatePlan {
//!         ship: "Anatoly Ivanov".to_string(),
//!         route: vec!["Vladivostok".to_string(), "Nevelsk".to_string()],
//!         start_date: "2026-01-01".to_string(),
//!     })
//!     .await?;
//!
//! // Hold the second call two extra days and move everything after it
//! let updated = planner
//!     .edit_stop(&EditStop {
//!         plan_id: plan.id,
//!         index: 1,
//!         arrival: None,
//!         departure: Some("2026-01-07".to_string()),
//!         propagate: true,
//!     })
//!     .await?;
//! println!("{updated}");
//! # Ok(())
//! # }
//! ```

pub mod dates;
pub mod db;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod params;
pub mod planner;
pub mod schedule;
pub mod timing;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, LocalDateTime, Names, OperationStatus, PlanSummaries,
    UpdateResult,
};
pub use error::{PlannerError, Result};
pub use models::{Plan, PlanSummary, Stop};
pub use params::{
    CreatePlan, DeletePlan, EditStop, ExportFormat, ExportPlan, FreezePeriods, Id, ManualStop,
    ReconcilePlan, Register, SetStay, SetTransition,
};
pub use planner::{Planner, PlannerBuilder};
pub use schedule::{ScheduleCell, ScheduleTable, StopClass, StopEdit, PLACEHOLDER};
pub use timing::TimingRules;
