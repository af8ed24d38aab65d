//! High-level planner API for plans, their timetables and the timing rules.
//!
//! The [`Planner`] is the entry point every interface goes through. Each
//! method opens a fresh database connection on a blocking worker thread,
//! runs one store operation and hands back the result.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │    Database     │
//! │ (plan_handlers) │───▶│ (plan_ops,      │───▶│   (via db/)     │
//! │                 │    │  schedule_ops,  │    │                 │
//! │                 │    │  rules_ops)     │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!     User Interface      Business Logic         Data Persistence
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for [`Planner`] instances
//! - [`plan_ops`]: Plan creation, lookup and deletion
//! - [`plan_handlers`]: Formatted plan views, schedule tables and exports
//! - [`schedule_ops`]: Stop edits, reconciliation, freezing and clearing
//! - [`rules_ops`]: Ship and port registries and timing rules
//!
//! # Example
//!
//! ```rust,no_run
//! use portcall_core::{params::CreatePlan, PlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("/tmp/portcall.db"))
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
//! println!("{plan}");
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tokio::task;

use crate::{
    db::Database,
    error::{join_error, Result},
};

pub mod builder;
pub mod plan_handlers;
pub mod plan_ops;
pub mod rules_ops;
pub mod schedule_ops;


pub use builder::PlannerBuilder;

/// Main planner interface.
pub struct Planner {
    pub(crate) db_path: PathBuf,
    pub(crate) horizon_days: u32,
}

impl Planner {
    /// Creates a new planner over the given database path.
    pub(crate) fn new(db_path: PathBuf, horizon_days: u32) -> Self {
        Self {
            db_path,
            horizon_days,
        }
    }

    /// Path of the backing database file.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Planning horizon applied to new plans.
    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    /// Runs `op` against a fresh connection on a blocking worker.
    pub(crate) async fn with_database<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(join_error)?
    }
}
