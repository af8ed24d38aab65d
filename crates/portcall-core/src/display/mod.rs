//! Display formatting and result wrapper types.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! the wrappers here add context such as "Created plan with ID: 3" or the
//! list of changes a reconciliation pass made. Everything renders to
//! markdown for the terminal renderer and the MCP server.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Result Wrappers │    │   Formatted     │
//! │ (Plan, Table)   │───▶│  & Collections  │───▶│    Output       │
//! │                 │    │                 │    │  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`collections`]: plan summary lists and registry name lists
//! - [`results`]: create, update and delete results
//! - [`status`]: one-line status messages
//! - [`datetime`]: local rendering of bookkeeping timestamps
//! - [`models`]: Display for plans, summaries and timing rules
//! - [`table`]: Display for the schedule table

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;
pub mod table;

pub use collections::{Names, PlanSummaries};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
