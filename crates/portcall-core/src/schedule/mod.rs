//! Timetable computation.
//!
//! - [`generator`]: lays out the initial stops of a plan
//! - [`reconcile`]: merges manual edits and frozen periods into an existing
//!   timetable
//! - [`table`]: projects a plan into a period-by-port grid
//!
//! Everything here is a pure function of its inputs. Loading and saving plans
//! is left to [`crate::db`].

pub mod generator;
pub mod reconcile;
pub mod table;

#[cfg(test)]
mod tests;

pub use generator::{generate, horizon_end, validate_route, DEFAULT_HORIZON_DAYS};
pub use reconcile::{
    frozen_period_set, reconcile, shift_stop, EditBatch, Reconciled, Shifted, StopClass, StopEdit,
};
pub use table::{ScheduleCell, ScheduleRow, ScheduleTable, PLACEHOLDER};
