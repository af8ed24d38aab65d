//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::Plan;

/// Wrapper type for displaying the result of create operations.
#[derive(Debug)]
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Created plan with ID: {} ({} stops)",
            self.resource.id,
            self.resource.stops.len()
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations.
///
/// The wrapper lists the changes made during the update before the updated
/// resource.
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeSet;
///
/// use jiff::{civil::date, Timestamp};
/// use portcall_core::{display::UpdateResult, models::Plan};
///
/// let plan = Plan {
///     id: 3,
///     ship: "Russky Vostok".to_string(),
///     route: vec!["Vladivostok".to_string(), "Slavyanka".to_string()],
///     start_date: date(2026, 5, 1),
///     end_date: date(2026, 6, 1),
///     stops: vec![],
///     frozen_periods: BTreeSet::new(),
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
/// };
///
/// let result = UpdateResult::with_changes(plan, vec!["Frozen periods: none".to_string()]);
/// assert!(result.to_string().contains("Changes made:"));
/// ```
#[derive(Debug)]
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create a new UpdateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated plan with ID: {}", self.resource.id)?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
#[derive(Debug)]
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    /// Create a new DeleteResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted plan for '{}' (ID: {})",
            self.resource.ship, self.resource.id
        )
    }
}
