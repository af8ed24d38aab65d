//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::PlanSummary;

/// Newtype wrapper for displaying collections of plan summaries.
///
/// # Examples
///
/// ```rust
/// use jiff::civil::date;
/// use portcall_core::{display::PlanSummaries, models::PlanSummary};
///
/// let plan = PlanSummary {
///     id: 1,
///     ship: "Anatoly Ivanov".to_string(),
///     route: vec!["Vladivostok".to_string(), "Nevelsk".to_string()],
///     start_date: date(2026, 1, 1),
///     end_date: date(2027, 1, 1),
///     total_stops: 120,
///     skipped_stops: 2,
///     frozen_periods: 1,
/// };
///
/// let summaries = PlanSummaries(vec![plan]);
/// let output = format!("{summaries}");
/// assert!(output.contains("Anatoly Ivanov"));
/// ```
pub struct PlanSummaries(pub Vec<PlanSummary>);

impl PlanSummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of plan summaries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the plan summaries.
    pub fn iter(&self) -> std::slice::Iter<'_, PlanSummary> {
        self.0.iter()
    }
}

impl Index<usize> for PlanSummaries {
    type Output = PlanSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a PlanSummaries {
    type Item = &'a PlanSummary;
    type IntoIter = std::slice::Iter<'a, PlanSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PlanSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No plans found.")
        } else {
            for plan in &self.0 {
                write!(f, "{plan}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying a list of registry names (ships or ports).
pub struct Names<'a> {
    pub kind: &'a str,
    pub names: &'a [String],
}

impl fmt::Display for Names<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.names.is_empty() {
            return writeln!(f, "No {} registered.", self.kind);
        }
        for name in self.names {
            writeln!(f, "- {name}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collections() {
        assert_eq!(PlanSummaries(Vec::new()).to_string(), "No plans found.\n");
        let names = Names {
            kind: "ships",
            names: &[],
        };
        assert_eq!(names.to_string(), "No ships registered.\n");
    }

    #[test]
    fn test_names_list() {
        let ports = vec!["Vladivostok".to_string(), "Nevelsk".to_string()];
        let names = Names {
            kind: "ports",
            names: &ports,
        };
        assert_eq!(names.to_string(), "- Vladivostok\n- Nevelsk\n");
    }
}
