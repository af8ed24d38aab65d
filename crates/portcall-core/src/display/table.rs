//! Markdown rendering of the period-by-port schedule table.

use std::fmt;

use crate::{
    dates::format_date,
    schedule::{ScheduleCell, ScheduleTable},
};

impl fmt::Display for ScheduleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Schedule of plan {}: {}", self.plan_id, self.ship)?;
        writeln!(f)?;
        writeln!(f, "Horizon: {} to {}", self.start_date, self.end_date)?;
        writeln!(f)?;

        if self.rows.is_empty() {
            return writeln!(f, "No stops in this plan.");
        }

        write!(f, "| Period |")?;
        for port in &self.ports {
            write!(f, " {port} |")?;
        }
        writeln!(f)?;
        write!(f, "|---|")?;
        for _ in &self.ports {
            write!(f, "---|")?;
        }
        writeln!(f)?;

        for row in &self.rows {
            if row.frozen {
                write!(f, "| {} (frozen) |", row.period)?;
            } else {
                write!(f, "| {} |", row.period)?;
            }
            for cell in &row.cells {
                match cell {
                    ScheduleCell::Placeholder => write!(f, " {} |", self.placeholder)?,
                    ScheduleCell::Stop { skipped: true, .. } => write!(f, " skipped |")?,
                    ScheduleCell::Stop {
                        arrival, departure, ..
                    } => write!(
                        f,
                        " {} / {} |",
                        format_date(*arrival),
                        format_date(*departure)
                    )?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use jiff::{civil::date, Timestamp};

    use crate::models::{Plan, Stop};
    use crate::schedule::ScheduleTable;

    #[test]
    fn test_table_markdown() {
        let plan = Plan {
            id: 2,
            ship: "Yerofey Khabarov".to_string(),
            route: vec!["Vladivostok".to_string(), "Slavyanka".to_string()],
            start_date: date(2026, 3, 1),
            end_date: date(2026, 3, 6),
            stops: vec![
                Stop::scheduled("Vladivostok", date(2026, 3, 1), date(2026, 3, 2)),
                Stop::scheduled("Slavyanka", date(2026, 3, 4), date(2026, 3, 5)),
                Stop::scheduled("Vladivostok", date(2026, 3, 7), date(2026, 3, 8)),
            ],
            frozen_periods: BTreeSet::from([0]),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        };

        let output = ScheduleTable::build(&plan).to_string();

        assert!(output.contains("| Period | Vladivostok | Slavyanka |"));
        assert!(output.contains("| 0 (frozen) | 2026-03-01 / 2026-03-02 | 2026-03-04 / 2026-03-05 |"));
        assert!(output.contains("| 1 | 2026-03-07 / 2026-03-08 | ¤ |"));
    }
}
