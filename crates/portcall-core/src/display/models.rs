//! Display implementations for domain models.
//!
//! All output is markdown so the CLI can render it through its terminal
//! skin and the MCP server can hand it to clients verbatim.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    dates::format_date,
    models::{Plan, PlanSummary, Stop},
    timing::TimingRules,
};

fn fmt_route(f: &mut fmt::Formatter<'_>, route: &[String]) -> fmt::Result {
    write!(f, "{}", route.join(" → "))
}

impl Plan {
    fn stop_status(&self, index: usize, stop: &Stop) -> &'static str {
        if stop.skipped {
            "skipped"
        } else if self.is_protected(index) {
            "frozen"
        } else if !stop.is_dated() {
            "undated"
        } else {
            ""
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.ship)?;
        writeln!(f)?;

        write!(f, "- Route: ")?;
        fmt_route(f, &self.route)?;
        writeln!(f)?;
        writeln!(f, "- Horizon: {} to {}", self.start_date, self.end_date)?;
        if !self.frozen_periods.is_empty() {
            let periods: Vec<String> =
                self.frozen_periods.iter().map(ToString::to_string).collect();
            writeln!(f, "- Frozen periods: {}", periods.join(", "))?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if self.stops.is_empty() {
            return writeln!(f, "\nNo stops in this plan.");
        }

        writeln!(f, "\n## Stops")?;
        writeln!(f)?;
        writeln!(f, "| # | Period | Port | Arrival | Departure | Status |")?;
        writeln!(f, "|---|---|---|---|---|---|")?;
        for (index, stop) in self.stops.iter().enumerate() {
            writeln!(
                f,
                "| {index} | {} | {} | {} | {} | {} |",
                self.period_of(index),
                stop.port,
                format_date(stop.arrival),
                format_date(stop.departure),
                self.stop_status(index, stop)
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.ship, self.id)?;
        writeln!(f)?;
        write!(f, "- **Route**: ")?;
        fmt_route(f, &self.route)?;
        writeln!(f)?;
        writeln!(f, "- **Horizon**: {} to {}", self.start_date, self.end_date)?;
        write!(f, "- **Stops**: {}", self.total_stops)?;
        if self.skipped_stops > 0 {
            write!(f, " ({} skipped)", self.skipped_stops)?;
        }
        writeln!(f)?;
        if self.frozen_periods > 0 {
            writeln!(f, "- **Frozen periods**: {}", self.frozen_periods)?;
        }
        writeln!(f)
    }
}

impl fmt::Display for TimingRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Stays")?;
        writeln!(f)?;
        writeln!(f, "| Port | Days |")?;
        writeln!(f, "|---|---|")?;
        for port in &self.ports {
            writeln!(f, "| {port} | {} |", self.stay(port))?;
        }

        writeln!(f)?;
        writeln!(f, "## Transitions")?;
        writeln!(f)?;
        writeln!(f, "| From | To | Days |")?;
        writeln!(f, "|---|---|---|")?;
        for from in &self.ports {
            for to in &self.ports {
                if from == to {
                    continue;
                }
                match self.transition(from, to) {
                    Ok(days) => writeln!(f, "| {from} | {to} | {days} |")?,
                    Err(_) => writeln!(f, "| {from} | {to} | unset |")?,
                }
            }
        }
        Ok(())
    }
}
