//! CSV and HTML renderings of a plan.
//!
//! The CSV has one row per stop with the header
//! `plan_id,ship,port,arrival,departure,skipped`. Skipped dates are written
//! as empty strings and the skip flag as `yes`/`no`.
//!
//! The HTML document lays the plan out as the period-by-port
//! [`ScheduleTable`], one row per route traversal.

use std::fmt::Write as _;

use csv::Writer;

use crate::{
    dates::format_date,
    error::{PlannerError, Result},
    models::Plan,
    schedule::{ScheduleCell, ScheduleTable},
};

const CSV_HEADER: [&str; 6] = ["plan_id", "ship", "port", "arrival", "departure", "skipped"];

fn export_error(e: impl std::fmt::Display) -> PlannerError {
    PlannerError::Export {
        message: e.to_string(),
    }
}

/// Renders every stop of `plan` as CSV.
pub fn to_csv(plan: &Plan) -> Result<String> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER).map_err(export_error)?;

    let plan_id = plan.id.to_string();
    for stop in &plan.stops {
        writer
            .write_record([
                plan_id.as_str(),
                plan.ship.as_str(),
                stop.port.as_str(),
                format_date(stop.arrival).as_str(),
                format_date(stop.departure).as_str(),
                if stop.skipped { "yes" } else { "no" },
            ])
            .map_err(export_error)?;
    }

    let bytes = writer.into_inner().map_err(export_error)?;
    String::from_utf8(bytes).map_err(export_error)
}

/// Renders the schedule table of `plan` as a standalone HTML document.
pub fn to_html(plan: &Plan) -> Result<String> {
    let table = ScheduleTable::build(plan);
    render_html(&table).map_err(export_error)
}

fn render_html(table: &ScheduleTable) -> std::result::Result<String, std::fmt::Error> {
    let title = format!("Plan {}: {}", table.plan_id, escape(&table.ship));
    let mut out = String::new();

    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html>")?;
    writeln!(out, "<head><meta charset=\"utf-8\"><title>{title}</title></head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<h1>{title}</h1>")?;
    writeln!(
        out,
        "<p>{} &ndash; {}</p>",
        table.start_date, table.end_date
    )?;
    writeln!(out, "<table>")?;

    write!(out, "<thead><tr><th>Period</th>")?;
    for port in &table.ports {
        write!(out, "<th>{}</th>", escape(port))?;
    }
    writeln!(out, "</tr></thead>")?;

    writeln!(out, "<tbody>")?;
    for row in &table.rows {
        if row.frozen {
            write!(out, "<tr class=\"frozen\">")?;
        } else {
            write!(out, "<tr>")?;
        }
        write!(out, "<th>{}</th>", row.period)?;
        for cell in &row.cells {
            match cell {
                ScheduleCell::Placeholder => {
                    write!(
                        out,
                        "<td class=\"placeholder\">{}</td>",
                        escape(&table.placeholder)
                    )?;
                }
                ScheduleCell::Stop { skipped: true, .. } => {
                    write!(out, "<td class=\"skipped\"></td>")?;
                }
                ScheduleCell::Stop {
                    arrival, departure, ..
                } => {
                    write!(
                        out,
                        "<td>{}<br>{}</td>",
                        format_date(*arrival),
                        format_date(*departure)
                    )?;
                }
            }
        }
        writeln!(out, "</tr>")?;
    }
    writeln!(out, "</tbody>")?;
    writeln!(out, "</table>")?;
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")?;
    Ok(out)
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
