//! Initial timetable generation from a route and timing rules.

use jiff::civil::Date;
use log::debug;

use crate::{
    dates::add_days,
    error::{PlannerError, Result},
    models::Stop,
    timing::TimingRules,
};

/// Planning horizon used when none is configured.
pub const DEFAULT_HORIZON_DAYS: u32 = 365;

/// Smallest number of ports a route may have.
pub const MIN_ROUTE_LEN: usize = 2;

/// Checks route length and that every port is registered.
pub fn validate_route(route: &[String], rules: &TimingRules) -> Result<()> {
    if route.len() < MIN_ROUTE_LEN {
        return Err(PlannerError::invalid_input("route").with_reason(format!(
            "A route needs at least {MIN_ROUTE_LEN} ports, got {}",
            route.len()
        )));
    }
    rules.ensure_route(route)
}

/// Date at which generation stops for a plan starting on `start`.
pub fn horizon_end(start: Date, horizon_days: u32) -> Result<Date> {
    if horizon_days == 0 {
        return Err(PlannerError::invalid_input("horizon_days")
            .with_reason("The planning horizon must be at least one day"));
    }
    add_days(start, i64::from(horizon_days))
}

/// Lays out stops along `route`, cycling through it from `start` until the
/// running departure reaches `start + horizon_days`.
///
/// The first stop arrives on `start`. Every later stop arrives after the
/// transition from the previous port and departs after the port's stay. The
/// number of stops is bounded by `(horizon_days + 1) * route.len()` so a
/// route whose transitions and stays are all zero still terminates.
pub fn generate(
    route: &[String],
    start: Date,
    rules: &TimingRules,
    horizon_days: u32,
) -> Result<Vec<Stop>> {
    validate_route(route, rules)?;
    let limit = horizon_end(start, horizon_days)?;
    let max_stops = (horizon_days as usize + 1).saturating_mul(route.len());

    let mut stops: Vec<Stop> = Vec::new();
    let mut current_departure = start;
    let mut prev_port: Option<&str> = None;

    for port in route.iter().cycle() {
        if current_departure >= limit || stops.len() >= max_stops {
            break;
        }

        let arrival = match prev_port {
            None => current_departure,
            Some(prev) => add_days(current_departure, i64::from(rules.transition(prev, port)?))?,
        };
        let departure = add_days(arrival, i64::from(rules.stay(port)))?;

        stops.push(Stop::scheduled(port.as_str(), arrival, departure));
        current_departure = departure;
        prev_port = Some(port);
    }

    debug!(
        "Generated {} stops over {} days from {start}",
        stops.len(),
        horizon_days
    );
    Ok(stops)
}
