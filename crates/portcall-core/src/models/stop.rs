//! Stop model definition and related functionality.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// One port call in a plan's timetable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stop {
    /// Port visited by this call
    pub port: String,

    /// Arrival date, empty while not scheduled or when skipped
    pub arrival: Option<Date>,

    /// Departure date, empty while not scheduled or when skipped
    pub departure: Option<Date>,

    /// Whether the operator dropped this call from the voyage
    #[serde(default)]
    pub skipped: bool,
}

impl Stop {
    /// Creates a dated, non-skipped stop.
    pub fn scheduled(port: impl Into<String>, arrival: Date, departure: Date) -> Self {
        Self {
            port: port.into(),
            arrival: Some(arrival),
            departure: Some(departure),
            skipped: false,
        }
    }

    /// Creates a stop with no dates yet.
    pub fn undated(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            arrival: None,
            departure: None,
            skipped: false,
        }
    }

    /// Both arrival and departure are present.
    pub fn is_dated(&self) -> bool {
        self.arrival.is_some() && self.departure.is_some()
    }

    /// At least one of arrival or departure is present.
    pub fn has_any_date(&self) -> bool {
        self.arrival.is_some() || self.departure.is_some()
    }

    /// Marks the stop as skipped and drops its dates.
    pub fn skip(&mut self) {
        self.arrival = None;
        self.departure = None;
        self.skipped = true;
    }

    /// Drops dates and the skip flag, leaving only the port.
    pub fn clear(&mut self) {
        self.arrival = None;
        self.departure = None;
        self.skipped = false;
    }
}
