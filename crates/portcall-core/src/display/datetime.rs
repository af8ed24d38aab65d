//! Timestamp display in the local time zone.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// Formats a bookkeeping timestamp (`created_at`, `updated_at`) as
/// `YYYY-MM-DD HH:MM:SS TZ` in the system time zone.
///
/// Plan dates are whole days and never go through this wrapper.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let zoned = self.0.to_zoned(TimeZone::system());
        write!(f, "{}", zoned.strftime("%Y-%m-%d %H:%M:%S %Z"))
    }
}
