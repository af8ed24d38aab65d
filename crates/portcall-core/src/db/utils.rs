//! Column conversion helpers shared by the query modules.

use jiff::{civil::Date, Timestamp};
use rusqlite::{types::Type, Row};
use serde::de::DeserializeOwned;

fn conversion_error<E>(idx: usize, e: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
}

/// Reads an RFC 3339 timestamp column.
pub(crate) fn timestamp_column(row: &Row, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| conversion_error(idx, e))
}

/// Reads a required `YYYY-MM-DD` column.
pub(crate) fn date_column(row: &Row, idx: usize) -> rusqlite::Result<Date> {
    row.get::<_, String>(idx)?
        .parse::<Date>()
        .map_err(|e| conversion_error(idx, e))
}

/// Reads a nullable `YYYY-MM-DD` column.
pub(crate) fn optional_date_column(row: &Row, idx: usize) -> rusqlite::Result<Option<Date>> {
    row.get::<_, Option<String>>(idx)?
        .map(|s| s.parse::<Date>().map_err(|e| conversion_error(idx, e)))
        .transpose()
}

/// Reads a JSON-encoded column.
pub(crate) fn json_column<T: DeserializeOwned>(row: &Row, idx: usize) -> rusqlite::Result<T> {
    let text = row.get::<_, String>(idx)?;
    serde_json::from_str(&text).map_err(|e| conversion_error(idx, e))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rusqlite::Connection;

    use super::*;

    #[test]
    fn test_column_helpers() {
        let conn = Connection::open_in_memory().unwrap();
        let (day, missing, list): (Date, Option<Date>, Vec<String>) = conn
            .query_row(
                "SELECT '2026-01-04', NULL, '[\"Vladivostok\",\"Nevelsk\"]'",
                [],
                |row| {
                    Ok((
                        date_column(row, 0)?,
                        optional_date_column(row, 1)?,
                        json_column(row, 2)?,
                    ))
                },
            )
            .unwrap();

        assert_eq!(day, date(2026, 1, 4));
        assert_eq!(missing, None);
        assert_eq!(list, vec!["Vladivostok", "Nevelsk"]);
    }

    #[test]
    fn test_bad_date_column_is_a_conversion_error() {
        let conn = Connection::open_in_memory().unwrap();
        let err = conn
            .query_row("SELECT 'not a date'", [], |row| date_column(row, 0))
            .unwrap_err();
        assert!(matches!(err, rusqlite::Error::FromSqlConversionFailure(0, _, _)));
    }
}
