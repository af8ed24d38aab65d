//! Database schema initialization and first-run seeding.

use rusqlite::{params, Transaction, TransactionBehavior};

use crate::{
    error::{DatabaseResultExt, Result},
    timing::TimingRules,
};

/// Ships registered in a fresh database.
pub const DEFAULT_SHIPS: [&str; 4] = [
    "Anatoly Ivanov",
    "Yerofey Khabarov",
    "Russky Vostok",
    "Mekhanik Kraskovsky",
];

/// Ports registered in a fresh database.
pub const DEFAULT_PORTS: [&str; 10] = [
    "Vladivostok",
    "Krabozavodsk (Shikotan)",
    "Malokurilskoye (Shikotan)",
    "Yuzhno-Kurilsk (Kunashir)",
    "Kurilsk (Iturup)",
    "Korsakov (Sakhalin)",
    "Podyapolskogo",
    "Severo-Kurilsk",
    "Nevelsk",
    "Slavyanka",
];

const COUNT_PORTS_SQL: &str = "SELECT COUNT(*) FROM ports";
const COUNT_SHIPS_SQL: &str = "SELECT COUNT(*) FROM ships";

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.seed_defaults()
    }

    /// Fills empty registries with the default ships, ports and timing
    /// rules.
    fn seed_defaults(&self) -> Result<()> {
        let tx = Transaction::new_unchecked(&self.connection, TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let ships: i64 = tx
            .query_row(COUNT_SHIPS_SQL, [], |row| row.get(0))
            .db_context("Failed to count ships")?;
        if ships == 0 {
            for ship in DEFAULT_SHIPS {
                tx.execute(super::registry_queries::INSERT_SHIP_SQL, params![ship])
                    .db_context("Failed to seed ships")?;
            }
        }

        let ports: i64 = tx
            .query_row(COUNT_PORTS_SQL, [], |row| row.get(0))
            .db_context("Failed to count ports")?;
        if ports == 0 {
            let rules = TimingRules::with_defaults(
                DEFAULT_PORTS.iter().map(ToString::to_string).collect(),
            );
            super::registry_queries::write_rules(&tx, &rules)?;
            log::debug!("Seeded {} ports with default timing rules", rules.ports.len());
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }
}
