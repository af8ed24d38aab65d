//! Ship and port registries and the timing rule tables.

use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    timing::{registry_name, TimingRules},
};

pub(super) const INSERT_SHIP_SQL: &str = "INSERT INTO ships (name) VALUES (?1)";
const INSERT_PORT_SQL: &str = "INSERT OR IGNORE INTO ports (name) VALUES (?1)";
const UPSERT_TRANSITION_SQL: &str = "INSERT INTO transitions (from_port, to_port, days) VALUES (?1, ?2, ?3) ON CONFLICT(from_port, to_port) DO UPDATE SET days = excluded.days";
const UPSERT_STAY_SQL: &str = "INSERT INTO stays (port, days) VALUES (?1, ?2) ON CONFLICT(port) DO UPDATE SET days = excluded.days";
const SELECT_SHIPS_SQL: &str = "SELECT name FROM ships ORDER BY id";
const SELECT_SHIP_EXISTS_SQL: &str = "SELECT 1 FROM ships WHERE name = ?1";
const SELECT_PORTS_SQL: &str = "SELECT name FROM ports ORDER BY id";
const SELECT_TRANSITIONS_SQL: &str = "SELECT from_port, to_port, days FROM transitions";
const SELECT_STAYS_SQL: &str = "SELECT port, days FROM stays";

fn query_names(conn: &Connection, sql: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(sql).db_context("Failed to prepare query")?;
    let names = stmt
        .query_map([], |row| row.get(0))
        .db_context("Failed to query names")?
        .collect::<std::result::Result<Vec<String>, _>>()
        .db_context("Failed to fetch names")?;
    Ok(names)
}

/// Reads the port registry and both rule tables.
pub(crate) fn load_rules(conn: &Connection) -> Result<TimingRules> {
    let mut rules = TimingRules::new(query_names(conn, SELECT_PORTS_SQL)?);

    let mut stmt = conn
        .prepare(SELECT_TRANSITIONS_SQL)
        .db_context("Failed to prepare query")?;
    let transitions = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, u32>(2)?,
            ))
        })
        .db_context("Failed to query transitions")?;
    for transition in transitions {
        let (from, to, days) = transition.db_context("Failed to fetch transition")?;
        rules.transitions.entry(from).or_default().insert(to, days);
    }

    let mut stmt = conn
        .prepare(SELECT_STAYS_SQL)
        .db_context("Failed to prepare query")?;
    let stays = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, u32>(1)?)))
        .db_context("Failed to query stays")?;
    for stay in stays {
        let (port, days) = stay.db_context("Failed to fetch stay")?;
        rules.stays.insert(port, days);
    }

    Ok(rules)
}

/// Writes every port and rule of `rules`, replacing existing values.
pub(super) fn write_rules(conn: &Connection, rules: &TimingRules) -> Result<()> {
    for port in &rules.ports {
        conn.execute(INSERT_PORT_SQL, params![port])
            .db_context("Failed to insert port")?;
    }
    for (from, row) in &rules.transitions {
        for (to, days) in row {
            conn.execute(UPSERT_TRANSITION_SQL, params![from, to, days])
                .db_context("Failed to write transition")?;
        }
    }
    for (port, days) in &rules.stays {
        conn.execute(UPSERT_STAY_SQL, params![port, days])
            .db_context("Failed to write stay")?;
    }
    Ok(())
}

impl super::Database {
    /// Loads the current timing rules.
    pub fn timing_rules(&self) -> Result<TimingRules> {
        load_rules(&self.connection)
    }

    /// Lists registered ships in registration order.
    pub fn list_ships(&self) -> Result<Vec<String>> {
        query_names(&self.connection, SELECT_SHIPS_SQL)
    }

    /// Lists registered ports in registration order.
    pub fn list_ports(&self) -> Result<Vec<String>> {
        query_names(&self.connection, SELECT_PORTS_SQL)
    }

    /// Whether `name` is a registered ship.
    pub fn ship_exists(&self, name: &str) -> Result<bool> {
        ship_exists_in(&self.connection, name)
    }

    /// Registers a new ship.
    pub fn add_ship(&mut self, name: &str) -> Result<String> {
        let name = registry_name("ship", name)?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        if ship_exists_in(&tx, name)? {
            return Err(PlannerError::invalid_input("ship")
                .with_reason(format!("Ship '{name}' is already registered")));
        }
        tx.execute(INSERT_SHIP_SQL, params![name])
            .db_context("Failed to insert ship")?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(name.to_string())
    }

    /// Registers a new port together with default transitions to and from
    /// every existing port and a default stay.
    pub fn add_port(&mut self, name: &str) -> Result<String> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let mut rules = load_rules(&tx)?;
        rules.add_port(name)?;
        write_rules(&tx, &rules)?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(name.trim().to_string())
    }

    /// Sets the days at sea for one ordered port pair.
    pub fn set_transition(&mut self, from: &str, to: &str, days: i64) -> Result<TimingRules> {
        self.update_rules(|conn, rules| {
            rules.set_transition(from, to, days)?;
            let days = rules.transition(from, to)?;
            conn.execute(UPSERT_TRANSITION_SQL, params![from, to, days])
                .db_context("Failed to write transition")?;
            Ok(())
        })
    }

    /// Sets the days alongside for one port.
    pub fn set_stay(&mut self, port: &str, days: i64) -> Result<TimingRules> {
        self.update_rules(|conn, rules| {
            rules.set_stay(port, days)?;
            conn.execute(UPSERT_STAY_SQL, params![port, rules.stay(port)])
                .db_context("Failed to write stay")?;
            Ok(())
        })
    }

    /// Validates one rule change against the stored rules and writes only
    /// the row it touches.
    fn update_rules<F>(&mut self, change: F) -> Result<TimingRules>
    where
        F: FnOnce(&Connection, &mut TimingRules) -> Result<()>,
    {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let mut rules = load_rules(&tx)?;
        change(&tx, &mut rules)?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(rules)
    }
}

pub(super) fn ship_exists_in(conn: &Connection, name: &str) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row(SELECT_SHIP_EXISTS_SQL, params![name], |row| row.get(0))
        .optional()
        .db_context("Failed to check ship existence")?;
    Ok(found.is_some())
}
