//! Database operations and SQLite management for plans and timing rules.
//!
//! This module holds the plan store: the ship and port registries, the
//! transition and stay tables, and every plan with its stops. Each mutation
//! runs in one transaction. Read-modify-write passes over a plan take an
//! IMMEDIATE transaction so that concurrent writers are serialized and a
//! reader never sees a half-rewritten stop list.

use std::{path::Path, time::Duration};

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod plan_queries;
pub mod registry_queries;
pub mod utils;

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens a connection, creates the schema if needed and seeds a fresh
    /// database with the default registries and timing rules.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
