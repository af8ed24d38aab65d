use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{PlanCommands, PortCommands, RulesCommands, ShipCommands, StopCommands};

/// Port-call timetable planner for vessels sailing cyclic routes
///
/// Portcall lays out a season of port calls for a ship from its route and
/// the timing rules between ports, then keeps the timetable consistent as
/// operators move, skip or freeze individual calls. It runs as a local CLI or
/// as an MCP (Model Context Protocol) server for AI assistants.
#[derive(Parser)]
#[command(version, about, name = "portcall")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/portcall/portcall.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Days past the start date over which new plans are generated
    #[arg(long, global = true)]
    pub horizon_days: Option<u32>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Portcall CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Create, inspect and export plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Re-date, skip and anchor individual stops
    #[command(alias = "s")]
    Stop {
        #[command(subcommand)]
        command: StopCommands,
    },
    /// Inspect and change transition and stay days
    #[command(alias = "r")]
    Rules {
        #[command(subcommand)]
        command: RulesCommands,
    },
    /// Manage the ship registry
    Ship {
        #[command(subcommand)]
        command: ShipCommands,
    },
    /// Manage the port registry
    Port {
        #[command(subcommand)]
        command: PortCommands,
    },
    /// Start the MCP server
    Serve,
}
