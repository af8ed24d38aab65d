//! Portcall CLI Application
//!
//! Command-line interface and MCP server for the port-call timetable
//! planner.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, PortcallMcpServer};
use portcall_core::PlannerBuilder;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        horizon_days,
        command,
    } = Args::parse();

    let mut builder = PlannerBuilder::new().with_database_path(database_file);
    if let Some(days) = horizon_days {
        builder = builder.with_horizon_days(days);
    }
    let planner = builder
        .build()
        .await
        .context("Failed to initialize planner")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Portcall started");

    match command {
        Some(Plan { command }) => {
            Cli::new(planner, renderer)
                .handle_plan_command(command)
                .await
        }
        Some(Stop { command }) => {
            Cli::new(planner, renderer)
                .handle_stop_command(command)
                .await
        }
        Some(Rules { command }) => {
            Cli::new(planner, renderer)
                .handle_rules_command(command)
                .await
        }
        Some(Ship { command }) => {
            Cli::new(planner, renderer)
                .handle_ship_command(command)
                .await
        }
        Some(Port { command }) => {
            Cli::new(planner, renderer)
                .handle_port_command(command)
                .await
        }
        Some(Serve) => {
            info!("Starting Portcall MCP server");
            run_stdio_server(PortcallMcpServer::new(planner))
                .await
                .context("MCP server failed")
        }
        None => Cli::new(planner, renderer).list_plans().await,
    }
}
