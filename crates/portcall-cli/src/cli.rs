//! Command-line argument wrappers and the command runner
//!
//! Each subcommand has a clap-derived argument struct that converts into the
//! matching core parameter type, so clap attributes never leak into
//! `portcall_core`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner
//! ```
//!
//! The [`Cli`] runner executes a parsed command against a [`Planner`] and
//! hands the markdown output to the terminal renderer.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use log::info;
use portcall_core::{
    display::{CreateResult, DeleteResult, Names, OperationStatus},
    params::*,
    Planner,
};

use crate::renderer::TerminalRenderer;

// ============================================================================
// Plan commands
// ============================================================================

/// Generate a new plan
///
/// Lays out stops along the route, cycling through it from the start date
/// until the planning horizon ends.
#[derive(Args)]
pub struct CreatePlanArgs {
    /// Registered ship sailing the plan
    pub ship: String,
    /// Ports in visiting order, comma-separated (at least two)
    #[arg(
        short,
        long,
        required = true,
        value_delimiter = ',',
        help = "Ports in visiting order as comma-separated list"
    )]
    pub route: Vec<String>,
    /// First day of the plan
    #[arg(short, long, help = "First day of the plan as YYYY-MM-DD")]
    pub start: String,
}

impl From<CreatePlanArgs> for CreatePlan {
    fn from(val: CreatePlanArgs) -> Self {
        CreatePlan {
            ship: val.ship,
            route: val.route,
            start_date: val.start,
        }
    }
}

/// Show a plan with all its stops
#[derive(Args)]
pub struct ShowPlanArgs {
    #[arg(help = "Unique identifier of the plan to show")]
    pub id: u64,
    /// Show the period-by-port table instead of the stop list
    #[arg(short, long)]
    pub table: bool,
}

impl From<&ShowPlanArgs> for Id {
    fn from(val: &ShowPlanArgs) -> Self {
        Id { id: val.id }
    }
}

/// Delete a plan permanently
#[derive(Args)]
pub struct DeletePlanArgs {
    #[arg(help = "Unique identifier of the plan to permanently delete")]
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeletePlanArgs> for DeletePlan {
    fn from(val: DeletePlanArgs) -> Self {
        DeletePlan {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

/// Wipe every date of a plan
///
/// Keeps the port sequence, un-skips every stop and clears freezing. Run
/// `stop apply` afterwards to regenerate the dates.
#[derive(Args)]
pub struct ClearPlanArgs {
    #[arg(help = "Unique identifier of the plan to clear")]
    pub id: u64,
}

impl From<ClearPlanArgs> for Id {
    fn from(val: ClearPlanArgs) -> Self {
        Id { id: val.id }
    }
}

/// Replace the frozen period set of a plan
///
/// Stops of a frozen period keep their dates through later reconciliation
/// passes. Give no periods to clear freezing.
#[derive(Args)]
pub struct FreezePlanArgs {
    #[arg(help = "Unique identifier of the plan")]
    pub id: u64,
    #[arg(
        value_delimiter = ',',
        help = "Zero-based period indices to freeze, comma-separated"
    )]
    pub periods: Vec<usize>,
}

impl From<FreezePlanArgs> for FreezePeriods {
    fn from(val: FreezePlanArgs) -> Self {
        FreezePeriods {
            plan_id: val.id,
            periods: val.periods,
        }
    }
}

/// Export a plan as CSV or HTML
#[derive(Args)]
pub struct ExportPlanArgs {
    #[arg(help = "Unique identifier of the plan to export")]
    pub id: u64,
    #[arg(short, long, value_enum, default_value_t = ExportFormatArg::Csv)]
    pub format: ExportFormatArg,
    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl From<&ExportPlanArgs> for ExportPlan {
    fn from(val: &ExportPlanArgs) -> Self {
        ExportPlan {
            id: val.id,
            format: val.format.into(),
        }
    }
}

/// Command-line representation of the export formats
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ExportFormatArg {
    /// One row per stop
    Csv,
    /// Standalone document with the schedule table
    Html,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(val: ExportFormatArg) -> Self {
        match val {
            ExportFormatArg::Csv => ExportFormat::Csv,
            ExportFormatArg::Html => ExportFormat::Html,
        }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Generate a new plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// List all plans
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a plan with all its stops
    #[command(alias = "s")]
    Show(ShowPlanArgs),
    /// Delete a plan permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeletePlanArgs),
    /// Wipe every date of a plan
    Clear(ClearPlanArgs),
    /// Replace the frozen period set of a plan
    #[command(alias = "f")]
    Freeze(FreezePlanArgs),
    /// Export a plan as CSV or HTML
    #[command(alias = "x")]
    Export(ExportPlanArgs),
}

// ============================================================================
// Stop commands
// ============================================================================

/// Re-date one stop
///
/// Either date may be omitted to keep its current value. Every following
/// dated stop moves by the same number of days unless --no-propagate is
/// given.
#[derive(Args)]
pub struct EditStopArgs {
    #[arg(help = "Unique identifier of the plan")]
    pub plan_id: u64,
    #[arg(help = "Zero-based index of the stop to re-date")]
    pub index: usize,
    #[arg(short, long, help = "New arrival date as YYYY-MM-DD")]
    pub arrival: Option<String>,
    #[arg(short, long, help = "New departure date as YYYY-MM-DD")]
    pub departure: Option<String>,
    /// Leave the following stops where they are
    #[arg(long)]
    pub no_propagate: bool,
}

impl From<EditStopArgs> for EditStop {
    fn from(val: EditStopArgs) -> Self {
        EditStop {
            plan_id: val.plan_id,
            index: val.index,
            arrival: val.arrival,
            departure: val.departure,
            propagate: !val.no_propagate,
        }
    }
}

/// Apply a batch of manual edits and re-derive the timetable
///
/// Anchored stops keep their dates and every other stop is chained from its
/// predecessor using the current timing rules. With no edits the whole
/// timetable is re-derived, which picks up rule changes.
#[derive(Args)]
pub struct ApplyEditsArgs {
    #[arg(help = "Unique identifier of the plan")]
    pub plan_id: u64,
    #[arg(
        long = "set",
        value_name = "INDEX:ARRIVAL:DEPARTURE",
        value_parser = parse_manual_stop,
        help = "Anchor a stop, e.g. 3:2026-01-10:2026-01-12"
    )]
    pub anchors: Vec<ManualStop>,
    #[arg(long = "skip", value_name = "INDEX", help = "Skip the port call at this index")]
    pub skips: Vec<usize>,
    #[arg(
        long,
        num_args = 0..,
        value_delimiter = ',',
        help = "Replace the frozen periods before the pass; give no value to clear"
    )]
    pub freeze: Option<Vec<usize>>,
}

impl From<ApplyEditsArgs> for ReconcilePlan {
    fn from(val: ApplyEditsArgs) -> Self {
        let skips = val.skips.into_iter().map(|index| ManualStop {
            index,
            ..Default::default()
        });
        ReconcilePlan {
            plan_id: val.plan_id,
            edits: val.anchors.into_iter().chain(skips).collect(),
            frozen_periods: val.freeze,
        }
    }
}

fn parse_manual_stop(value: &str) -> std::result::Result<ManualStop, String> {
    let mut parts = value.splitn(3, ':');
    let (Some(index), Some(arrival), Some(departure)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err("expected INDEX:ARRIVAL:DEPARTURE".to_string());
    };
    let index = index
        .trim()
        .parse()
        .map_err(|_| format!("invalid stop index '{index}'"))?;
    Ok(ManualStop {
        index,
        arrival: arrival.trim().to_string(),
        departure: departure.trim().to_string(),
    })
}

#[derive(Subcommand)]
pub enum StopCommands {
    /// Re-date one stop
    #[command(alias = "e")]
    Edit(EditStopArgs),
    /// Apply a batch of manual edits and re-derive the timetable
    #[command(alias = "a")]
    Apply(ApplyEditsArgs),
}

// ============================================================================
// Rules and registry commands
// ============================================================================

/// Set the days at sea between two ports
#[derive(Args)]
#[command(allow_negative_numbers = true)]
pub struct SetTransitionArgs {
    #[arg(help = "Origin port")]
    pub from: String,
    #[arg(help = "Destination port")]
    pub to: String,
    #[arg(help = "Days at sea (non-negative)")]
    pub days: i64,
}

impl From<SetTransitionArgs> for SetTransition {
    fn from(val: SetTransitionArgs) -> Self {
        SetTransition {
            from: val.from,
            to: val.to,
            days: val.days,
        }
    }
}

/// Set the days alongside at one port
#[derive(Args)]
#[command(allow_negative_numbers = true)]
pub struct SetStayArgs {
    #[arg(help = "Port name")]
    pub port: String,
    #[arg(help = "Days alongside (non-negative)")]
    pub days: i64,
}

impl From<SetStayArgs> for SetStay {
    fn from(val: SetStayArgs) -> Self {
        SetStay {
            port: val.port,
            days: val.days,
        }
    }
}

/// Register a ship or a port
#[derive(Args)]
pub struct RegisterArgs {
    #[arg(help = "Name to register")]
    pub name: String,
}

impl From<RegisterArgs> for Register {
    fn from(val: RegisterArgs) -> Self {
        Register { name: val.name }
    }
}

#[derive(Subcommand)]
pub enum RulesCommands {
    /// Show every stay and transition
    #[command(alias = "s")]
    Show,
    /// Set the days at sea between two ports
    #[command(alias = "t")]
    Transition(SetTransitionArgs),
    /// Set the days alongside at one port
    Stay(SetStayArgs),
}

#[derive(Subcommand)]
pub enum ShipCommands {
    /// List registered ships
    #[command(aliases = ["l", "ls"])]
    List,
    /// Register a ship
    #[command(alias = "a")]
    Add(RegisterArgs),
}

#[derive(Subcommand)]
pub enum PortCommands {
    /// List registered ports
    #[command(aliases = ["l", "ls"])]
    List,
    /// Register a port with default timing rules
    #[command(alias = "a")]
    Add(RegisterArgs),
}

// ============================================================================
// Runner
// ============================================================================

/// Executes parsed commands against a planner.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => {
                let plan = self
                    .planner
                    .create_plan(&args.into())
                    .await
                    .context("Failed to create plan")?;
                self.renderer.render(&CreateResult::new(plan))
            }
            PlanCommands::List => self.list_plans().await,
            PlanCommands::Show(args) => {
                let id = Id::from(&args);
                if args.table {
                    let table = self
                        .planner
                        .schedule_table(&id)
                        .await
                        .context("Failed to build schedule table")?;
                    self.renderer.render(&table)
                } else {
                    let plan = self
                        .planner
                        .show_plan(&id)
                        .await
                        .context("Failed to get plan")?
                        .ok_or_else(|| anyhow!("Plan with ID {} not found", id.id))?;
                    self.renderer.render(&plan)
                }
            }
            PlanCommands::Delete(args) => {
                let id = args.id;
                let plan = self
                    .planner
                    .delete_plan(&args.into())
                    .await
                    .context("Failed to delete plan")?
                    .ok_or_else(|| anyhow!("Plan with ID {id} not found"))?;
                info!("Deleted plan {id}");
                self.renderer.render(&DeleteResult::new(plan))
            }
            PlanCommands::Clear(args) => {
                let result = self
                    .planner
                    .clear_schedule(&args.into())
                    .await
                    .context("Failed to clear plan")?;
                self.renderer.render(&result)
            }
            PlanCommands::Freeze(args) => {
                let result = self
                    .planner
                    .freeze_periods(&args.into())
                    .await
                    .context("Failed to freeze periods")?;
                self.renderer.render(&result)
            }
            PlanCommands::Export(args) => self.export_plan(&args).await,
        }
    }

    pub async fn handle_stop_command(&self, command: StopCommands) -> Result<()> {
        let result = match command {
            StopCommands::Edit(args) => self
                .planner
                .edit_stop(&args.into())
                .await
                .context("Failed to edit stop")?,
            StopCommands::Apply(args) => self
                .planner
                .reconcile(&args.into())
                .await
                .context("Failed to apply edits")?,
        };
        self.renderer.render(&result)
    }

    pub async fn handle_rules_command(&self, command: RulesCommands) -> Result<()> {
        let rules = match command {
            RulesCommands::Show => self
                .planner
                .timing_rules()
                .await
                .context("Failed to load timing rules")?,
            RulesCommands::Transition(args) => self
                .planner
                .set_transition(&args.into())
                .await
                .context("Failed to set transition")?,
            RulesCommands::Stay(args) => self
                .planner
                .set_stay(&args.into())
                .await
                .context("Failed to set stay")?,
        };
        self.renderer.render(&rules)
    }

    pub async fn handle_ship_command(&self, command: ShipCommands) -> Result<()> {
        match command {
            ShipCommands::List => {
                let ships = self
                    .planner
                    .list_ships()
                    .await
                    .context("Failed to list ships")?;
                self.renderer.render(&Names {
                    kind: "ships",
                    names: &ships,
                })
            }
            ShipCommands::Add(args) => {
                let name = self
                    .planner
                    .add_ship(&args.into())
                    .await
                    .context("Failed to register ship")?;
                self.renderer
                    .render(&OperationStatus::success(format!("Registered ship {name}")))
            }
        }
    }

    pub async fn handle_port_command(&self, command: PortCommands) -> Result<()> {
        match command {
            PortCommands::List => {
                let ports = self
                    .planner
                    .list_ports()
                    .await
                    .context("Failed to list ports")?;
                self.renderer.render(&Names {
                    kind: "ports",
                    names: &ports,
                })
            }
            PortCommands::Add(args) => {
                let name = self
                    .planner
                    .add_port(&args.into())
                    .await
                    .context("Failed to register port")?;
                self.renderer
                    .render(&OperationStatus::success(format!("Registered port {name}")))
            }
        }
    }

    pub async fn list_plans(&self) -> Result<()> {
        let summaries = self
            .planner
            .list_plans_summary()
            .await
            .context("Failed to list plans")?;
        self.renderer.render(&summaries)
    }

    async fn export_plan(&self, args: &ExportPlanArgs) -> Result<()> {
        let document = self
            .planner
            .export_plan(&args.into())
            .await
            .context("Failed to export plan")?;

        match &args.output {
            Some(path) => {
                std::fs::write(path, &document)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("Exported plan {} to {}", args.id, path.display());
                self.renderer.render(&OperationStatus::success(format!(
                    "Exported plan {} to {}",
                    args.id,
                    path.display()
                )))
            }
            None => self.renderer.write_raw(&document),
        }
    }
}
