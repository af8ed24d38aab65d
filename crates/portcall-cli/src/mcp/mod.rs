//! MCP server implementation for Portcall
//!
//! Exposes the planner as Model Context Protocol tools over stdio. Every tool
//! mirrors a CLI command and returns the same markdown the CLI prints.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use log::{debug, error, info};
use portcall_core::Planner;
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{
        GetPromptRequestParam, GetPromptResult, Implementation, ListPromptsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler,
};
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::Mutex,
};

pub mod errors;
pub mod handlers;
pub mod prompts;

use handlers::{
    CreatePlan, DeletePlan, EditStop, ExportPlan, FreezePeriods, Id, McpHandlers, McpResult,
    ReconcilePlan, Register, SetStay, SetTransition,
};

const INSTRUCTIONS: &str = r#"Portcall plans cyclic port-call timetables for ships.

## Core Concepts
- **Plan**: one ship sailing a fixed route of ports, repeated from a start date until the planning horizon ends
- **Stop**: one port call with an arrival and a departure date (YYYY-MM-DD). Stops are addressed by zero-based index
- **Period**: one pass through the route. Stop `i` belongs to period `i / route length`
- **Timing rules**: days at sea between every ordered pair of ports, and days alongside at each port

## Changing a Timetable
- `edit_stop` re-dates one stop and by default shifts every following stop by the same number of days
- `reconcile_plan` applies a batch of edits: both dates anchor a stop, both empty skip the call. Every other stop is re-derived from its predecessor using the current rules
- `freeze_periods` protects whole periods: their stops keep their dates through every later pass
- Rule changes (`set_transition`, `set_stay`) do not touch existing plans until `reconcile_plan` runs

## Tool Categories
- **Plans**: create_plan, list_plans, show_plan, schedule_table, delete_plan, clear_schedule, export_plan
- **Stops**: edit_stop, reconcile_plan, freeze_periods
- **Rules and registries**: show_rules, set_transition, set_stay, list_ships, add_ship, list_ports, add_port"#;

/// MCP server for Portcall
#[derive(Clone)]
pub struct PortcallMcpServer {
    planner: Arc<Mutex<Planner>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl PortcallMcpServer {
    pub fn new(planner: Planner) -> Self {
        Self {
            planner: Arc::new(Mutex::new(planner)),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> McpHandlers {
        McpHandlers::new(self.planner.clone())
    }

    #[tool(
        name = "create_plan",
        description = "Generate a timetable for a registered ship. Provide the ship, the route as a list of at least two registered ports in visiting order, and start_date as YYYY-MM-DD. The route repeats until the planning horizon ends. Returns the new plan with every stop."
    )]
    async fn create_plan(&self, params: Parameters<CreatePlan>) -> McpResult {
        self.handlers().create_plan(params).await
    }

    #[tool(
        name = "list_plans",
        description = "List all plans with ship, route, horizon and stop counts."
    )]
    async fn list_plans(&self) -> McpResult {
        self.handlers().list_plans().await
    }

    #[tool(
        name = "show_plan",
        description = "Show a plan with every stop: index, period, port, arrival, departure and status (frozen, skipped or undated). Use the indices shown here for edit_stop and reconcile_plan."
    )]
    async fn show_plan(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_plan(params).await
    }

    #[tool(
        name = "schedule_table",
        description = "Show a plan as a grid with one row per period and one column per route port. Cells missing at the end of the last period are marked with ¤."
    )]
    async fn schedule_table(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().schedule_table(params).await
    }

    #[tool(
        name = "delete_plan",
        description = "Permanently delete a plan and all its stops. Requires confirmed=true. This cannot be undone."
    )]
    async fn delete_plan(&self, params: Parameters<DeletePlan>) -> McpResult {
        self.handlers().delete_plan(params).await
    }

    #[tool(
        name = "clear_schedule",
        description = "Wipe every date of a plan, un-skip every stop and clear freezing, keeping the port sequence. Call reconcile_plan with no edits afterwards to regenerate the dates."
    )]
    async fn clear_schedule(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().clear_schedule(params).await
    }

    #[tool(
        name = "freeze_periods",
        description = "Replace the set of frozen periods of a plan. Stops in a frozen period keep their dates through later edits and reconciliation. An empty list clears freezing. Dates are not changed by this call."
    )]
    async fn freeze_periods(&self, params: Parameters<FreezePeriods>) -> McpResult {
        self.handlers().freeze_periods(params).await
    }

    #[tool(
        name = "export_plan",
        description = "Export a plan as CSV (one row per stop, the default) or as a standalone HTML document with the schedule table. Set format to 'csv' or 'html'."
    )]
    async fn export_plan(&self, params: Parameters<ExportPlan>) -> McpResult {
        self.handlers().export_plan(params).await
    }

    #[tool(
        name = "edit_stop",
        description = "Re-date one stop. Give arrival and/or departure as YYYY-MM-DD; an omitted date keeps its value. With propagate=true (default) every following dated stop moves by the same number of days, taken from the departure change or, failing that, the arrival change. Stops in frozen periods cannot be edited and are not moved."
    )]
    async fn edit_stop(&self, params: Parameters<EditStop>) -> McpResult {
        self.handlers().edit_stop(params).await
    }

    #[tool(
        name = "reconcile_plan",
        description = "Apply a batch of manual edits and re-derive the rest of the timetable from the current timing rules. Each edit names a stop index with arrival and departure: both dates anchor the stop, both empty skip the port call. Optionally replace frozen_periods first. Frozen stops and anchors keep their dates; every other stop is chained from its predecessor."
    )]
    async fn reconcile_plan(&self, params: Parameters<ReconcilePlan>) -> McpResult {
        self.handlers().reconcile_plan(params).await
    }

    #[tool(
        name = "show_rules",
        description = "Show the stay days of every port and the transition days between every pair of ports."
    )]
    async fn show_rules(&self) -> McpResult {
        self.handlers().show_rules().await
    }

    #[tool(
        name = "set_transition",
        description = "Set the days at sea from one registered port to another. Days must be non-negative. Existing plans are unchanged until reconcile_plan runs."
    )]
    async fn set_transition(&self, params: Parameters<SetTransition>) -> McpResult {
        self.handlers().set_transition(params).await
    }

    #[tool(
        name = "set_stay",
        description = "Set the days alongside at a registered port. Days must be non-negative. Existing plans are unchanged until reconcile_plan runs."
    )]
    async fn set_stay(&self, params: Parameters<SetStay>) -> McpResult {
        self.handlers().set_stay(params).await
    }

    #[tool(name = "list_ships", description = "List registered ships.")]
    async fn list_ships(&self) -> McpResult {
        self.handlers().list_ships().await
    }

    #[tool(name = "add_ship", description = "Register a new ship by name.")]
    async fn add_ship(&self, params: Parameters<Register>) -> McpResult {
        self.handlers().add_ship(params).await
    }

    #[tool(name = "list_ports", description = "List registered ports in registration order.")]
    async fn list_ports(&self) -> McpResult {
        self.handlers().list_ports().await
    }

    #[tool(
        name = "add_port",
        description = "Register a new port. It gets a default stay of 1 day and a default transition of 2 days to and from every existing port."
    )]
    async fn add_port(&self, params: Parameters<Register>) -> McpResult {
        self.handlers().add_port(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for PortcallMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: "portcall".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }

    async fn list_prompts(
        &self,
        request: Option<PaginatedRequestParam>,
        context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(self.handlers().list_prompts(request, context))
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.handlers().get_prompt(&request, context)
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: PortcallMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Portcall MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
