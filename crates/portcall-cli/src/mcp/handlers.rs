//! MCP tool handlers implementation

use std::sync::Arc;

use log::debug;
use portcall_core::{
    display::{CreateResult, DeleteResult, Names, OperationStatus},
    params as core, Planner,
};
use rmcp::{
    handler::server::tool::Parameters,
    model::{
        CallToolResult, Content, GetPromptRequestParam, GetPromptResult, ListPromptsResult,
        PaginatedRequestParam, Prompt, PromptArgument, PromptMessage, PromptMessageContent,
        PromptMessageRole,
    },
    service::RequestContext,
    ErrorData, RoleServer,
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Mutex;

use super::{errors::to_mcp_error, prompts::get_prompt_templates};

// ============================================================================
// Generic Parameter Wrapper
// ============================================================================
//
// Core parameter types carry an optional schemars derive but no MCP
// knowledge. The transparent wrapper adds the trait surface rmcp needs
// without touching the core definitions.

/// Generic MCP wrapper for core parameter types with serde integration
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type CreatePlan = McpParams<core::CreatePlan>;
pub type DeletePlan = McpParams<core::DeletePlan>;
pub type EditStop = McpParams<core::EditStop>;
pub type ReconcilePlan = McpParams<core::ReconcilePlan>;
pub type FreezePeriods = McpParams<core::FreezePeriods>;
pub type ExportPlan = McpParams<core::ExportPlan>;
pub type SetTransition = McpParams<core::SetTransition>;
pub type SetStay = McpParams<core::SetStay>;
pub type Register = McpParams<core::Register>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text_result(text: impl ToString) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(text.to_string())]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    planner: Arc<Mutex<Planner>>,
}

impl McpHandlers {
    pub fn new(planner: Arc<Mutex<Planner>>) -> Self {
        Self { planner }
    }

    pub async fn create_plan(&self, Parameters(params): Parameters<CreatePlan>) -> McpResult {
        debug!("create_plan: {params:?}");

        let plan = self
            .planner
            .lock()
            .await
            .create_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create plan", &e))?;

        text_result(CreateResult::new(plan))
    }

    pub async fn list_plans(&self) -> McpResult {
        debug!("list_plans");

        let summaries = self
            .planner
            .lock()
            .await
            .list_plans_summary()
            .await
            .map_err(|e| to_mcp_error("Failed to list plans", &e))?;

        text_result(format!("# Plans\n\n{summaries}"))
    }

    pub async fn show_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_plan: {params:?}");

        let plan = self
            .planner
            .lock()
            .await
            .require_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get plan", &e))?;

        text_result(plan)
    }

    pub async fn schedule_table(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("schedule_table: {params:?}");

        let table = self
            .planner
            .lock()
            .await
            .schedule_table(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to build schedule table", &e))?;

        text_result(table)
    }

    pub async fn delete_plan(&self, Parameters(params): Parameters<DeletePlan>) -> McpResult {
        debug!("delete_plan: {params:?}");
        let inner_params = params.as_ref();

        let deleted = self
            .planner
            .lock()
            .await
            .delete_plan(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to delete plan", &e))?
            .ok_or_else(|| {
                ErrorData::invalid_params(
                    format!("Plan with ID {} not found", inner_params.id),
                    None,
                )
            })?;

        text_result(DeleteResult::new(deleted))
    }

    pub async fn clear_schedule(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("clear_schedule: {params:?}");

        let result = self
            .planner
            .lock()
            .await
            .clear_schedule(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to clear plan", &e))?;

        text_result(result)
    }

    pub async fn freeze_periods(&self, Parameters(params): Parameters<FreezePeriods>) -> McpResult {
        debug!("freeze_periods: {params:?}");

        let result = self
            .planner
            .lock()
            .await
            .freeze_periods(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to freeze periods", &e))?;

        text_result(result)
    }

    pub async fn export_plan(&self, Parameters(params): Parameters<ExportPlan>) -> McpResult {
        debug!("export_plan: {params:?}");

        let document = self
            .planner
            .lock()
            .await
            .export_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to export plan", &e))?;

        text_result(document)
    }

    pub async fn edit_stop(&self, Parameters(params): Parameters<EditStop>) -> McpResult {
        debug!("edit_stop: {params:?}");

        let result = self
            .planner
            .lock()
            .await
            .edit_stop(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to edit stop", &e))?;

        text_result(result)
    }

    pub async fn reconcile_plan(&self, Parameters(params): Parameters<ReconcilePlan>) -> McpResult {
        debug!("reconcile_plan: {params:?}");

        let result = self
            .planner
            .lock()
            .await
            .reconcile(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to reconcile plan", &e))?;

        text_result(result)
    }

    pub async fn show_rules(&self) -> McpResult {
        debug!("show_rules");

        let rules = self
            .planner
            .lock()
            .await
            .timing_rules()
            .await
            .map_err(|e| to_mcp_error("Failed to load timing rules", &e))?;

        text_result(rules)
    }

    pub async fn set_transition(&self, Parameters(params): Parameters<SetTransition>) -> McpResult {
        debug!("set_transition: {params:?}");
        let inner_params = params.as_ref();

        self.planner
            .lock()
            .await
            .set_transition(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to set transition", &e))?;

        text_result(OperationStatus::success(format!(
            "Transition {} → {} is now {} days. Existing plans pick this up on their next reconcile_plan call.",
            inner_params.from, inner_params.to, inner_params.days
        )))
    }

    pub async fn set_stay(&self, Parameters(params): Parameters<SetStay>) -> McpResult {
        debug!("set_stay: {params:?}");
        let inner_params = params.as_ref();

        self.planner
            .lock()
            .await
            .set_stay(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to set stay", &e))?;

        text_result(OperationStatus::success(format!(
            "Stay at {} is now {} days. Existing plans pick this up on their next reconcile_plan call.",
            inner_params.port, inner_params.days
        )))
    }

    pub async fn list_ships(&self) -> McpResult {
        let ships = self
            .planner
            .lock()
            .await
            .list_ships()
            .await
            .map_err(|e| to_mcp_error("Failed to list ships", &e))?;

        text_result(Names {
            kind: "ships",
            names: &ships,
        })
    }

    pub async fn list_ports(&self) -> McpResult {
        let ports = self
            .planner
            .lock()
            .await
            .list_ports()
            .await
            .map_err(|e| to_mcp_error("Failed to list ports", &e))?;

        text_result(Names {
            kind: "ports",
            names: &ports,
        })
    }

    pub async fn add_ship(&self, Parameters(params): Parameters<Register>) -> McpResult {
        debug!("add_ship: {params:?}");

        let name = self
            .planner
            .lock()
            .await
            .add_ship(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to register ship", &e))?;

        text_result(OperationStatus::success(format!("Registered ship {name}")))
    }

    pub async fn add_port(&self, Parameters(params): Parameters<Register>) -> McpResult {
        debug!("add_port: {params:?}");

        let name = self
            .planner
            .lock()
            .await
            .add_port(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to register port", &e))?;

        text_result(OperationStatus::success(format!(
            "Registered port {name} with default stay and transitions"
        )))
    }

    /// List all available prompts
    pub fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> ListPromptsResult {
        debug!("list_prompts");

        let prompts = get_prompt_templates()
            .iter()
            .map(|template| {
                Prompt::new(
                    &template.name,
                    Some(&template.description),
                    Some(
                        template
                            .arguments
                            .iter()
                            .map(|arg| PromptArgument {
                                name: arg.name.clone(),
                                description: Some(arg.description.clone()),
                                required: Some(arg.required),
                            })
                            .collect(),
                    ),
                )
            })
            .collect();

        ListPromptsResult {
            next_cursor: None,
            prompts,
        }
    }

    /// Get a specific prompt by name and apply arguments
    pub fn get_prompt(
        &self,
        request: &GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, ErrorData> {
        debug!("get_prompt: {}", request.name);

        let templates = get_prompt_templates();
        let template = templates
            .iter()
            .find(|t| t.name == request.name)
            .ok_or_else(|| ErrorData::invalid_params("Prompt not found", None))?;

        let prompt_text = template
            .apply(|name| {
                request
                    .arguments
                    .as_ref()
                    .and_then(|args| args.get(name))
                    .and_then(Value::as_str)
            })
            .map_err(|missing| {
                ErrorData::invalid_params(
                    format!("Required argument '{missing}' is missing"),
                    None,
                )
            })?;

        Ok(GetPromptResult {
            description: Some(template.description.clone()),
            messages: vec![PromptMessage {
                role: PromptMessageRole::User,
                content: PromptMessageContent::text(prompt_text),
            }],
        })
    }
}
