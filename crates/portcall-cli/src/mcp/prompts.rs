//! Prompt templates for MCP server

/// Argument definition for a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplateArg {
    pub name: String,
    pub description: String,
    pub required: bool,
}

/// Definition of a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub name: String,
    pub description: String,
    pub template: String,
    pub arguments: Vec<PromptTemplateArg>,
}

impl PromptTemplate {
    /// Substitute `{name}` placeholders with argument values.
    ///
    /// Returns the name of the first required argument without a value.
    pub fn apply<'a, F>(&self, lookup: F) -> Result<String, String>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let mut text = self.template.clone();
        for arg in &self.arguments {
            match lookup(&arg.name) {
                Some(value) => text = text.replace(&format!("{{{}}}", arg.name), value),
                None if arg.required => return Err(arg.name.clone()),
                None => text = text.replace(&format!("{{{}}}", arg.name), "(not given)"),
            }
        }
        Ok(text)
    }
}

/// Predefined prompt templates for timetable planning
pub fn get_prompt_templates() -> Vec<PromptTemplate> {
    vec![
        PromptTemplate {
            name: "plan_season".to_string(),
            description: "Lay out a season of port calls for a ship using Portcall's MCP tools"
                .to_string(),
            template: r#"You are a **Portcall scheduler** preparing a season timetable.

# Request
- Ship: {ship}
- Route: {route}
- Start date: {start_date}

# Step 1: Check the Registries
Use `list_ships` and `list_ports` to confirm the ship and every port of the route are registered. Register missing ones with `add_ship` / `add_port` only if the user asked for them.

# Step 2: Check the Timing Rules
Use `show_rules` to review stays and transitions for the route. Adjust them with `set_stay` and `set_transition` before creating the plan, since generation reads the rules once.

# Step 3: Create the Plan
Call `create_plan` with the ship, the route in visiting order and the start date as YYYY-MM-DD.

# Step 4: Review
Use `schedule_table` to show the period-by-port grid and point out anything unusual, such as a very short final period."#
                .to_string(),
            arguments: vec![
                PromptTemplateArg {
                    name: "ship".to_string(),
                    description: "Ship that will sail the route".to_string(),
                    required: true,
                },
                PromptTemplateArg {
                    name: "route".to_string(),
                    description: "Ports in visiting order, comma-separated".to_string(),
                    required: true,
                },
                PromptTemplateArg {
                    name: "start_date".to_string(),
                    description: "First day of the season as YYYY-MM-DD".to_string(),
                    required: true,
                },
            ],
        },
        PromptTemplate {
            name: "reschedule".to_string(),
            description: "Absorb a disruption into an existing plan".to_string(),
            template: r#"You are a **Portcall scheduler** absorbing a disruption into plan {plan_id}.

# Disruption
{disruption}

# Procedure
1. Use `show_plan` to see every stop with its index, dates and status.
2. Decide which periods must not move and freeze them with `freeze_periods`. Frozen stops keep their dates through every later pass.
3. For a single delayed call, use `edit_stop` with the new departure; following stops move by the same number of days.
4. For several changes at once, use `reconcile_plan` with one edit per affected stop. Give both dates to anchor a stop, or leave both empty to skip the call.
5. Show the result with `schedule_table` and summarize which calls moved and by how much."#
                .to_string(),
            arguments: vec![
                PromptTemplateArg {
                    name: "plan_id".to_string(),
                    description: "ID of the plan to change".to_string(),
                    required: true,
                },
                PromptTemplateArg {
                    name: "disruption".to_string(),
                    description: "What happened: weather hold, cancelled call, port closure"
                        .to_string(),
                    required: false,
                },
            ],
        },
    ]
}
