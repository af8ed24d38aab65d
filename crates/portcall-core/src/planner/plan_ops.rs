//! Plan operations for the Planner.

use log::info;

use super::Planner;
use crate::{
    error::{PlannerError, Result},
    models::{Plan, PlanSummary},
    params::{CreatePlan, Id},
};

impl Planner {
    /// Generates a plan for a registered ship along `route`, starting on
    /// `start_date` and running for the configured horizon.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` for an unknown ship or port, a
    /// route shorter than two ports, or a malformed start date.
    pub async fn create_plan(&self, params: &CreatePlan) -> Result<Plan> {
        let start_date = params.parse_start_date()?;
        let ship = params.ship.trim().to_string();
        let route: Vec<String> = params.route.iter().map(|p| p.trim().to_string()).collect();
        let horizon_days = self.horizon_days;

        let plan = self
            .with_database(move |db| db.create_plan(&ship, &route, start_date, horizon_days))
            .await?;

        info!(
            "Created plan {} for {} with {} stops until {}",
            plan.id,
            plan.ship,
            plan.stops.len(),
            plan.end_date
        );
        Ok(plan)
    }

    /// Retrieves a plan with its stops by ID.
    pub async fn get_plan(&self, params: &Id) -> Result<Option<Plan>> {
        let plan_id = params.id;
        self.with_database(move |db| db.get_plan(plan_id)).await
    }

    /// Retrieves a plan by ID, failing when it does not exist.
    pub async fn require_plan(&self, params: &Id) -> Result<Plan> {
        self.get_plan(params)
            .await?
            .ok_or(PlannerError::PlanNotFound { id: params.id })
    }

    /// Lists every plan as a summary.
    pub async fn list_plans(&self) -> Result<Vec<PlanSummary>> {
        self.with_database(|db| db.list_plans()).await
    }

    /// Permanently deletes a plan and its stops.
    pub async fn delete_plan_by_id(&self, params: &Id) -> Result<()> {
        let plan_id = params.id;
        self.with_database(move |db| db.delete_plan(plan_id)).await?;
        info!("Deleted plan {plan_id}");
        Ok(())
    }
}
