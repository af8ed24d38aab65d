//! Plan handler operations that return formatted wrapper types for the Planner.

use super::Planner;
use crate::{
    display::PlanSummaries,
    error::{PlannerError, Result},
    export,
    models::Plan,
    params::{DeletePlan, ExportFormat, ExportPlan, Id},
    schedule::ScheduleTable,
};

impl Planner {
    /// Handle listing plans as summaries with stop statistics.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use portcall_core::PlannerBuilder;
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let summaries = planner.list_plans_summary().await?;
    /// println!("{summaries}");
    /// # Result::<(), portcall_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn list_plans_summary(&self) -> Result<PlanSummaries> {
        Ok(PlanSummaries(self.list_plans().await?))
    }

    /// Handle showing a complete plan with all its stops.
    pub async fn show_plan(&self, params: &Id) -> Result<Option<Plan>> {
        self.get_plan(params).await
    }

    /// Handle permanently deleting a plan with confirmation.
    ///
    /// Returns the deleted plan for confirmation, or `None` if it did not
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` if `confirmed` is false
    pub async fn delete_plan(&self, params: &DeletePlan) -> Result<Option<Plan>> {
        if !params.confirmed {
            return Err(PlannerError::invalid_input("confirmed").with_reason(
                "Plan deletion requires explicit confirmation. Set 'confirmed' to true to proceed with permanent deletion.",
            ));
        }

        let id_params = Id { id: params.id };
        let plan = self.get_plan(&id_params).await?;
        if plan.is_some() {
            self.delete_plan_by_id(&id_params).await?;
        }
        Ok(plan)
    }

    /// Handle projecting a plan into its period-by-port table.
    pub async fn schedule_table(&self, params: &Id) -> Result<ScheduleTable> {
        let plan = self.require_plan(params).await?;
        Ok(ScheduleTable::build(&plan))
    }

    /// Handle exporting a plan as CSV.
    pub async fn export_csv(&self, params: &Id) -> Result<String> {
        export::to_csv(&self.require_plan(params).await?)
    }

    /// Handle exporting a plan as an HTML schedule table.
    pub async fn export_html(&self, params: &Id) -> Result<String> {
        export::to_html(&self.require_plan(params).await?)
    }

    /// Handle exporting a plan in the requested format.
    pub async fn export_plan(&self, params: &ExportPlan) -> Result<String> {
        let id = Id { id: params.id };
        match params.format {
            ExportFormat::Csv => self.export_csv(&id).await,
            ExportFormat::Html => self.export_html(&id).await,
        }
    }
}
