use portcall_core::{params::CreatePlan, Planner, PlannerBuilder};
use tempfile::TempDir;

/// Helper function to create a test planner with the given horizon
pub async fn create_test_planner(horizon_days: u32) -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_horizon_days(horizon_days)
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

/// Parameters for a plan on the seeded registry.
pub fn create_params(route: &[&str]) -> CreatePlan {
    CreatePlan {
        ship: "Yerofey Khabarov".to_string(),
        route: route.iter().map(ToString::to_string).collect(),
        start_date: "2026-01-01".to_string(),
    }
}
