use jiff::civil::date;
use portcall_core::{
    db::migrations::{DEFAULT_PORTS, DEFAULT_SHIPS},
    Database, PlannerError, Stop,
};
use tempfile::{NamedTempFile, TempDir};

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn route() -> Vec<String> {
    vec!["Vladivostok".to_string(), "Slavyanka".to_string()]
}

#[test]
fn test_fresh_database_is_seeded() {
    let (_temp_file, db) = create_test_db();

    assert_eq!(db.list_ships().unwrap(), DEFAULT_SHIPS.to_vec());
    assert_eq!(db.list_ports().unwrap(), DEFAULT_PORTS.to_vec());

    let rules = db.timing_rules().unwrap();
    assert_eq!(rules.transition("Vladivostok", "Vladivostok").unwrap(), 0);
    assert_eq!(rules.transition("Nevelsk", "Slavyanka").unwrap(), 2);
    assert_eq!(rules.stay("Slavyanka"), 1);
}

#[test]
fn test_reopening_does_not_reseed() {
    let temp_file = NamedTempFile::new().unwrap();
    {
        let mut db = Database::new(temp_file.path()).unwrap();
        db.set_stay("Nevelsk", 4).unwrap();
        db.add_ship("Igor Farkhutdinov").unwrap();
    }

    let db = Database::new(temp_file.path()).unwrap();
    assert_eq!(db.timing_rules().unwrap().stay("Nevelsk"), 4);
    assert_eq!(db.list_ships().unwrap().len(), DEFAULT_SHIPS.len() + 1);
}

#[test]
fn test_create_and_get_plan() {
    let (_temp_file, mut db) = create_test_db();

    let plan = db
        .create_plan("Anatoly Ivanov", &route(), date(2026, 1, 1), 7)
        .expect("Failed to create plan");

    assert!(plan.id > 0);
    assert_eq!(plan.end_date, date(2026, 1, 8));
    assert_eq!(plan.stops.len(), 3);

    let retrieved = db
        .get_plan(plan.id)
        .expect("Failed to get plan")
        .expect("Plan should exist");
    assert_eq!(retrieved.ship, "Anatoly Ivanov");
    assert_eq!(retrieved.route, route());
    assert_eq!(retrieved.stops, plan.stops);
    assert!(retrieved.frozen_periods.is_empty());
}

#[test]
fn test_create_plan_rejects_unknown_ship_and_port() {
    let (_temp_file, mut db) = create_test_db();

    let err = db
        .create_plan("Flying Dutchman", &route(), date(2026, 1, 1), 7)
        .unwrap_err();
    assert!(err.is_validation());

    let atlantis = vec!["Vladivostok".to_string(), "Atlantis".to_string()];
    let err = db
        .create_plan("Anatoly Ivanov", &atlantis, date(2026, 1, 1), 7)
        .unwrap_err();
    assert!(err.is_validation());

    assert!(db.list_plans().unwrap().is_empty());
}

#[test]
fn test_get_missing_plan() {
    let (_temp_file, db) = create_test_db();
    assert!(db.get_plan(42).unwrap().is_none());
}

#[test]
fn test_list_plans_summaries() {
    let (_temp_file, mut db) = create_test_db();

    let first = db
        .create_plan("Anatoly Ivanov", &route(), date(2026, 1, 1), 7)
        .unwrap();
    db.create_plan("Russky Vostok", &route(), date(2026, 2, 1), 30)
        .unwrap();

    let (_, ()) = db
        .update_plan(first.id, |plan, _rules| {
            plan.stops[1].skip();
            plan.frozen_periods.insert(0);
            Ok(())
        })
        .unwrap();

    let summaries = db.list_plans().unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].id, first.id);
    assert_eq!(summaries[0].total_stops, 3);
    assert_eq!(summaries[0].skipped_stops, 1);
    assert_eq!(summaries[0].frozen_periods, 1);
    assert_eq!(summaries[1].ship, "Russky Vostok");
    assert_eq!(summaries[1].skipped_stops, 0);
}

#[test]
fn test_update_plan_rolls_back_on_error() {
    let (_temp_file, mut db) = create_test_db();
    let plan = db
        .create_plan("Anatoly Ivanov", &route(), date(2026, 1, 1), 7)
        .unwrap();

    let result: Result<(_, ()), _> = db.update_plan(plan.id, |plan, _rules| {
        plan.stops.clear();
        Err(PlannerError::invalid_input("stops").with_reason("rejected"))
    });
    assert!(result.is_err());

    let stored = db.get_plan(plan.id).unwrap().unwrap();
    assert_eq!(stored.stops, plan.stops);
}

#[test]
fn test_update_missing_plan() {
    let (_temp_file, mut db) = create_test_db();
    let result = db.update_plan(7, |_plan, _rules| Ok(()));
    assert!(matches!(result, Err(PlannerError::PlanNotFound { id: 7 })));
}

#[test]
fn test_save_plan_replaces_stops() {
    let (_temp_file, mut db) = create_test_db();
    let mut plan = db
        .create_plan("Anatoly Ivanov", &route(), date(2026, 1, 1), 7)
        .unwrap();

    plan.stops.truncate(2);
    plan.stops[1] = Stop::undated("Slavyanka");
    plan.frozen_periods.insert(0);
    db.save_plan(&plan).unwrap();

    let stored = db.get_plan(plan.id).unwrap().unwrap();
    assert_eq!(stored.stops.len(), 2);
    assert_eq!(stored.stops[1], Stop::undated("Slavyanka"));
    assert!(stored.frozen_periods.contains(&0));
}

#[test]
fn test_delete_plan() {
    let (_temp_file, mut db) = create_test_db();
    let plan = db
        .create_plan("Anatoly Ivanov", &route(), date(2026, 1, 1), 7)
        .unwrap();

    db.delete_plan(plan.id).unwrap();
    assert!(db.get_plan(plan.id).unwrap().is_none());

    let err = db.delete_plan(plan.id).unwrap_err();
    assert!(matches!(err, PlannerError::PlanNotFound { .. }));
}

#[test]
fn test_add_port_fills_rule_tables() {
    let (_temp_file, mut db) = create_test_db();

    assert_eq!(db.add_port("  Kholmsk ").unwrap(), "Kholmsk");
    let rules = db.timing_rules().unwrap();

    assert_eq!(db.list_ports().unwrap().last().map(String::as_str), Some("Kholmsk"));
    assert_eq!(rules.transition("Kholmsk", "Kholmsk").unwrap(), 0);
    assert_eq!(rules.transition("Kholmsk", "Vladivostok").unwrap(), 2);
    assert_eq!(rules.transition("Slavyanka", "Kholmsk").unwrap(), 2);
    assert_eq!(rules.stay("Kholmsk"), 1);

    assert!(db.add_port("Kholmsk").unwrap_err().is_validation());
}

#[test]
fn test_add_ship_validation() {
    let (_temp_file, mut db) = create_test_db();

    db.add_ship("Igor Farkhutdinov").unwrap();
    assert!(db.ship_exists("Igor Farkhutdinov").unwrap());
    assert!(db.add_ship("Igor Farkhutdinov").unwrap_err().is_validation());
    assert!(db.add_ship("   ").unwrap_err().is_validation());
}

#[test]
fn test_rule_updates_are_atomic() {
    let (_temp_file, mut db) = create_test_db();

    let rules = db.set_transition("Vladivostok", "Slavyanka", 1).unwrap();
    assert_eq!(rules.transition("Vladivostok", "Slavyanka").unwrap(), 1);

    assert!(db.set_transition("Vladivostok", "Atlantis", 3).is_err());
    assert!(db.set_transition("Vladivostok", "Slavyanka", -3).is_err());
    assert!(db.set_stay("Atlantis", 2).is_err());
    assert!(db.set_stay("Slavyanka", -1).is_err());

    let rules = db.timing_rules().unwrap();
    assert_eq!(rules.transition("Vladivostok", "Slavyanka").unwrap(), 1);
    assert_eq!(rules.stay("Slavyanka"), 1);
    assert!(!rules.contains_port("Atlantis"));
}

#[test]
fn test_concurrent_first_open_seeds_once() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("shared.db");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let path = db_path.clone();
            std::thread::spawn(move || Database::new(path).map(|_| ()))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap().expect("Concurrent open failed");
    }

    let db = Database::new(&db_path).unwrap();
    assert_eq!(db.list_ships().unwrap(), DEFAULT_SHIPS.to_vec());
    assert_eq!(db.list_ports().unwrap(), DEFAULT_PORTS.to_vec());
}
