//! Transition and stay durations used to lay out a timetable.
//!
//! [`TimingRules`] is an explicit configuration value: the store loads it,
//! the generator and the reconciliation engine receive it as an argument, and
//! the configuration setters validate input before touching the tables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Stay length used for ports without an explicit stay rule.
pub const DEFAULT_STAY_DAYS: u32 = 1;

/// Transition length seeded between two different ports.
pub const DEFAULT_TRANSITION_DAYS: u32 = 2;

/// Port registry plus per-pair transition days and per-port stay days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingRules {
    /// Registered ports in registry order
    pub ports: Vec<String>,
    /// Days at sea from one port (outer key) to another (inner key)
    pub transitions: BTreeMap<String, BTreeMap<String, u32>>,
    /// Days spent alongside per port
    pub stays: BTreeMap<String, u32>,
}

impl TimingRules {
    /// Creates an empty rule set over the given port registry.
    pub fn new(ports: Vec<String>) -> Self {
        Self {
            ports,
            transitions: BTreeMap::new(),
            stays: BTreeMap::new(),
        }
    }

    /// Builds the rule set a fresh store is seeded with: zero days from a
    /// port to itself, [`DEFAULT_TRANSITION_DAYS`] between different ports,
    /// and [`DEFAULT_STAY_DAYS`] alongside everywhere.
    pub fn with_defaults(ports: Vec<String>) -> Self {
        let mut rules = Self::new(ports);
        for from in &rules.ports {
            let row = rules
                .ports
                .iter()
                .map(|to| {
                    let days = if from == to { 0 } else { DEFAULT_TRANSITION_DAYS };
                    (to.clone(), days)
                })
                .collect();
            rules.transitions.insert(from.clone(), row);
            rules.stays.insert(from.clone(), DEFAULT_STAY_DAYS);
        }
        rules
    }

    /// Whether `port` is in the registry.
    pub fn contains_port(&self, port: &str) -> bool {
        self.ports.iter().any(|p| p == port)
    }

    /// Days at sea from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` when no rule exists for the pair.
    pub fn transition(&self, from: &str, to: &str) -> Result<u32> {
        self.transitions
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .ok_or_else(|| {
                PlannerError::invalid_input("transition")
                    .with_reason(format!("No transition rule from '{from}' to '{to}'"))
            })
    }

    /// Days alongside at `port`, [`DEFAULT_STAY_DAYS`] when unset.
    pub fn stay(&self, port: &str) -> u32 {
        self.stays.get(port).copied().unwrap_or(DEFAULT_STAY_DAYS)
    }

    /// Sets the transition days for one ordered port pair.
    ///
    /// Nothing is written unless both ports are registered and `days` is
    /// non-negative.
    pub fn set_transition(&mut self, from: &str, to: &str, days: i64) -> Result<()> {
        let days = Self::validate_days("transition_days", days)?;
        for port in [from, to] {
            self.ensure_port(port)?;
        }
        self.transitions
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string(), days);
        Ok(())
    }

    /// Sets the stay days for one port.
    pub fn set_stay(&mut self, port: &str, days: i64) -> Result<()> {
        let days = Self::validate_days("stay_days", days)?;
        self.ensure_port(port)?;
        self.stays.insert(port.to_string(), days);
        Ok(())
    }

    /// Registers a new port with default rules to and from every existing
    /// port.
    pub fn add_port(&mut self, port: &str) -> Result<()> {
        let port = registry_name("port", port)?;
        if self.contains_port(port) {
            return Err(PlannerError::invalid_input("port")
                .with_reason(format!("Port '{port}' is already registered")));
        }

        for existing in &self.ports {
            self.transitions
                .entry(existing.clone())
                .or_default()
                .insert(port.to_string(), DEFAULT_TRANSITION_DAYS);
        }
        let mut row: BTreeMap<String, u32> = self
            .ports
            .iter()
            .map(|existing| (existing.clone(), DEFAULT_TRANSITION_DAYS))
            .collect();
        row.insert(port.to_string(), 0);
        self.transitions.insert(port.to_string(), row);
        self.stays.insert(port.to_string(), DEFAULT_STAY_DAYS);
        self.ports.push(port.to_string());
        Ok(())
    }

    /// Checks that every port of `route` is registered.
    pub fn ensure_route(&self, route: &[String]) -> Result<()> {
        route.iter().try_for_each(|port| self.ensure_port(port))
    }

    fn ensure_port(&self, port: &str) -> Result<()> {
        if self.contains_port(port) {
            Ok(())
        } else {
            Err(PlannerError::invalid_input("port").with_reason(format!("Unknown port: {port}")))
        }
    }

    fn validate_days(field: &str, days: i64) -> Result<u32> {
        u32::try_from(days).map_err(|_| {
            PlannerError::invalid_input(field)
                .with_reason(format!("Days must be a non-negative number, got {days}"))
        })
    }
}

/// Trims a ship or port name and rejects names that cannot be shown in a
/// markdown table cell.
pub(crate) fn registry_name<'a>(field: &str, name: &'a str) -> Result<&'a str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PlannerError::invalid_input(field).with_reason("Name is empty"));
    }
    if name.chars().any(|c| c == '|' || c.is_control()) {
        return Err(PlannerError::invalid_input(field).with_reason(format!(
            "Name '{}' contains '|' or a control character",
            name.escape_debug()
        )));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ports() -> Vec<String> {
        vec!["Vladivostok".to_string(), "Korsakov".to_string()]
    }

    #[test]
    fn test_defaults_cover_every_pair() {
        let rules = TimingRules::with_defaults(ports());
        assert_eq!(rules.transition("Vladivostok", "Vladivostok").unwrap(), 0);
        assert_eq!(rules.transition("Vladivostok", "Korsakov").unwrap(), 2);
        assert_eq!(rules.transition("Korsakov", "Vladivostok").unwrap(), 2);
        assert_eq!(rules.stay("Korsakov"), 1);
    }

    #[test]
    fn test_stay_defaults_to_one_day() {
        let rules = TimingRules::new(ports());
        assert_eq!(rules.stay("Vladivostok"), DEFAULT_STAY_DAYS);
    }

    #[test]
    fn test_missing_transition_is_rejected() {
        let rules = TimingRules::new(ports());
        let err = rules.transition("Vladivostok", "Korsakov").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_set_transition_and_stay() {
        let mut rules = TimingRules::with_defaults(ports());
        rules.set_transition("Vladivostok", "Korsakov", 4).unwrap();
        rules.set_stay("Korsakov", 3).unwrap();
        assert_eq!(rules.transition("Vladivostok", "Korsakov").unwrap(), 4);
        assert_eq!(rules.transition("Korsakov", "Vladivostok").unwrap(), 2);
        assert_eq!(rules.stay("Korsakov"), 3);
    }

    #[test]
    fn test_invalid_settings_leave_rules_untouched() {
        let mut rules = TimingRules::with_defaults(ports());
        let before = rules.clone();

        assert!(rules.set_transition("Vladivostok", "Korsakov", -1).is_err());
        assert!(rules.set_transition("Vladivostok", "Nevelsk", 3).is_err());
        assert!(rules.set_transition("Nevelsk", "Korsakov", 3).is_err());
        assert!(rules.set_stay("Korsakov", -2).is_err());
        assert!(rules.set_stay("Nevelsk", 2).is_err());

        assert_eq!(rules, before);
    }

    #[test]
    fn test_add_port_fills_rules() {
        let mut rules = TimingRules::with_defaults(ports());
        rules.add_port("Nevelsk").unwrap();

        assert!(rules.contains_port("Nevelsk"));
        assert_eq!(rules.transition("Nevelsk", "Nevelsk").unwrap(), 0);
        assert_eq!(rules.transition("Nevelsk", "Korsakov").unwrap(), 2);
        assert_eq!(rules.transition("Vladivostok", "Nevelsk").unwrap(), 2);
        assert_eq!(rules.stay("Nevelsk"), 1);

        assert!(rules.add_port("Nevelsk").is_err());
        assert!(rules.add_port("  ").is_err());
    }

    #[test]
    fn test_add_port_rejects_table_breaking_names() {
        let mut rules = TimingRules::with_defaults(ports());
        let before = rules.clone();

        let err = rules.add_port("Kholmsk | Uglegorsk").unwrap_err();
        assert!(err.is_validation());
        assert!(rules.add_port("Kholmsk\nUglegorsk").is_err());
        assert_eq!(rules, before);

        assert_eq!(registry_name("ship", "  Kholmsk ").unwrap(), "Kholmsk");
    }

    #[test]
    fn test_ensure_route() {
        let rules = TimingRules::with_defaults(ports());
        assert!(rules.ensure_route(&ports()).is_ok());
        let route = vec!["Vladivostok".to_string(), "Atlantis".to_string()];
        assert!(rules.ensure_route(&route).is_err());
    }
}
