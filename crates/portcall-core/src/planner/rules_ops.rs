//! Registry and timing rule operations for the Planner.

use log::info;

use super::Planner;
use crate::{
    error::Result,
    params::{Register, SetStay, SetTransition},
    timing::TimingRules,
};

impl Planner {
    /// Loads the current timing rules.
    pub async fn timing_rules(&self) -> Result<TimingRules> {
        self.with_database(|db| db.timing_rules()).await
    }

    /// Sets the days at sea for one ordered port pair.
    ///
    /// Unknown ports and negative days are rejected without writing
    /// anything. Existing plans are not re-dated until they are reconciled.
    pub async fn set_transition(&self, params: &SetTransition) -> Result<TimingRules> {
        let from = params.from.trim().to_string();
        let to = params.to.trim().to_string();
        let days = params.days;

        let rules = self
            .with_database(move |db| db.set_transition(&from, &to, days))
            .await?;
        info!(
            "Set transition {} -> {} to {} days",
            params.from, params.to, params.days
        );
        Ok(rules)
    }

    /// Sets the days alongside for one port.
    pub async fn set_stay(&self, params: &SetStay) -> Result<TimingRules> {
        let port = params.port.trim().to_string();
        let days = params.days;

        let rules = self
            .with_database(move |db| db.set_stay(&port, days))
            .await?;
        info!("Set stay at {} to {} days", params.port, params.days);
        Ok(rules)
    }

    /// Lists registered ships.
    pub async fn list_ships(&self) -> Result<Vec<String>> {
        self.with_database(|db| db.list_ships()).await
    }

    /// Lists registered ports.
    pub async fn list_ports(&self) -> Result<Vec<String>> {
        self.with_database(|db| db.list_ports()).await
    }

    /// Registers a ship.
    pub async fn add_ship(&self, params: &Register) -> Result<String> {
        let name = params.name.clone();
        let ship = self.with_database(move |db| db.add_ship(&name)).await?;
        info!("Registered ship {ship}");
        Ok(ship)
    }

    /// Registers a port with default timing rules to and from every other
    /// port.
    pub async fn add_port(&self, params: &Register) -> Result<String> {
        let name = params.name.clone();
        let port = self.with_database(move |db| db.add_port(&name)).await?;
        info!("Registered port {port}");
        Ok(port)
    }
}
