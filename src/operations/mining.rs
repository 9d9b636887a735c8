// Mining workflow - one full extraction cycle for a single ship
use serde_json::Value;

use crate::client::Gateway;
use crate::error::WorkflowError;
use crate::v_info;

/// Outcome of a completed mining cycle.
#[derive(Debug)]
pub struct MiningReport {
    /// Asteroid waypoint the ship was sent to.
    pub asteroid: String,
    /// Raw extraction payload from the API.
    pub extracted: Value,
    /// Cargo snapshot taken after the extraction.
    pub cargo: Value,
}

/// Drives a fixed sequence: find an asteroid in the home system, fly the ship
/// there, top up fuel, extract once, and read back the cargo hold. Every step
/// is awaited before the next begins, and the first gateway error aborts the
/// whole sequence with the failing step's name.
pub struct MiningWorkflow<'a> {
    gateway: &'a dyn Gateway,
    system_symbol: String,
    asteroid_type: String,
}

impl<'a> MiningWorkflow<'a> {
    pub fn new(gateway: &'a dyn Gateway, system_symbol: &str, asteroid_type: &str) -> Self {
        Self {
            gateway,
            system_symbol: system_symbol.to_string(),
            asteroid_type: asteroid_type.to_string(),
        }
    }

    /// Run one mining cycle. Returns `Ok(None)` when the system has no
    /// asteroid of the configured type - that is a normal outcome, not an
    /// error, and no ship orders are issued in that case.
    pub async fn run(&self, ship_symbol: &str) -> Result<Option<MiningReport>, WorkflowError> {
        v_info!("🚀 Starting mining cycle for {}...", ship_symbol);

        let found = self
            .gateway
            .get_system_waypoints(&self.system_symbol, Some(&self.asteroid_type))
            .await
            .map_err(WorkflowError::at("find-asteroid"))?;

        let asteroid = match found.payload["data"][0]["symbol"].as_str() {
            Some(symbol) => symbol.to_string(),
            None => {
                v_info!(
                    "🪨 No {} waypoint found in {}",
                    self.asteroid_type,
                    self.system_symbol
                );
                return Ok(None);
            }
        };
        v_info!("🪨 Found asteroid: {}", asteroid);

        self.gateway
            .orbit_ship(ship_symbol)
            .await
            .map_err(WorkflowError::at("orbit"))?;
        self.gateway
            .navigate_ship(ship_symbol, &asteroid)
            .await
            .map_err(WorkflowError::at("navigate"))?;
        self.gateway
            .dock_ship(ship_symbol)
            .await
            .map_err(WorkflowError::at("dock"))?;
        self.gateway
            .refuel_ship(ship_symbol)
            .await
            .map_err(WorkflowError::at("refuel"))?;
        self.gateway
            .orbit_ship(ship_symbol)
            .await
            .map_err(WorkflowError::at("orbit-for-extraction"))?;
        let extracted = self
            .gateway
            .extract_resources(ship_symbol)
            .await
            .map_err(WorkflowError::at("extract"))?;
        let cargo = self
            .gateway
            .get_cargo(ship_symbol)
            .await
            .map_err(WorkflowError::at("cargo"))?;

        v_info!("✅ Mining cycle complete for {}", ship_symbol);
        Ok(Some(MiningReport {
            asteroid,
            extracted: extracted.payload,
            cargo: cargo.payload,
        }))
    }
}
