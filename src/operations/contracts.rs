// Contract delivery workflow - haul goods to a waypoint and close the contract
use crate::client::Gateway;
use crate::error::WorkflowError;
use crate::v_info;

/// Outcome of a completed delivery run.
#[derive(Debug)]
pub struct DeliveryReport {
    pub contract_id: String,
    pub message: String,
}

/// Three steps, strictly in order: navigate to the delivery waypoint, deliver
/// the goods against the contract, fulfill the contract. Aborts on the first
/// gateway error with the failing step's name.
pub struct DeliveryWorkflow<'a> {
    gateway: &'a dyn Gateway,
}

impl<'a> DeliveryWorkflow<'a> {
    pub fn new(gateway: &'a dyn Gateway) -> Self {
        Self { gateway }
    }

    pub async fn run(
        &self,
        ship_symbol: &str,
        contract_id: &str,
        delivery_waypoint: &str,
        trade_symbol: &str,
        units: i32,
    ) -> Result<DeliveryReport, WorkflowError> {
        v_info!("📦 Starting delivery for contract {}...", contract_id);

        self.gateway
            .navigate_ship(ship_symbol, delivery_waypoint)
            .await
            .map_err(WorkflowError::at("navigate"))?;
        self.gateway
            .deliver_contract(contract_id, ship_symbol, trade_symbol, units)
            .await
            .map_err(WorkflowError::at("deliver"))?;
        self.gateway
            .fulfill_contract(contract_id)
            .await
            .map_err(WorkflowError::at("fulfill"))?;

        let message = format!(
            "Delivered {} x{} and fulfilled contract {}",
            trade_symbol, units, contract_id
        );
        v_info!("✅ {}", message);
        Ok(DeliveryReport {
            contract_id: contract_id.to_string(),
            message,
        })
    }
}
