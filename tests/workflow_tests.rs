// Workflow sequencing against a scripted gateway double
use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;

use spacetraders_console::{
    ApiError, ApiResponse, DeliveryWorkflow, Gateway, MiningWorkflow,
};

/// Records every call the workflow makes and answers from a scripted queue.
/// Once the queue runs dry it answers with an empty 200 envelope.
struct RecordingGateway {
    calls: Mutex<Vec<(String, String, Option<Value>)>>,
    responses: Mutex<VecDeque<Result<ApiResponse, ApiError>>>,
}

impl RecordingGateway {
    fn new(responses: Vec<Result<ApiResponse, ApiError>>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(responses.into()),
        }
    }

    fn calls(&self) -> Vec<(String, String, Option<Value>)> {
        self.calls.lock().unwrap().clone()
    }

    fn paths(&self) -> Vec<String> {
        self.calls().into_iter().map(|(_, path, _)| path).collect()
    }
}

fn ok(payload: Value) -> Result<ApiResponse, ApiError> {
    Ok(ApiResponse { status: 200, payload })
}

#[async_trait]
impl Gateway for RecordingGateway {
    async fn call(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<ApiResponse, ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), path.to_string(), body.cloned()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| ok(json!({"data": {}})))
    }
}

#[tokio::test]
async fn mining_stops_after_the_query_when_no_asteroid_exists() {
    let gateway = RecordingGateway::new(vec![ok(json!({"data": []}))]);
    let workflow = MiningWorkflow::new(&gateway, "X1-XD16", "ENGINEERED_ASTEROID");

    let outcome = workflow.run("DRIFTER-1").await.unwrap();

    assert!(outcome.is_none());
    assert_eq!(
        gateway.paths(),
        vec!["/systems/X1-XD16/waypoints?type=ENGINEERED_ASTEROID"]
    );
}

#[tokio::test]
async fn mining_runs_the_seven_steps_in_order() {
    let extract_payload = json!({"data": {"extraction": {"yield": {"symbol": "IRON_ORE", "units": 7}}}});
    let cargo_payload = json!({"data": {"units": 7, "capacity": 40}});
    let gateway = RecordingGateway::new(vec![
        ok(json!({"data": [{"symbol": "X1-XD16-AB"}]})),
        ok(json!({"data": {}})), // orbit
        ok(json!({"data": {}})), // navigate
        ok(json!({"data": {}})), // dock
        ok(json!({"data": {}})), // refuel
        ok(json!({"data": {}})), // orbit again
        ok(extract_payload.clone()),
        ok(cargo_payload.clone()),
    ]);
    let workflow = MiningWorkflow::new(&gateway, "X1-XD16", "ENGINEERED_ASTEROID");

    let report = workflow.run("DRIFTER-1").await.unwrap().unwrap();

    assert_eq!(report.asteroid, "X1-XD16-AB");
    assert_eq!(report.extracted, extract_payload);
    assert_eq!(report.cargo, cargo_payload);

    let calls = gateway.calls();
    assert_eq!(calls.len(), 8);
    assert_eq!(
        gateway.paths(),
        vec![
            "/systems/X1-XD16/waypoints?type=ENGINEERED_ASTEROID",
            "/my/ships/DRIFTER-1/orbit",
            "/my/ships/DRIFTER-1/navigate",
            "/my/ships/DRIFTER-1/dock",
            "/my/ships/DRIFTER-1/refuel",
            "/my/ships/DRIFTER-1/orbit",
            "/my/ships/DRIFTER-1/extract",
            "/my/ships/DRIFTER-1/cargo",
        ]
    );
    // Navigation targets the discovered asteroid
    assert_eq!(
        calls[2].2,
        Some(json!({"waypointSymbol": "X1-XD16-AB"}))
    );
    // The cargo read is the only other GET in the sequence
    assert_eq!(calls[0].0, "GET");
    assert_eq!(calls[7].0, "GET");
}

#[tokio::test]
async fn mining_aborts_on_the_first_failed_step() {
    let gateway = RecordingGateway::new(vec![
        ok(json!({"data": [{"symbol": "X1-XD16-AB"}]})),
        ok(json!({"data": {}})), // orbit
        Err(ApiError::Transport("connection reset".to_string())),
    ]);
    let workflow = MiningWorkflow::new(&gateway, "X1-XD16", "ENGINEERED_ASTEROID");

    let error = workflow.run("DRIFTER-1").await.unwrap_err();

    assert_eq!(error.step, "navigate");
    assert!(error.to_string().contains("navigate"));
    // Nothing past the failed navigate was issued
    assert_eq!(gateway.calls().len(), 3);
}

#[tokio::test]
async fn mining_fails_fast_without_a_credential() {
    let gateway = RecordingGateway::new(vec![Err(ApiError::NoCredential)]);
    let workflow = MiningWorkflow::new(&gateway, "X1-XD16", "ENGINEERED_ASTEROID");

    let error = workflow.run("DRIFTER-1").await.unwrap_err();

    assert_eq!(error.step, "find-asteroid");
    assert!(matches!(error.source, ApiError::NoCredential));
    assert_eq!(gateway.calls().len(), 1);
}

#[tokio::test]
async fn delivery_runs_navigate_deliver_fulfill_in_order() {
    let gateway = RecordingGateway::new(vec![]);
    let workflow = DeliveryWorkflow::new(&gateway);

    let report = workflow
        .run("SHIP-1", "C-1", "W-1", "IRON_ORE", 10)
        .await
        .unwrap();

    assert!(report.message.contains("C-1"));
    assert_eq!(report.contract_id, "C-1");

    let calls = gateway.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(
        gateway.paths(),
        vec![
            "/my/ships/SHIP-1/navigate",
            "/my/contracts/C-1/deliver",
            "/my/contracts/C-1/fulfill",
        ]
    );
    assert_eq!(calls[0].2, Some(json!({"waypointSymbol": "W-1"})));
    assert_eq!(
        calls[1].2,
        Some(json!({"shipSymbol": "SHIP-1", "tradeSymbol": "IRON_ORE", "units": 10}))
    );
    assert_eq!(calls[2].2, None);
}

#[tokio::test]
async fn delivery_aborts_when_the_deliver_step_fails() {
    let gateway = RecordingGateway::new(vec![
        ok(json!({"data": {}})), // navigate
        Err(ApiError::Transport("timed out".to_string())),
    ]);
    let workflow = DeliveryWorkflow::new(&gateway);

    let error = workflow
        .run("SHIP-1", "C-1", "W-1", "IRON_ORE", 10)
        .await
        .unwrap_err();

    assert_eq!(error.step, "deliver");
    // Fulfill never fires after a failed delivery
    assert_eq!(gateway.calls().len(), 2);
}
