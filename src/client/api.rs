use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use std::fs::OpenOptions;
use std::io::Write;

use crate::error::ApiError;
use crate::{v_debug, API_BASE_URL};

/// What every gateway call hands back when a response arrives at all: the HTTP
/// status and the decoded body. Non-2xx statuses are deliberately not errors at
/// this layer - the remote service reports game-level failures inside its own
/// JSON envelope, and interpreting that is the caller's job.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub payload: Value,
}

impl ApiResponse {
    /// True when the remote service answered with a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The single seam every remote exchange goes through. Only `call` is
/// required; the endpoint wrappers are provided on top of it, so a test
/// double only has to script one method.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Perform one exchange against the API. `path` is appended verbatim to
    /// the base origin (callers percent-encode their own segments); `body` is
    /// serialized only when present - GET calls never carry one.
    async fn call(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<ApiResponse, ApiError>;

    // Agent operations
    async fn get_agent(&self) -> Result<ApiResponse, ApiError> {
        self.call("/my/agent", Method::GET, None).await
    }

    // Ship operations
    async fn get_ships(&self) -> Result<ApiResponse, ApiError> {
        self.call("/my/ships", Method::GET, None).await
    }

    async fn get_cargo(&self, ship_symbol: &str) -> Result<ApiResponse, ApiError> {
        self.call(&format!("/my/ships/{}/cargo", ship_symbol), Method::GET, None)
            .await
    }

    async fn orbit_ship(&self, ship_symbol: &str) -> Result<ApiResponse, ApiError> {
        self.call(&format!("/my/ships/{}/orbit", ship_symbol), Method::POST, None)
            .await
    }

    async fn dock_ship(&self, ship_symbol: &str) -> Result<ApiResponse, ApiError> {
        self.call(&format!("/my/ships/{}/dock", ship_symbol), Method::POST, None)
            .await
    }

    async fn refuel_ship(&self, ship_symbol: &str) -> Result<ApiResponse, ApiError> {
        self.call(&format!("/my/ships/{}/refuel", ship_symbol), Method::POST, None)
            .await
    }

    async fn navigate_ship(
        &self,
        ship_symbol: &str,
        waypoint_symbol: &str,
    ) -> Result<ApiResponse, ApiError> {
        let payload = serde_json::json!({ "waypointSymbol": waypoint_symbol });
        self.call(
            &format!("/my/ships/{}/navigate", ship_symbol),
            Method::POST,
            Some(&payload),
        )
        .await
    }

    async fn extract_resources(&self, ship_symbol: &str) -> Result<ApiResponse, ApiError> {
        self.call(&format!("/my/ships/{}/extract", ship_symbol), Method::POST, None)
            .await
    }

    async fn jettison_cargo(
        &self,
        ship_symbol: &str,
        trade_symbol: &str,
        units: i32,
    ) -> Result<ApiResponse, ApiError> {
        let payload = serde_json::json!({ "symbol": trade_symbol, "units": units });
        self.call(
            &format!("/my/ships/{}/jettison", ship_symbol),
            Method::POST,
            Some(&payload),
        )
        .await
    }

    async fn sell_cargo(
        &self,
        ship_symbol: &str,
        trade_symbol: &str,
        units: i32,
    ) -> Result<ApiResponse, ApiError> {
        let payload = serde_json::json!({ "symbol": trade_symbol, "units": units });
        self.call(
            &format!("/my/ships/{}/sell", ship_symbol),
            Method::POST,
            Some(&payload),
        )
        .await
    }

    async fn purchase_ship(
        &self,
        ship_type: &str,
        waypoint_symbol: &str,
    ) -> Result<ApiResponse, ApiError> {
        let payload = serde_json::json!({
            "shipType": ship_type,
            "waypointSymbol": waypoint_symbol
        });
        self.call("/my/ships", Method::POST, Some(&payload)).await
    }

    // Waypoint operations
    async fn get_system_waypoints(
        &self,
        system_symbol: &str,
        waypoint_type: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        let mut path = format!("/systems/{}/waypoints", system_symbol);
        if let Some(wp_type) = waypoint_type {
            path.push_str(&format!("?type={}", wp_type));
        }
        self.call(&path, Method::GET, None).await
    }

    async fn find_shipyards(&self, system_symbol: &str) -> Result<ApiResponse, ApiError> {
        self.call(
            &format!("/systems/{}/waypoints?traits=SHIPYARD", system_symbol),
            Method::GET,
            None,
        )
        .await
    }

    async fn get_shipyard(
        &self,
        system_symbol: &str,
        waypoint_symbol: &str,
    ) -> Result<ApiResponse, ApiError> {
        self.call(
            &format!("/systems/{}/waypoints/{}/shipyard", system_symbol, waypoint_symbol),
            Method::GET,
            None,
        )
        .await
    }

    async fn get_market(
        &self,
        system_symbol: &str,
        waypoint_symbol: &str,
    ) -> Result<ApiResponse, ApiError> {
        self.call(
            &format!("/systems/{}/waypoints/{}/market", system_symbol, waypoint_symbol),
            Method::GET,
            None,
        )
        .await
    }

    // Contract operations
    async fn get_contracts(&self) -> Result<ApiResponse, ApiError> {
        self.call("/my/contracts", Method::GET, None).await
    }

    async fn negotiate_contract(&self, ship_symbol: &str) -> Result<ApiResponse, ApiError> {
        self.call(
            &format!("/my/ships/{}/negotiate/contract", ship_symbol),
            Method::POST,
            None,
        )
        .await
    }

    async fn accept_contract(&self, contract_id: &str) -> Result<ApiResponse, ApiError> {
        self.call(&format!("/my/contracts/{}/accept", contract_id), Method::POST, None)
            .await
    }

    async fn deliver_contract(
        &self,
        contract_id: &str,
        ship_symbol: &str,
        trade_symbol: &str,
        units: i32,
    ) -> Result<ApiResponse, ApiError> {
        let payload = serde_json::json!({
            "shipSymbol": ship_symbol,
            "tradeSymbol": trade_symbol,
            "units": units
        });
        self.call(
            &format!("/my/contracts/{}/deliver", contract_id),
            Method::POST,
            Some(&payload),
        )
        .await
    }

    async fn fulfill_contract(&self, contract_id: &str) -> Result<ApiResponse, ApiError> {
        self.call(&format!("/my/contracts/{}/fulfill", contract_id), Method::POST, None)
            .await
    }
}

/// HTTP implementation of [`Gateway`]. The session token lives here, in the
/// instance - building two clients gives two independent sessions, and a
/// token can never change underneath an in-flight call made through a shared
/// reference.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    token: Option<String>,
    base_url: String,
    api_logging: bool,
    api_log_path: String,
}

impl ApiClient {
    /// Client with no session token; every call fails fast with
    /// [`ApiError::NoCredential`] until one is set.
    pub fn new() -> Self {
        Self::with_base_url(API_BASE_URL.to_string())
    }

    pub fn with_token(token: String) -> Self {
        let mut client = Self::new();
        client.set_token(token);
        client
    }

    /// Point the client at a different origin. Tests run against a local
    /// mock server this way.
    pub fn with_base_url(base_url: String) -> Self {
        ApiClient {
            client: reqwest::Client::new(),
            token: None,
            base_url,
            api_logging: false,
            api_log_path: "api_debug.log".to_string(),
        }
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_api_logging(&mut self, logging: bool, log_path: &str) {
        self.api_logging = logging;
        self.api_log_path = log_path.to_string();
    }

    fn log_api_call(
        &self,
        method: &str,
        path: &str,
        body: Option<&Value>,
        response_status: u16,
        response_body: &str,
    ) {
        if !self.api_logging {
            return;
        }

        let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let log_entry = format!(
            "\n=== API CALL [{timestamp}] ===\n\
             Method: {method}\n\
             Path: {path}\n\
             Request Body: {request_body}\n\
             Response Status: {response_status}\n\
             Response Body: {response_body}\n\
             ========================================\n",
            request_body = body.map(|b| b.to_string()).unwrap_or_else(|| "None".to_string()),
        );

        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.api_log_path)
        {
            let _ = file.write_all(log_entry.as_bytes());
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Gateway for ApiClient {
    async fn call(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<ApiResponse, ApiError> {
        let token = self.token.as_deref().ok_or(ApiError::NoCredential)?;
        let url = format!("{}{}", self.base_url, path);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", token));
        if let Some(body) = body {
            request = request.json(body);
        }

        // The one place transport failures are caught; anything that arrives
        // as an HTTP response, whatever the status, passes through.
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let response_text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let payload: Value = serde_json::from_str(&response_text)
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        v_debug!("🌐 [{}] {} -> {}", method, path, status);
        self.log_api_call(method.as_str(), path, body, status, &response_text);

        Ok(ApiResponse { status, payload })
    }
}
