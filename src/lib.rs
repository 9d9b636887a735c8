// SpaceTraders console client library
// Thin gateway over the SpaceTraders v2 REST API plus the two scripted
// multi-step flows (mining cycle, contract delivery) built on top of it.

pub mod client;
pub mod config;
pub mod error;
pub mod operations;
pub mod storage;
pub mod verbosity;

// Re-export the surface collaborators actually use
pub use client::{ApiClient, ApiResponse, Gateway};
pub use config::ConsoleConfig;
pub use error::{ApiError, WorkflowError};
pub use operations::{
    contracts::{DeliveryReport, DeliveryWorkflow},
    mining::{MiningReport, MiningWorkflow},
};
pub use storage::TokenStore;

// Constants
pub const API_BASE_URL: &str = "https://api.spacetraders.io/v2";
pub const TOKEN_FILE: &str = "AGENT_TOKEN";
