// Client module - generic SpaceTraders API gateway
pub mod api;

pub use api::{ApiClient, ApiResponse, Gateway};
