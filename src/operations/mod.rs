// Operations module - scripted multi-step flows built on the gateway
pub mod contracts;
pub mod mining;

pub use contracts::{DeliveryReport, DeliveryWorkflow};
pub use mining::{MiningReport, MiningWorkflow};
