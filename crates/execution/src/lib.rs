// crates/execution/src/lib.rs

pub mod config;
pub mod engine_api;
pub mod error;
pub mod transport;

pub use config::ExecutionConfig;
pub use engine_api::{EngineApi, client::EngineApiClient};
pub use error::ExecutionError;
