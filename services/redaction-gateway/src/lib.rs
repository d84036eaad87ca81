pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod server;

pub use api::{create_router, GatewayState};
pub use config::{GatewayConfig, ParseFailurePolicy};
pub use error::GatewayError;
pub use server::GatewayServer;
