//! Check-in Server - HTTP surface for the daily check-in service

pub mod config;
pub mod housekeeping;
pub mod routes;
mod state;

pub use config::ServerConfig;
pub use routes::build_router;
pub use state::AppState;
