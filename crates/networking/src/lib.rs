//! Check-in Networking - HTTP client and API wrappers for the check-in server

pub mod api;
pub mod http;

pub use http::CheckinClient;
