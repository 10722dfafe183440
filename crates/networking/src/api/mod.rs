//! High-level API wrappers for the check-in endpoints
//!
//! Adds the decision logic a front end or script needs on top of the raw
//! HTTP client.

mod checkin;

pub use checkin::*;
