//! Data models for check-in entities

mod checkin;
mod user;

pub use checkin::*;
pub use user::*;
