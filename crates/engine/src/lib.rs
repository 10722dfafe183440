//! Check-in Engine - Check-in rules and their orchestration over the stores

pub mod adapters;
pub mod clock;
pub mod ports;
pub mod service;
pub mod streak;

pub use clock::{Clock, ManualClock, SystemClock};
pub use ports::{CacheInvalidator, SessionProvider, SettingsStore, UserRecordStore};
pub use service::{CheckinService, HOME_ROUTE};
