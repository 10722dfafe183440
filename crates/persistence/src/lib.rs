//! Check-in Persistence - SQLite storage and the page cache

pub mod cache;
pub mod sqlite;

pub use cache::PageCache;
pub use sqlite::Database;
