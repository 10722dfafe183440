//! SQLite database management

mod connection;
mod sessions;
mod settings;
mod users;

pub use connection::Database;
pub use sessions::*;
pub use settings::*;
pub use users::*;
