//! SQLite driver implementation

mod connection;
mod driver;

pub use connection::SqliteSession;
pub use driver::SqliteDriver;
