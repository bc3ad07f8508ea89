//! PostgreSQL driver implementation

mod connection;
mod driver;

pub use connection::PostgresSession;
pub use driver::PostgresDriver;
