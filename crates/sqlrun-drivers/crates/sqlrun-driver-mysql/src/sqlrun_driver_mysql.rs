//! MySQL driver implementation

mod connection;
mod driver;

pub use connection::MySqlSession;
pub use driver::MySqlDriver;
