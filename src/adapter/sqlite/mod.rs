//! SQLite persistence adapter.

pub mod connection;
pub mod model;
pub mod schema;
pub mod sink;

pub use sink::SqliteSink;
