//! Common utilities shared across all database implementations

pub mod error;

pub use error::{DatabaseError, DatabaseResult};
