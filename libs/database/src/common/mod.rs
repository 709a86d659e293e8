//! Common types shared across database connectors

pub mod error;

pub use error::{DatabaseError, DatabaseResult};
