//! MongoDB connector and health probe

mod config;
mod connector;
mod health;

pub use config::{DEFAULT_DATABASE, DEFAULT_URL, MongoConfig};
pub use connector::connect_from_config;
pub use health::check_health;

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
