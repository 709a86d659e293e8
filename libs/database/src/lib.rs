//! Database connectors for the services in this workspace.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB document store support
//! - `config` - Configuration support with `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{self, MongoConfig};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "clothstore");
//! let client = mongodb::connect_from_config(&config).await?;
//! let products = client.database(config.database()).collection::<Document>("products");
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
