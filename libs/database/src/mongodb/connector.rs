use mongodb::{Client, bson::doc, options::ClientOptions};
use std::time::Duration;
use tracing::info;

use super::MongoConfig;
use crate::common::{DatabaseError, DatabaseResult};

/// Connect using a MongoConfig and verify the server answers a `ping`.
///
/// There is no retry: a failure here is meant to abort startup.
///
/// # Example
/// ```ignore
/// use database::mongodb::{MongoConfig, connect_from_config};
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "clothstore");
/// let client = connect_from_config(&config).await?;
/// ```
pub async fn connect_from_config(config: &MongoConfig) -> DatabaseResult<Client> {
    let mut options = ClientOptions::parse(&config.url).await?;
    info!(hosts = %host_list(&options), "Attempting to connect to MongoDB");

    if let Some(secs) = config.connect_timeout_secs {
        options.connect_timeout = Some(Duration::from_secs(secs));
    }
    if let Some(secs) = config.server_selection_timeout_secs {
        options.server_selection_timeout = Some(Duration::from_secs(secs));
    }
    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    let client = Client::with_options(options)?;

    client
        .database(&config.database)
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!(database = %config.database, "Successfully connected to MongoDB");
    Ok(client)
}

/// Comma-separated `host:port` list; credentials and options stay out of logs
fn host_list(options: &ClientOptions) -> String {
    options
        .hosts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
