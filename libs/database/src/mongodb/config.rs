#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv};

/// Connection string used when nothing is configured: a local server on the default port.
pub const DEFAULT_URL: &str = "mongodb://localhost:27017";

/// Database used when nothing is configured.
pub const DEFAULT_DATABASE: &str = "clothstore";

/// MongoDB connection settings
///
/// Every field has a working default so a developer machine with a local
/// `mongod` needs no environment at all. Pool sizing is left to the driver.
///
/// # Example
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::new("mongodb://db.internal:27017");
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "shop");
///
/// // From environment variables (requires `config` feature)
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MongoConfig {
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    pub url: String,

    /// Database holding the service's collections
    pub database: String,

    /// Optional application name for server logs
    pub app_name: Option<String>,

    /// Connection timeout in seconds (driver default when unset)
    pub connect_timeout_secs: Option<u64>,

    /// Server selection timeout in seconds (driver default when unset)
    pub server_selection_timeout_secs: Option<u64>,
}

impl MongoConfig {
    /// Config for `url` with the default database name
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    /// Set the application name for server logs
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            app_name: None,
            connect_timeout_secs: None,
            server_selection_timeout_secs: None,
        }
    }
}

#[cfg(feature = "config")]
fn optional_secs(key: &str) -> Result<Option<u64>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| ConfigError::ParseError {
                key: key.to_string(),
                details: format!("{}", e),
            }),
        Err(_) => Ok(None),
    }
}

/// Load MongoConfig from environment variables
///
/// Environment variables (all optional):
/// - `MONGODB_URL` or `MONGO_URL` - connection string (default: `mongodb://localhost:27017`)
/// - `MONGODB_DATABASE` or `MONGO_DATABASE` - database name (default: `clothstore`)
/// - `MONGODB_APP_NAME` - application name for server logs
/// - `MONGODB_CONNECT_TIMEOUT_SECS`
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS`
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("MONGODB_URL")
            .or_else(|_| std::env::var("MONGO_URL"))
            .unwrap_or_else(|_| DEFAULT_URL.to_string());

        let database = std::env::var("MONGODB_DATABASE")
            .or_else(|_| std::env::var("MONGO_DATABASE"))
            .unwrap_or_else(|_| DEFAULT_DATABASE.to_string());

        Ok(Self {
            url,
            database,
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
            connect_timeout_secs: optional_secs("MONGODB_CONNECT_TIMEOUT_SECS")?,
            server_selection_timeout_secs: optional_secs("MONGODB_SERVER_SELECTION_TIMEOUT_SECS")?,
        })
    }
}
