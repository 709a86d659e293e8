//! Configuration for Products API

use core_config::{app_info, env_flag, server::ServerConfig, AppInfo, FromEnv};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Opt-in unique index on product names
const UNIQUE_NAME_INDEX_VAR: &str = "PRODUCTS_UNIQUE_NAME_INDEX";

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Create `idx_name` as a unique index at startup
    pub unique_name_index: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let unique_name_index = env_flag(UNIQUE_NAME_INDEX_VAR, false)?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
            unique_name_index,
        })
    }
}
