//! Application state management

use mongodb::{Client, Database};

/// Shared application state, built once in `main` and handed to the routers
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mongo_client: Client,
    pub db: Database,
}
