//! Server infrastructure module.
//!
//! This module provides:
//! - Router assembly with access logging and JSON 404/405 fallbacks
//! - Health and readiness helpers
//! - Graceful shutdown with a bounded cleanup phase
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::{server::ServerConfig, app_info};
//!
//! let router = create_router(api_routes).merge(health_router(app_info!()));
//!
//! create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {}).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_production_app, create_router};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::shutdown_signal;
