//! API routes module

pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/products", products::router(state))
        .merge(health::router(state.clone()))
}

/// Initialize database indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    products::init_indexes(state).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use axum_helpers::server::create_router;
    use core_config::{app_info, server::ServerConfig, Environment};
    use database::mongodb::MongoConfig;
    use http_body_util::BodyExt;
    use mongodb::Client;
    use serde_json::Value;
    use tower::ServiceExt;

    /// Nothing listens on port 1; the driver connects lazily so building
    /// the state never blocks, and the short selection timeout keeps
    /// store-touching requests quick to fail.
    const UNREACHABLE: &str = "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200";

    async fn app() -> Router {
        let mongo_client = Client::with_uri_str(UNREACHABLE).await.unwrap();
        let config = Config {
            app: app_info!(),
            mongodb: MongoConfig::with_database(UNREACHABLE, "clothstore_test"),
            server: ServerConfig::default(),
            environment: Environment::Development,
            unique_name_index: false,
        };
        let state = AppState {
            db: mongo_client.database(config.mongodb.database()),
            mongo_client,
            config,
        };

        create_router(routes(&state))
    }

    async fn get(uri: &str) -> (StatusCode, Value) {
        request("GET", uri).await
    }

    async fn request(method: &str, uri: &str) -> (StatusCode, Value) {
        let response = app()
            .await
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_id_rejected_before_store() {
        let (status, body) = get("/products/123").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "INVALID_OBJECT_ID");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (status, body) = get("/widgets").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_ready_reports_unreachable_store() {
        let (status, body) = get("/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "not ready");
        assert_eq!(body["mongodb"], "disconnected");
    }

    #[tokio::test]
    async fn test_store_failure_hides_driver_detail() {
        let (status, body) = get("/products").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "DATABASE_ERROR");
        assert!(!body["message"].as_str().unwrap().contains("127.0.0.1"));
    }

    #[tokio::test]
    async fn test_bulk_path_reads_as_invalid_id() {
        for method in ["GET", "DELETE"] {
            let (status, body) = request(method, "/products/bulk").await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{method}");
            assert_eq!(body["error"], "INVALID_OBJECT_ID");
        }
    }

    #[tokio::test]
    async fn test_unrouted_method_is_json_405() {
        let (status, body) = request("PATCH", "/products").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"], "METHOD_NOT_ALLOWED");

        let (status, body) = request("POST", "/ready").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"], "METHOD_NOT_ALLOWED");
    }
}
