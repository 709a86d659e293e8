use super::shutdown::shutdown_signal;
use crate::errors::handlers::{method_not_allowed, not_found};
use axum::Router;
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};

/// Wraps the service routes with the shared HTTP plumbing.
///
/// This function sets up:
/// - The given routes, mounted as-is
/// - A JSON 404 fallback for unknown paths
/// - A JSON 405 for known paths hit with a method they do not route
/// - Access logging (method, path, status, latency) via `TraceLayer`
///
/// Domain routers apply their own state before being passed in.
///
/// # Example
/// ```ignore
/// let api_routes = Router::new()
///     .nest("/products", domain_products::handlers::router(service));
///
/// let router = create_router(api_routes);
/// ```
pub fn create_router(apis: Router) -> Router {
    Router::new()
        .merge(apis)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// Serves until a shutdown signal arrives, then runs `cleanup` within `shutdown_timeout`.
///
/// In-flight requests are drained before `cleanup` starts, so it is safe to
/// close database clients there.
///
/// # Example
/// ```ignore
/// use std::time::Duration;
/// use axum_helpers::server::create_production_app;
///
/// let client = state.mongo_client.clone();
/// create_production_app(router, &config, Duration::from_secs(30), async move {
///     client.shutdown().await;
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }

    serve_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorResponse;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(Router::new().route("/ping", get(|| async { "pong" })))
    }

    #[tokio::test]
    async fn test_routes_are_mounted_at_root() {
        let response = app()
            .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_path_returns_json_404() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/nope/nothing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_unrouted_method_returns_json_405() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri("/ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "METHOD_NOT_ALLOWED");
        assert_eq!(body.code, 1005);
    }
}
