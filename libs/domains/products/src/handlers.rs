//! HTTP handlers for Products API

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use axum_helpers::errors::handlers::method_not_allowed;
use axum_helpers::{AppError, JsonBody, ObjectIdPath};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::error::ProductResult;
use crate::models::{
    BulkCreateResponse, DeleteManyResponse, MessageResponse, Product, ProductInput,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// Create the products router with all HTTP endpoints.
///
/// Paths are relative; the app mounts this router at `/products`.
/// `/bulk` only accepts POST. Other methods on it are read as the `/{id}`
/// routes with "bulk" as the identifier, so they get the usual 400.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/",
            get(list_products)
                .post(create_product)
                .delete(delete_products),
        )
        .route("/bulk", post(create_products).fallback(bulk_as_id))
        .route("/category/{category}", get(list_by_category))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/{id}/replace", put(replace_product))
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(shared_service)
}

async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_products().await?;
    Ok(Json(products))
}

async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    JsonBody(input): JsonBody<ProductInput>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn create_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    JsonBody(inputs): JsonBody<Vec<ProductInput>>,
) -> ProductResult<Json<BulkCreateResponse>> {
    let ids = service.create_products(inputs).await?;
    Ok(Json(BulkCreateResponse {
        message: "Products uploaded successfully".to_string(),
        insert_ids: ids.iter().map(|id| id.to_hex()).collect(),
    }))
}

async fn bulk_as_id() -> AppError {
    AppError::InvalidObjectId("bulk".to_string())
}

async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

async fn list_by_category<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(category): Path<String>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_by_category(&category).await?;
    Ok(Json(products))
}

async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
    JsonBody(input): JsonBody<ProductInput>,
) -> ProductResult<Json<MessageResponse>> {
    service.update_product(id, input).await?;
    Ok(Json(MessageResponse::new("Product updated successfully")))
}

async fn replace_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
    JsonBody(input): JsonBody<ProductInput>,
) -> ProductResult<Json<Product>> {
    let product = service.replace_product(id, input).await?;
    Ok(Json(product))
}

async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> ProductResult<Json<MessageResponse>> {
    service.delete_product(id).await?;
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}

/// Delete by arbitrary filter; the body must be a JSON object
async fn delete_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    JsonBody(filter): JsonBody<Map<String, Value>>,
) -> ProductResult<Json<DeleteManyResponse>> {
    let deleted_count = service.delete_products(filter).await?;
    Ok(Json(DeleteManyResponse {
        message: "Products deleted successfully".to_string(),
        deleted_count,
    }))
}
