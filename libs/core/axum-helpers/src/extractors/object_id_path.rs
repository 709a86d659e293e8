//! ObjectId path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use mongodb::bson::oid::ObjectId;

/// Extractor for a single document identifier in the path.
///
/// The segment must be a 24-character hex string; anything else is rejected
/// with `400 INVALID_OBJECT_ID` before the handler (and the store) is reached.
///
/// # Example
/// ```ignore
/// use axum::{Router, routing::get};
/// use axum_helpers::extractors::ObjectIdPath;
///
/// async fn get_product(ObjectIdPath(id): ObjectIdPath) -> String {
///     id.to_hex()
/// }
///
/// let app = Router::new().route("/products/{id}", get(get_product));
/// ```
pub struct ObjectIdPath(pub ObjectId);

impl<S> FromRequestParts<S> for ObjectIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;

        ObjectId::parse_str(&raw).map(ObjectIdPath).map_err(|e| {
            tracing::debug!("Rejected identifier {:?}: {}", raw, e);
            AppError::InvalidObjectId(raw)
        })
    }
}
