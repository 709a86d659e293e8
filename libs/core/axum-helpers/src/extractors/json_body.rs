//! JSON body extractor that reports every decode failure as a 400.

use crate::errors::AppError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Json, Request},
};
use serde::de::DeserializeOwned;

/// JSON request body.
///
/// Unlike `axum::Json`, the `Content-Type` header is not required and every
/// failure (syntax error, wrong field type, non-object where an object is
/// expected) is answered with `400 Bad Request` and an `INVALID_JSON` body
/// instead of axum's 415/422 split.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::JsonBody;
///
/// async fn create(JsonBody(input): JsonBody<ProductInput>) -> StatusCode {
///     StatusCode::CREATED
/// }
/// ```
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let Json(data) = Json::<T>::from_bytes(&bytes)?;
        Ok(JsonBody(data))
    }
}
