use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use mongodb::bson::oid::ObjectId;
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

/// Server error code for a unique index violation
const DUPLICATE_KEY: i32 = 11000;
/// Index with the same name exists with different options
const INDEX_OPTIONS_CONFLICT: i32 = 85;
/// Index with the same name exists with different keys
const INDEX_KEY_SPECS_CONFLICT: i32 = 86;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(ObjectId),

    #[error("Product with name '{0}' already exists")]
    DuplicateName(String),

    /// Unique index violation where the offending name is unknown (bulk insert)
    #[error("Product already exists")]
    Duplicate,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    /// Map a write error, turning duplicate-key failures into `conflict`
    pub fn from_write(err: mongodb::error::Error, conflict: impl FnOnce() -> Self) -> Self {
        if is_duplicate_key(&err) {
            conflict()
        } else {
            err.into()
        }
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::NotFound("Product not found".to_string()),
            ProductError::DuplicateName(name) => {
                AppError::Conflict(format!("Product with name '{}' already exists", name))
            }
            ProductError::Duplicate => AppError::Conflict("Product already exists".to_string()),
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// True when the driver error is (or contains) a code 11000 failure.
///
/// Writes report it as a write error; a unique index build over duplicate
/// data reports it as a command error.
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY,
        ErrorKind::InsertMany(e) => e
            .write_errors
            .as_ref()
            .is_some_and(|errors| errors.iter().any(|e| e.code == DUPLICATE_KEY)),
        _ => false,
    }
}

/// True when an index of the same name already exists with a different definition
pub fn is_index_conflict(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Command(e) if e.code == INDEX_OPTIONS_CONFLICT || e.code == INDEX_KEY_SPECS_CONFLICT
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ProductError::NotFound(ObjectId::new()), StatusCode::NOT_FOUND),
            (
                ProductError::DuplicateName("Red Shirt".into()),
                StatusCode::CONFLICT,
            ),
            (ProductError::Duplicate, StatusCode::CONFLICT),
            (
                ProductError::Validation("empty".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ProductError::Database(mongodb::error::Error::custom("socket closed")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_non_write_error_is_not_duplicate() {
        let err = mongodb::error::Error::custom("boom");
        assert!(!is_duplicate_key(&err));
        assert!(!is_index_conflict(&err));
        assert!(matches!(
            ProductError::from_write(err, || ProductError::Duplicate),
            ProductError::Database(_)
        ));
    }

    #[tokio::test]
    async fn test_store_failure_answers_database_error() {
        use http_body_util::BodyExt;

        let err = ProductError::Database(mongodb::error::Error::custom("socket closed"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: axum_helpers::ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "DATABASE_ERROR");
        assert!(!body.message.contains("socket"));
    }
}
