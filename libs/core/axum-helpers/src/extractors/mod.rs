//! Custom extractors for Axum handlers.
//!
//! Both extractors reject with an [`AppError`](crate::AppError), so every
//! malformed request gets the same JSON error body and a 400 status.

pub mod json_body;
pub mod object_id_path;

pub use json_body::JsonBody;
pub use object_id_path::ObjectIdPath;
