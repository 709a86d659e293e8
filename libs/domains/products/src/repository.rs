use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};

use crate::error::ProductResult;
use crate::models::{Product, ProductInput};

/// Repository trait for Product persistence
///
/// Each method maps to a single store call. Methods addressing one product
/// by id fail with `ProductError::NotFound` when nothing matched.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product under a fresh identifier
    async fn create(&self, input: ProductInput) -> ProductResult<Product>;

    /// Insert several products in one call, returning their ids in input order
    async fn create_many(&self, inputs: Vec<ProductInput>) -> ProductResult<Vec<ObjectId>>;

    /// Get a product by ID
    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>>;

    /// All products, in store order
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// Products whose category equals `category` exactly
    async fn list_by_category(&self, category: &str) -> ProductResult<Vec<Product>>;

    /// Check if a product name exists
    async fn exists_by_name(&self, name: &str) -> ProductResult<bool>;

    /// Overwrite name, description, price and category
    async fn update_fields(&self, id: ObjectId, input: ProductInput) -> ProductResult<()>;

    /// Replace the whole stored document
    async fn replace(&self, id: ObjectId, input: ProductInput) -> ProductResult<Product>;

    /// Delete a product by ID
    async fn delete(&self, id: ObjectId) -> ProductResult<()>;

    /// Delete every product matching `filter`, returning how many were removed
    async fn delete_many(&self, filter: Document) -> ProductResult<u64>;
}
