//! Product Service - Business logic layer

use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductInput};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// Thin layer over the repository: it owns the create-time name check,
/// the empty bulk rejection and the JSON-to-BSON filter conversion.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product.
    ///
    /// The name check and the insert are separate store calls, so two
    /// concurrent creates with the same name can both succeed unless the
    /// unique name index is enabled.
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: ProductInput) -> ProductResult<Product> {
        if self.repository.exists_by_name(&input.name).await? {
            return Err(ProductError::DuplicateName(input.name));
        }

        self.repository.create(input).await
    }

    /// Insert several products at once
    #[instrument(skip(self, inputs), fields(count = inputs.len()))]
    pub async fn create_products(&self, inputs: Vec<ProductInput>) -> ProductResult<Vec<ObjectId>> {
        if inputs.is_empty() {
            return Err(ProductError::Validation(
                "At least one product is required".to_string(),
            ));
        }

        self.repository.create_many(inputs).await
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ObjectId) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// List every product
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    /// Products in exactly this category (case-sensitive)
    #[instrument(skip(self))]
    pub async fn list_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        self.repository.list_by_category(category).await
    }

    /// Overwrite the four product fields of an existing product
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: ObjectId, input: ProductInput) -> ProductResult<()> {
        self.repository.update_fields(id, input).await
    }

    /// Replace an existing product wholesale
    #[instrument(skip(self, input))]
    pub async fn replace_product(
        &self,
        id: ObjectId,
        input: ProductInput,
    ) -> ProductResult<Product> {
        self.repository.replace(id, input).await
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ObjectId) -> ProductResult<()> {
        self.repository.delete(id).await
    }

    /// Delete every product matching a caller-supplied filter.
    ///
    /// The filter is handed to the store as-is (extended JSON such as
    /// `{"$oid": ...}` is decoded); an empty object matches everything.
    #[instrument(skip(self, filter))]
    pub async fn delete_products(&self, filter: Map<String, Value>) -> ProductResult<u64> {
        let filter = Self::to_filter(filter)?;
        tracing::warn!(?filter, "Deleting products by filter");
        self.repository.delete_many(filter).await
    }

    fn to_filter(filter: Map<String, Value>) -> ProductResult<Document> {
        match Bson::try_from(Value::Object(filter)) {
            Ok(Bson::Document(doc)) => Ok(doc),
            Ok(other) => Err(ProductError::Validation(format!(
                "Filter must be a document, got {:?}",
                other.element_type()
            ))),
            Err(e) => Err(ProductError::Validation(format!("Invalid filter: {}", e))),
        }
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
