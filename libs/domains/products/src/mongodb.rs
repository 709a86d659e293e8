//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use tracing::instrument;

use crate::error::{is_duplicate_key, is_index_conflict, ProductError, ProductResult};
use crate::models::{Product, ProductDocument, ProductInput};
use crate::repository::ProductRepository;

/// Default collection name
pub const COLLECTION: &str = "products";

const CATEGORY_INDEX: &str = "idx_category";
const NAME_INDEX: &str = "idx_name";

/// MongoDB implementation of the ProductRepository
#[derive(Clone)]
pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    /// Create a new MongoProductRepository
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, COLLECTION)
    }

    /// Create a new MongoProductRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<ProductDocument>(collection_name);
        Self { collection }
    }

    /// Create the collection's indexes.
    ///
    /// With `unique_names` the `name` index is unique, and later writes that
    /// collide on name fail with a conflict instead of relying on the
    /// service's existence check alone.
    ///
    /// The flag may change between runs. An `idx_name` left over with the
    /// other setting is dropped and rebuilt. If the stored products already
    /// share names the unique build fails; a plain index is built instead and
    /// a warning is logged.
    pub async fn init_indexes(&self, unique_names: bool) -> ProductResult<()> {
        self.collection.create_index(Self::category_index()).await?;

        let mut result = self
            .collection
            .create_index(Self::name_index(unique_names))
            .await;

        if matches!(&result, Err(e) if is_index_conflict(e)) {
            tracing::warn!(
                index = NAME_INDEX,
                unique_names,
                "Existing name index has different options, rebuilding it"
            );
            self.collection.drop_index(NAME_INDEX).await?;
            result = self
                .collection
                .create_index(Self::name_index(unique_names))
                .await;
        }

        match result {
            Ok(_) => {
                tracing::info!(unique_names, "Product indexes created successfully");
            }
            Err(e) if unique_names && is_duplicate_key(&e) => {
                tracing::warn!(
                    index = NAME_INDEX,
                    error = %e,
                    "Stored products share names; keeping a non-unique name index"
                );
                self.collection
                    .create_index(Self::name_index(false))
                    .await?;
            }
            Err(e) => return Err(e.into()),
        }

        Ok(())
    }

    /// Read-by-category
    fn category_index() -> IndexModel {
        IndexModel::builder()
            .keys(doc! { "category": 1 })
            .options(
                IndexOptions::builder()
                    .name(CATEGORY_INDEX.to_string())
                    .build(),
            )
            .build()
    }

    /// Create-time name lookup
    fn name_index(unique: bool) -> IndexModel {
        IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(
                IndexOptions::builder()
                    .name(NAME_INDEX.to_string())
                    .unique(unique)
                    .build(),
            )
            .build()
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<ProductDocument> {
        &self.collection
    }

    /// `$set` document overwriting the four product fields
    fn set_fields(input: &ProductInput) -> Document {
        doc! {
            "$set": {
                "name": input.name.as_str(),
                "description": input.description.as_str(),
                "price": input.price,
                "category": input.category.as_str(),
            }
        }
    }

    async fn find(&self, filter: Document) -> ProductResult<Vec<Product>> {
        let cursor = self.collection.find(filter).await?;
        let documents: Vec<ProductDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(Product::from).collect())
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create(&self, input: ProductInput) -> ProductResult<Product> {
        let document = ProductDocument::new(input);

        self.collection
            .insert_one(&document)
            .await
            .map_err(|e| {
                ProductError::from_write(e, || ProductError::DuplicateName(document.name.clone()))
            })?;

        tracing::info!(product_id = %document.id, "Product created successfully");
        Ok(document.into())
    }

    #[instrument(skip(self, inputs), fields(count = inputs.len()))]
    async fn create_many(&self, inputs: Vec<ProductInput>) -> ProductResult<Vec<ObjectId>> {
        let documents: Vec<ProductDocument> =
            inputs.into_iter().map(ProductDocument::new).collect();
        let ids = documents.iter().map(|d| d.id).collect();

        self.collection
            .insert_many(&documents)
            .await
            .map_err(|e| ProductError::from_write(e, || ProductError::Duplicate))?;

        tracing::info!(count = documents.len(), "Products created successfully");
        Ok(ids)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(product.map(Product::from))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> ProductResult<Vec<Product>> {
        self.find(doc! {}).await
    }

    #[instrument(skip(self))]
    async fn list_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        self.find(doc! { "category": category }).await
    }

    #[instrument(skip(self))]
    async fn exists_by_name(&self, name: &str) -> ProductResult<bool> {
        let filter = doc! { "name": name };
        let count = self.collection.count_documents(filter).await?;
        Ok(count > 0)
    }

    #[instrument(skip(self, input))]
    async fn update_fields(&self, id: ObjectId, input: ProductInput) -> ProductResult<()> {
        let result = self
            .collection
            .update_one(doc! { "_id": id }, Self::set_fields(&input))
            .await
            .map_err(|e| ProductError::from_write(e, || ProductError::DuplicateName(input.name)))?;

        if result.matched_count == 0 {
            return Err(ProductError::NotFound(id));
        }

        tracing::info!(product_id = %id, "Product updated successfully");
        Ok(())
    }

    #[instrument(skip(self, input))]
    async fn replace(&self, id: ObjectId, input: ProductInput) -> ProductResult<Product> {
        let document = ProductDocument::with_id(id, input);

        let result = self
            .collection
            .replace_one(doc! { "_id": id }, &document)
            .await
            .map_err(|e| {
                ProductError::from_write(e, || ProductError::DuplicateName(document.name.clone()))
            })?;

        if result.matched_count == 0 {
            return Err(ProductError::NotFound(id));
        }

        tracing::info!(product_id = %id, "Product replaced successfully");
        Ok(document.into())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> ProductResult<()> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        if result.deleted_count == 0 {
            return Err(ProductError::NotFound(id));
        }

        tracing::info!(product_id = %id, "Product deleted successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_many(&self, filter: Document) -> ProductResult<u64> {
        let result = self.collection.delete_many(filter).await?;

        tracing::info!(
            deleted_count = result.deleted_count,
            "Products deleted successfully"
        );
        Ok(result.deleted_count)
    }
}
