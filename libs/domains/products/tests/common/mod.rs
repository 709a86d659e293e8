//! In-memory ProductRepository used by the handler tests.

use async_trait::async_trait;
use domain_products::{Product, ProductDocument, ProductError, ProductInput, ProductResult};
use domain_products::ProductRepository;
use mongodb::bson::{oid::ObjectId, Document};
use tokio::sync::RwLock;

/// Vec-backed store. `delete_many` only understands top-level equality
/// filters, which is all the tests send.
#[derive(Default)]
pub struct InMemoryProductRepository {
    documents: RwLock<Vec<ProductDocument>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(document: &ProductDocument, filter: &Document) -> bool {
        let stored = mongodb::bson::to_document(document).unwrap();
        filter
            .iter()
            .all(|(key, value)| stored.get(key) == Some(value))
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: ProductInput) -> ProductResult<Product> {
        let document = ProductDocument::new(input);
        self.documents.write().await.push(document.clone());
        Ok(document.into())
    }

    async fn create_many(&self, inputs: Vec<ProductInput>) -> ProductResult<Vec<ObjectId>> {
        let mut documents = self.documents.write().await;
        let ids = inputs
            .into_iter()
            .map(|input| {
                let document = ProductDocument::new(input);
                let id = document.id;
                documents.push(document);
                id
            })
            .collect();
        Ok(ids)
    }

    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .map(Product::from))
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let documents = self.documents.read().await;
        Ok(documents.iter().cloned().map(Product::from).collect())
    }

    async fn list_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|d| d.category == category)
            .cloned()
            .map(Product::from)
            .collect())
    }

    async fn exists_by_name(&self, name: &str) -> ProductResult<bool> {
        let documents = self.documents.read().await;
        Ok(documents.iter().any(|d| d.name == name))
    }

    async fn update_fields(&self, id: ObjectId, input: ProductInput) -> ProductResult<()> {
        let mut documents = self.documents.write().await;
        let document = documents
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(ProductError::NotFound(id))?;
        *document = ProductDocument::with_id(id, input);
        Ok(())
    }

    async fn replace(&self, id: ObjectId, input: ProductInput) -> ProductResult<Product> {
        let mut documents = self.documents.write().await;
        let document = documents
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(ProductError::NotFound(id))?;
        *document = ProductDocument::with_id(id, input);
        Ok(document.clone().into())
    }

    async fn delete(&self, id: ObjectId) -> ProductResult<()> {
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|d| d.id != id);
        if documents.len() == before {
            return Err(ProductError::NotFound(id));
        }
        Ok(())
    }

    async fn delete_many(&self, filter: Document) -> ProductResult<u64> {
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|d| !Self::matches(d, &filter));
        Ok((before - documents.len()) as u64)
    }
}
