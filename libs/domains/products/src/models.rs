use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Product as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// 24-character hex identifier assigned on creation
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
}

/// Request body for create, bulk-create, update and replace.
///
/// Missing fields decode to their empty value, so `{}` is a valid
/// (if unhelpful) product. A field of the wrong JSON type is still a
/// decode error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
}

/// Storage shape of a product in the `products` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub category: String,
}

impl ProductDocument {
    /// New document with a freshly generated identifier
    pub fn new(input: ProductInput) -> Self {
        Self::with_id(ObjectId::new(), input)
    }

    /// Document for an existing identifier, used by replace
    pub fn with_id(id: ObjectId, input: ProductInput) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            category: input.category,
        }
    }
}

impl From<ProductDocument> for Product {
    fn from(doc: ProductDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            name: doc.name,
            description: doc.description,
            price: doc.price,
            category: doc.category,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result of a bulk insert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkCreateResponse {
    pub message: String,
    /// Hex identifiers in request order
    pub insert_ids: Vec<String>,
}

/// Result of a filtered delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteManyResponse {
    pub message: String,
    pub deleted_count: u64,
}
