//! Product records from the catalog service.

use crate::ids::ProductId;
use crate::money::Price;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A product as returned by the catalog API.
///
/// Accepts both naming schemes seen in catalog payloads (`id`/`_id`,
/// `name`/`title`). When a record carries both spellings the first one
/// (`id`, `name`) wins. Fields the cart does not model are kept in `extra`
/// and copied into line items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(remote = "Self")]
pub struct Product {
    /// Product identifier.
    #[serde(alias = "_id")]
    pub id: ProductId,
    /// Display name.
    #[serde(alias = "title")]
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Units in stock, if the catalog tracks it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    /// Product images, first one is the primary image.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ProductImage>,
    /// Single image URL used by older catalog payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Category, either a plain name or a category record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,
    /// Long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Any other catalog fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Create a product with the required fields.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Price) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            stock: None,
            images: Vec::new(),
            image: None,
            category: None,
            description: None,
            extra: Map::new(),
        }
    }

    /// Set the stock level.
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = Some(stock);
        self
    }

    /// Set the category by name.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(CategoryRef::Name(category.into()));
        self
    }

    /// Add an image URL.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(ProductImage { url: url.into() });
        self
    }

    /// The image shown in listings: the first of `images`, else `image`.
    pub fn primary_image(&self) -> Option<&str> {
        self.images
            .first()
            .map(|i| i.url.as_str())
            .or(self.image.as_deref())
    }

    /// Display name of the category.
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(CategoryRef::name)
    }
}

impl Serialize for Product {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Product::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Product {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Map::deserialize(deserializer)?;
        keep_first(&mut fields, &["id", "_id"]);
        keep_first(&mut fields, &["name", "title"]);
        Product::deserialize(Value::Object(fields)).map_err(serde::de::Error::custom)
    }
}

/// Drop all but the first present key of a set of aliases.
fn keep_first(fields: &mut Map<String, Value>, aliases: &[&str]) {
    if let Some(pos) = aliases.iter().position(|key| fields.contains_key(*key)) {
        for key in &aliases[pos + 1..] {
            fields.remove(*key);
        }
    }
}

/// A product image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductImage {
    /// Image URL.
    pub url: String,
}

/// Category reference as embedded in a product record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CategoryRef {
    /// Category given by name only (`"electronics"`).
    Name(String),
    /// Populated category record (`{"_id": "...", "name": "Electronics"}`).
    Record {
        /// Display name.
        name: String,
    },
}

impl CategoryRef {
    /// Display name of the category.
    pub fn name(&self) -> &str {
        match self {
            CategoryRef::Name(name) => name,
            CategoryRef::Record { name } => name,
        }
    }
}
