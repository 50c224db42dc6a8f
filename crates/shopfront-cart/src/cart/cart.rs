//! Cart and line item types.

use crate::catalog::{CategoryRef, Product};
use crate::ids::ProductId;
use crate::money::Price;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys a line item owns. They never appear in `extra`.
const RESERVED_KEYS: [&str; 10] = [
    "productId", "id", "_id", "name", "title", "price", "image", "category", "stock",
    "quantity",
];

/// A shopping cart snapshot: line items in insertion order.
///
/// Product ids are unique within a cart and every quantity is at least 1.
/// Persisted as a bare JSON array of line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from line items.
    ///
    /// Items with a quantity below 1 are dropped and repeated product ids are
    /// merged into the first occurrence.
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.quantity < 1 {
                continue;
            }
            match cart.get_mut(&item.product_id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity)
                }
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Iterate over line items.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by product ID.
    pub fn get(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Check if a product is in the cart.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Quantity of a product in the cart, 0 if absent.
    pub fn quantity_of(&self, product_id: &ProductId) -> i64 {
        self.get(product_id).map(|i| i.quantity).unwrap_or(0)
    }

    /// Sum of `price * quantity` over all items.
    pub fn total(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.quantity))
    }

    fn get_mut(&mut self, product_id: &ProductId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|i| &i.product_id == product_id)
    }

    /// Add `quantity` of a product, merging with an existing line.
    ///
    /// Returns false (and changes nothing) if `quantity` is below 1.
    pub(crate) fn add(&mut self, product: &Product, quantity: i64) -> bool {
        if quantity < 1 {
            return false;
        }
        match self.get_mut(&product.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(quantity),
            None => self.items.push(LineItem::from_product(product, quantity)),
        }
        true
    }

    /// Remove a product. Returns whether anything was removed.
    pub(crate) fn remove(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.product_id != product_id);
        self.items.len() < len_before
    }

    /// Replace the quantity of a present product.
    ///
    /// Returns false if `quantity` is below 1 or the product is absent.
    pub(crate) fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        if quantity < 1 {
            return false;
        }
        match self.get_mut(product_id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Re-copy denormalized fields from a fresh product record.
    pub(crate) fn refresh(&mut self, product: &Product) -> bool {
        match self.get_mut(&product.id) {
            Some(item) => {
                item.refresh_from(product);
                true
            }
            None => false,
        }
    }

    /// Remove all items.
    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }
}

impl From<Vec<LineItem>> for Cart {
    fn from(items: Vec<LineItem>) -> Self {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A line item in the cart.
///
/// Everything but `product_id` and `quantity` is a copy of the product taken
/// when it was first added; it is not kept in sync with the catalog.
///
/// Reading accepts the id as `productId`, `id` or `_id` and the name as
/// `name` or `title`, in that order of preference, even when several are
/// present. `category` may be a name or a category record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", try_from = "Map<String, Value>")]
pub struct LineItem {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price at add time.
    pub price: Price,
    /// Primary image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Category display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Stock known at add time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    /// Quantity, at least 1.
    pub quantity: i64,
    /// Remaining product fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LineItem {
    /// Create a line item from a catalog product.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        let mut item = Self {
            product_id: product.id.clone(),
            name: String::new(),
            price: Price::zero(),
            image: None,
            category: None,
            stock: None,
            quantity,
            extra: Map::new(),
        };
        item.refresh_from(product);
        item
    }

    /// Overwrite the denormalized fields with those of `product`.
    ///
    /// Quantity and product id are left untouched.
    pub fn refresh_from(&mut self, product: &Product) {
        self.name = product.name.clone();
        self.price = product.price;
        self.image = product.primary_image().map(str::to_string);
        self.category = product.category_name().map(str::to_string);
        self.stock = product.stock;
        self.extra = product
            .extra
            .iter()
            .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        if let Some(description) = &product.description {
            self.extra
                .insert("description".to_string(), Value::String(description.clone()));
        }
    }

    /// Total price (price * quantity).
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

impl TryFrom<Map<String, Value>> for LineItem {
    type Error = String;

    fn try_from(mut fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let product_id: ProductId = take_first(&mut fields, &["productId", "id", "_id"])?
            .ok_or("missing field `productId`")?;
        let name: String = take_first(&mut fields, &["name", "title"])?.ok_or("missing field `name`")?;
        let price: Price = take_first(&mut fields, &["price"])?.ok_or("missing field `price`")?;
        let quantity: i64 =
            take_first(&mut fields, &["quantity"])?.ok_or("missing field `quantity`")?;
        let stock: Option<i64> = take_first(&mut fields, &["stock"])?;
        // Display-only fields: an unexpected shape is dropped, not fatal
        let category = take_first::<CategoryRef>(&mut fields, &["category"])
            .ok()
            .flatten()
            .map(|category| category.name().to_string());
        let image = take_first::<String>(&mut fields, &["image"])
            .ok()
            .flatten()
            .or_else(|| first_image_url(&fields));

        Ok(Self {
            product_id,
            name,
            price,
            image,
            category,
            stock,
            quantity,
            extra: fields,
        })
    }
}

/// Remove every key in `keys` and parse the first non-null value found.
fn take_first<T: DeserializeOwned>(
    fields: &mut Map<String, Value>,
    keys: &[&str],
) -> Result<Option<T>, String> {
    let mut found = None;
    for key in keys {
        if let Some(value) = fields.remove(*key) {
            if found.is_none() && !value.is_null() {
                found = Some((*key, value));
            }
        }
    }
    found
        .map(|(key, value)| {
            serde_json::from_value(value).map_err(|e| format!("invalid `{key}`: {e}"))
        })
        .transpose()
}

/// `images[0].url` of a product record spread into the line.
fn first_image_url(fields: &Map<String, Value>) -> Option<String> {
    fields
        .get("images")?
        .as_array()?
        .first()?
        .get("url")?
        .as_str()
        .map(str::to_string)
}
