//! Cart configuration.

use serde::{Deserialize, Serialize};

/// Storage key the cart is kept under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "cart_items";

/// Cart store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Key holding the serialized cart.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_key() {
        assert_eq!(CartConfig::default().storage_key, "cart_items");
    }

    #[test]
    fn test_missing_key_uses_default() {
        let config: CartConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CartConfig::default());
    }
}
