use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Amount;

pub type ProductId = Uuid;

/// A catalog entry. Names are unique within the catalog, ignoring letter case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Amount,
    pub stock: u32,
}

impl Product {
    pub fn new(name: impl Into<String>, price: Amount, stock: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            price,
            stock,
        }
    }

    /// Returns true if this product's name matches `name`, ignoring case.
    pub fn is_named(&self, name: &str) -> bool {
        super::names_match(&self.name, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_products_get_distinct_ids() {
        let a = Product::new("Rice", 50.0, 10);
        let b = Product::new("Rice", 50.0, 10);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_is_named_ignores_case() {
        let product = Product::new("Rice", 50.0, 10);
        assert!(product.is_named("rice"));
        assert!(product.is_named("RICE"));
        assert!(!product.is_named("Rice "));
        assert!(!product.is_named("Oil"));
    }
}
