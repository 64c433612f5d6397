use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Amount, Customer, Product, sale_total};

pub type SaleId = Uuid;

/// A completed sale. Product and buyer are copied by name at the time of the
/// sale, so later catalog or customer changes never rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub product_name: String,
    pub quantity: u32,
    pub total: Amount,
    pub buyer_name: String,
    pub recorded_at: DateTime<Utc>,
}

impl Sale {
    /// Build the record for selling `quantity` units of `product` to `buyer`.
    /// Stock is not touched here.
    pub fn new(product: &Product, buyer: &Customer, quantity: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_name: product.name.clone(),
            quantity,
            total: sale_total(quantity, product.price),
            buyer_name: buyer.name.clone(),
            recorded_at: Utc::now(),
        }
    }
}
