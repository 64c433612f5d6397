use super::{Amount, Customer, Product, Sale};

/// Compare two names ignoring letter case.
/// Catalog de-duplication and sale lookup both go through this.
pub fn names_match(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Find a product by name, ignoring case.
pub fn find_product_by_name<'a>(products: &'a [Product], name: &str) -> Option<&'a Product> {
    products.iter().find(|p| p.is_named(name))
}

/// Find a customer by phone (exact), falling back to the first customer whose
/// name matches ignoring case.
pub fn find_customer<'a>(customers: &'a [Customer], key: &str) -> Option<&'a Customer> {
    customers
        .iter()
        .find(|c| c.has_phone(key))
        .or_else(|| customers.iter().find(|c| names_match(&c.name, key)))
}

/// Returns true if any customer already uses this phone number.
pub fn phone_registered(customers: &[Customer], phone: &str) -> bool {
    customers.iter().any(|c| c.has_phone(phone))
}

/// Total price for `quantity` units at `unit_price`.
pub fn sale_total(quantity: u32, unit_price: Amount) -> Amount {
    Amount::from(quantity) * unit_price
}

/// Sum of all sale totals, folded strictly in recording order.
pub fn compute_revenue(sales: &[Sale]) -> Amount {
    sales.iter().fold(0.0, |revenue, sale| revenue + sale.total)
}

/// Check that `product` can cover a sale of `requested` units.
pub fn validate_stock(product: &Product, requested: u32) -> Result<(), StockError> {
    if requested > product.stock {
        return Err(StockError::Insufficient {
            available: product.stock,
            requested,
        });
    }
    Ok(())
}

/// Stock after receiving `added` more units.
pub fn restocked(product: &Product, added: u32) -> Result<u32, StockError> {
    product
        .stock
        .checked_add(added)
        .ok_or(StockError::Overflow {
            current: product.stock,
            added,
        })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockError {
    Insufficient { available: u32, requested: u32 },
    Overflow { current: u32, added: u32 },
}

impl std::fmt::Display for StockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockError::Insufficient {
                available,
                requested,
            } => write!(f, "Requested {} units but only {} in stock", requested, available),
            StockError::Overflow { current, added } => {
                write!(f, "Adding {} units to {} would overflow the stock count", added, current)
            }
        }
    }
}

impl std::error::Error for StockError {}
