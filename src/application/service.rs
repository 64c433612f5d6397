use tracing::{debug, info};

use crate::domain::{
    Amount, Customer, CustomerId, Product, ProductId, Sale, find_customer, find_product_by_name,
    phone_registered, restocked, validate_stock,
};
use crate::storage::{Repository, StoreStats};

use super::input::require;
use super::{CustomerForm, LedgerError, ProductForm, SalesReport};

/// The grocery ledger: owns the catalog, the customer list and the sale history.
/// This is the primary interface for any front end (shell, GUI, tests).
///
/// Every operation either succeeds completely or leaves the ledger untouched.
#[derive(Debug, Default)]
pub struct Ledger {
    repo: Repository,
}

/// Result of offering a product to the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum AddProductOutcome {
    /// A new catalog entry was created.
    Created(Product),
    /// A product with the same name (ignoring case) already exists. Nothing was
    /// changed; call [`Ledger::merge_stock`] once the user confirms.
    Duplicate { existing: Product },
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> StoreStats {
        self.repo.stats()
    }

    // ========================
    // Product operations
    // ========================

    /// Add a product to the catalog, unless one with the same name already exists.
    ///
    /// On a duplicate the given price is ignored and nothing changes; the caller
    /// decides whether to merge `stock` into the existing entry.
    pub fn try_add_product(
        &mut self,
        name: &str,
        price: Amount,
        stock: u32,
    ) -> Result<AddProductOutcome, LedgerError> {
        let name = require("name", name)?;
        if !price.is_finite() || price < 0.0 {
            return Err(LedgerError::InvalidPrice(price));
        }
        // -0.0 passes the check above
        let price = price + 0.0;

        if let Some(existing) = find_product_by_name(self.repo.list_products(), &name) {
            debug!(product = %existing.name, "duplicate product offered");
            return Ok(AddProductOutcome::Duplicate {
                existing: existing.clone(),
            });
        }

        let product = Product::new(name, price, stock);
        info!(product = %product.name, price, stock, "product added");
        self.repo.insert_product(product.clone());
        Ok(AddProductOutcome::Created(product))
    }

    /// Validate raw text input and offer the product to the catalog.
    pub fn submit_product(&mut self, form: &ProductForm) -> Result<AddProductOutcome, LedgerError> {
        let new = form.parse()?;
        self.try_add_product(&new.name, new.price, new.stock)
    }

    /// Add `stock` units to an existing product.
    pub fn merge_stock(&mut self, id: ProductId, stock: u32) -> Result<Product, LedgerError> {
        let product = self
            .repo
            .get_product_mut(id)
            .ok_or_else(|| LedgerError::ProductNotFound(id.to_string()))?;

        let merged =
            restocked(product, stock).map_err(|e| LedgerError::from_stock(&product.name, e))?;
        product.stock = merged;
        info!(product = %product.name, added = stock, stock = product.stock, "stock merged");
        Ok(product.clone())
    }

    /// Remove a product from the catalog. Past sales keep their copy of the name.
    pub fn delete_product(&mut self, id: ProductId) -> Result<Product, LedgerError> {
        let product = self
            .repo
            .remove_product(id)
            .ok_or_else(|| LedgerError::ProductNotFound(id.to_string()))?;
        info!(product = %product.name, "product deleted");
        Ok(product)
    }

    /// Remove the product at a zero-based position in the catalog listing.
    pub fn delete_product_at(&mut self, index: usize) -> Result<Product, LedgerError> {
        let id = self.product_at(index)?.id;
        self.delete_product(id)
    }

    pub fn product(&self, id: ProductId) -> Result<&Product, LedgerError> {
        self.repo
            .get_product(id)
            .ok_or_else(|| LedgerError::ProductNotFound(id.to_string()))
    }

    pub fn product_at(&self, index: usize) -> Result<&Product, LedgerError> {
        check_position("products", index, self.repo.list_products().len())?;
        self.repo
            .product_at(index)
            .ok_or(LedgerError::EmptyCollection("products"))
    }

    /// Find a product by name, ignoring case.
    pub fn find_product(&self, name: &str) -> Option<&Product> {
        find_product_by_name(self.repo.list_products(), name.trim())
    }

    /// All products in insertion order.
    pub fn products(&self) -> &[Product] {
        self.repo.list_products()
    }

    /// Names offered for selection when recording a sale, in catalog order.
    pub fn product_names(&self) -> Vec<&str> {
        self.products().iter().map(|p| p.name.as_str()).collect()
    }

    // ========================
    // Customer operations
    // ========================

    /// Register a customer. Phone numbers must be unique.
    pub fn add_customer(&mut self, name: &str, phone: &str) -> Result<Customer, LedgerError> {
        let name = require("name", name)?;
        let phone = require("phone", phone)?;

        if phone_registered(self.repo.list_customers(), &phone) {
            return Err(LedgerError::PhoneAlreadyRegistered(phone));
        }

        let customer = Customer::new(name, phone);
        info!(customer = %customer.name, phone = %customer.phone, "customer added");
        self.repo.insert_customer(customer.clone());
        Ok(customer)
    }

    pub fn submit_customer(&mut self, form: &CustomerForm) -> Result<Customer, LedgerError> {
        let new = form.parse()?;
        self.add_customer(&new.name, &new.phone)
    }

    pub fn delete_customer(&mut self, id: CustomerId) -> Result<Customer, LedgerError> {
        let customer = self
            .repo
            .remove_customer(id)
            .ok_or_else(|| LedgerError::CustomerNotFound(id.to_string()))?;
        info!(customer = %customer.name, phone = %customer.phone, "customer deleted");
        Ok(customer)
    }

    pub fn delete_customer_at(&mut self, index: usize) -> Result<Customer, LedgerError> {
        let id = self.customer_at(index)?.id;
        self.delete_customer(id)
    }

    pub fn customer(&self, id: CustomerId) -> Result<&Customer, LedgerError> {
        self.repo
            .get_customer(id)
            .ok_or_else(|| LedgerError::CustomerNotFound(id.to_string()))
    }

    pub fn customer_at(&self, index: usize) -> Result<&Customer, LedgerError> {
        check_position("customers", index, self.repo.list_customers().len())?;
        self.repo
            .customer_at(index)
            .ok_or(LedgerError::EmptyCollection("customers"))
    }

    /// Find a customer by exact phone, or else by name ignoring case.
    pub fn find_customer(&self, key: &str) -> Option<&Customer> {
        find_customer(self.repo.list_customers(), key.trim())
    }

    pub fn customers(&self) -> &[Customer] {
        self.repo.list_customers()
    }

    // ========================
    // Sale operations
    // ========================

    /// Sell `quantity` units of a product to a customer.
    pub fn record_sale(
        &mut self,
        product_id: ProductId,
        customer_id: CustomerId,
        quantity: u32,
    ) -> Result<Sale, LedgerError> {
        let product = self.product(product_id)?;
        let buyer = self.customer(customer_id)?;

        if quantity == 0 {
            return Err(LedgerError::InvalidQuantity);
        }
        validate_stock(product, quantity).map_err(|e| LedgerError::from_stock(&product.name, e))?;

        let sale = Sale::new(product, buyer, quantity);

        let product = self
            .repo
            .get_product_mut(product_id)
            .ok_or_else(|| LedgerError::ProductNotFound(product_id.to_string()))?;
        product.stock -= quantity;
        info!(
            product = %sale.product_name,
            buyer = %sale.buyer_name,
            quantity,
            total = sale.total,
            stock = product.stock,
            "sale recorded"
        );

        self.repo.append_sale(sale.clone());
        Ok(sale)
    }

    /// Sell by product name (ignoring case) and buyer phone or name.
    pub fn record_sale_by_name(
        &mut self,
        product_name: &str,
        buyer: &str,
        quantity: u32,
    ) -> Result<Sale, LedgerError> {
        let product_id = self
            .find_product(product_name)
            .map(|p| p.id)
            .ok_or_else(|| LedgerError::ProductNotFound(product_name.trim().to_string()))?;
        let customer_id = self
            .find_customer(buyer)
            .map(|c| c.id)
            .ok_or_else(|| LedgerError::CustomerNotFound(buyer.trim().to_string()))?;

        self.record_sale(product_id, customer_id, quantity)
    }

    /// All sales in recording order.
    pub fn sales(&self) -> &[Sale] {
        self.repo.list_sales()
    }

    // ========================
    // Reporting
    // ========================

    pub fn compute_report(&self) -> SalesReport {
        SalesReport::from_sales(self.repo.list_sales())
    }
}

fn check_position(collection: &'static str, index: usize, len: usize) -> Result<(), LedgerError> {
    if len == 0 {
        return Err(LedgerError::EmptyCollection(collection));
    }
    if index >= len {
        return Err(LedgerError::IndexOutOfRange {
            collection,
            index,
            len,
        });
    }
    Ok(())
}
