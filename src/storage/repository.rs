use crate::domain::{Customer, CustomerId, Product, ProductId, Sale};

/// Snapshot of collection sizes, logged when a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub product_count: usize,
    pub customer_count: usize,
    pub sale_count: usize,
}

/// In-memory repository for products, customers and sales.
///
/// Each collection keeps insertion order. Sales are append-only: there is no
/// way to remove or modify one once recorded.
#[derive(Debug, Default)]
pub struct Repository {
    products: Vec<Product>,
    customers: Vec<Customer>,
    sales: Vec<Sale>,
}

impl Repository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            product_count: self.products.len(),
            customer_count: self.customers.len(),
            sale_count: self.sales.len(),
        }
    }

    // ========================
    // Product operations
    // ========================

    pub fn insert_product(&mut self, product: Product) {
        self.products.push(product);
    }

    pub fn get_product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn get_product_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    pub fn product_at(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    /// Remove a product, returning it if it existed.
    pub fn remove_product(&mut self, id: ProductId) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id == id)?;
        Some(self.products.remove(index))
    }

    pub fn list_products(&self) -> &[Product] {
        &self.products
    }

    // ========================
    // Customer operations
    // ========================

    pub fn insert_customer(&mut self, customer: Customer) {
        self.customers.push(customer);
    }

    pub fn get_customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn customer_at(&self, index: usize) -> Option<&Customer> {
        self.customers.get(index)
    }

    /// Remove a customer, returning it if it existed.
    pub fn remove_customer(&mut self, id: CustomerId) -> Option<Customer> {
        let index = self.customers.iter().position(|c| c.id == id)?;
        Some(self.customers.remove(index))
    }

    pub fn list_customers(&self) -> &[Customer] {
        &self.customers
    }

    // ========================
    // Sale operations
    // ========================

    pub fn append_sale(&mut self, sale: Sale) {
        self.sales.push(sale);
    }

    pub fn list_sales(&self) -> &[Sale] {
        &self.sales
    }
}
