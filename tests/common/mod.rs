// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::io::Cursor;

use anyhow::Result;
use grocer::application::{AddProductOutcome, Ledger};
use grocer::cli::{Shell, ShellOptions};
use grocer::domain::{Customer, Product};

/// Helper to add a product that must not already exist
pub fn add_new_product(ledger: &mut Ledger, name: &str, price: f64, stock: u32) -> Result<Product> {
    match ledger.try_add_product(name, price, stock)? {
        AddProductOutcome::Created(product) => Ok(product),
        AddProductOutcome::Duplicate { existing } => {
            anyhow::bail!("product '{}' already exists", existing.name)
        }
    }
}

/// Test fixture: standard catalog and customers
pub struct StandardShop;

impl StandardShop {
    /// Rice, Oil and Sugar in the catalog
    pub fn create_catalog(ledger: &mut Ledger) -> Result<Vec<Product>> {
        Ok(vec![
            add_new_product(ledger, "Rice", 50.0, 10)?,
            add_new_product(ledger, "Oil", 100.0, 5)?,
            add_new_product(ledger, "Sugar", 80.0, 4)?,
        ])
    }

    /// Abebe and Almaz as registered customers
    pub fn create_customers(ledger: &mut Ledger) -> Result<Vec<Customer>> {
        Ok(vec![
            ledger.add_customer("Abebe", "0911")?,
            ledger.add_customer("Almaz", "0922")?,
        ])
    }

    pub fn create(ledger: &mut Ledger) -> Result<(Vec<Product>, Vec<Customer>)> {
        let products = Self::create_catalog(ledger)?;
        let customers = Self::create_customers(ledger)?;
        Ok((products, customers))
    }
}

/// Run a shell script against a fresh ledger, returning the ledger and everything printed
pub fn run_script(script: &str, options: ShellOptions) -> Result<(Ledger, String)> {
    let mut shell = Shell::new(Ledger::new(), Cursor::new(script.to_string()), Vec::new(), options);
    shell.run()?;
    let (ledger, out) = shell.into_parts();
    Ok((ledger, String::from_utf8(out)?))
}
