use crate::domain::{Amount, parse_price, parse_quantity, parse_stock};

use super::LedgerError;

/// Raw text entered for a new product.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub stock: String,
}

/// A product entry that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: Amount,
    pub stock: u32,
}

impl ProductForm {
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        stock: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            stock: stock.into(),
        }
    }

    /// Validate the form. Empty fields are reported before number format problems.
    pub fn parse(&self) -> Result<NewProduct, LedgerError> {
        let name = require("name", &self.name)?;
        require("price", &self.price)?;
        require("stock", &self.stock)?;

        let price =
            parse_price(&self.price).map_err(|e| LedgerError::from_parse("price", &self.price, e))?;
        let stock =
            parse_stock(&self.stock).map_err(|e| LedgerError::from_parse("stock", &self.stock, e))?;

        Ok(NewProduct { name, price, stock })
    }
}

/// Raw text entered for a new customer.
#[derive(Debug, Clone, Default)]
pub struct CustomerForm {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
}

impl CustomerForm {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }

    pub fn parse(&self) -> Result<NewCustomer, LedgerError> {
        Ok(NewCustomer {
            name: require("name", &self.name)?,
            phone: require("phone", &self.phone)?,
        })
    }
}

/// Parse the quantity field of a sale.
pub fn parse_sale_quantity(input: &str) -> Result<u32, LedgerError> {
    parse_quantity(input).map_err(|e| LedgerError::from_parse("quantity", input, e))
}

/// Trim a required field, failing if nothing is left.
pub(crate) fn require(field: &'static str, value: &str) -> Result<String, LedgerError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(LedgerError::EmptyField(field));
    }
    Ok(value.to_string())
}
