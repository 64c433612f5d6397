use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::Ledger;
use crate::domain::{Amount, Customer, Product, Sale, format_amount};

/// Point-in-time dump of the ledger's in-memory state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
    pub sales: Vec<Sale>,
    pub revenue: Amount,
}

/// Writes ledger contents out as CSV or JSON. Export only: nothing is read back.
pub struct Exporter<'a> {
    ledger: &'a Ledger,
}

impl<'a> Exporter<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    /// Export the sale history to CSV, in recording order
    pub fn export_sales_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["product", "quantity", "total", "buyer", "recorded_at"])?;

        let mut count = 0;
        for sale in self.ledger.sales() {
            csv_writer.write_record([
                sale.product_name.clone(),
                sale.quantity.to_string(),
                format_amount(sale.total),
                sale.buyer_name.clone(),
                sale.recorded_at.to_rfc3339(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the catalog to CSV
    pub fn export_products_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["id", "name", "price", "stock"])?;

        let mut count = 0;
        for product in self.ledger.products() {
            csv_writer.write_record([
                product.id.to_string(),
                product.name.clone(),
                format_amount(product.price),
                product.stock.to_string(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    pub fn export_customers_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["id", "name", "phone"])?;

        let mut count = 0;
        for customer in self.ledger.customers() {
            csv_writer.write_record([
                customer.id.to_string(),
                customer.name.clone(),
                customer.phone.clone(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export everything as a pretty-printed JSON snapshot
    pub fn export_full_json<W: Write>(&self, mut writer: W) -> Result<LedgerSnapshot> {
        let snapshot = LedgerSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            products: self.ledger.products().to_vec(),
            customers: self.ledger.customers().to_vec(),
            sales: self.ledger.sales().to_vec(),
            revenue: self.ledger.compute_report().overall_revenue,
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }
}
