use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Amount, Sale, compute_revenue, format_amount};

/// Flat revenue report: one line per sale in recording order, then the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesReport {
    pub lines: Vec<SaleLine>,
    pub overall_revenue: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    pub buyer: String,
    pub quantity: u32,
    pub product: String,
    pub total: Amount,
}

impl From<&Sale> for SaleLine {
    fn from(sale: &Sale) -> Self {
        Self {
            buyer: sale.buyer_name.clone(),
            quantity: sale.quantity,
            product: sale.product_name.clone(),
            total: sale.total,
        }
    }
}

impl fmt::Display for SaleLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bought {} x {} = {}",
            self.buyer,
            self.quantity,
            self.product,
            format_amount(self.total)
        )
    }
}

impl SalesReport {
    pub fn from_sales(sales: &[Sale]) -> Self {
        Self {
            lines: sales.iter().map(SaleLine::from).collect(),
            overall_revenue: compute_revenue(sales),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Render as text, appending `currency` to every amount when it is non-empty.
    pub fn render(&self, currency: &str) -> String {
        let suffix = if currency.is_empty() {
            String::new()
        } else {
            format!(" {}", currency)
        };

        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&format!("{}{}\n", line, suffix));
        }
        out.push_str(&format!(
            "\nOverall Revenue: {}{}",
            format_amount(self.overall_revenue),
            suffix
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Customer, Product};

    #[test]
    fn test_sale_line_display() {
        let line = SaleLine {
            buyer: "Abebe".into(),
            quantity: 2,
            product: "Oil".into(),
            total: 200.0,
        };
        assert_eq!(line.to_string(), "Abebe bought 2 x Oil = 200.0");
    }

    #[test]
    fn test_empty_report() {
        let report = SalesReport::from_sales(&[]);
        assert!(report.is_empty());
        assert_eq!(report.overall_revenue, 0.0);
        assert_eq!(report.render(""), "\nOverall Revenue: 0.0");
    }

    #[test]
    fn test_render_with_currency() {
        let oil = Product::new("Oil", 100.0, 5);
        let rice = Product::new("Rice", 12.5, 5);
        let buyer = Customer::new("Abebe", "0911");
        let sales = vec![Sale::new(&oil, &buyer, 2), Sale::new(&rice, &buyer, 1)];

        let report = SalesReport::from_sales(&sales);
        assert_eq!(
            report.render("birr"),
            "Abebe bought 2 x Oil = 200.0 birr\n\
             Abebe bought 1 x Rice = 12.5 birr\n\
             \nOverall Revenue: 212.5 birr"
        );
    }
}
