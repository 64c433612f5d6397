// Application layer: the ledger service, its error taxonomy, text-entry
// validation and the revenue report.

pub mod error;
pub mod input;
pub mod reporting;
pub mod service;

pub use error::*;
pub use input::{CustomerForm, NewCustomer, NewProduct, ProductForm, parse_sale_quantity};
pub use reporting::*;
pub use service::*;
