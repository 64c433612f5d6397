pub mod application;
pub mod cli;
pub mod domain;
pub mod io;
pub mod logging;
pub mod storage;

pub use application::{Ledger, LedgerError};
pub use domain::*;
pub use storage::Repository;
