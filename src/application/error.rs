use thiserror::Error;

use crate::domain::{ParseAmountError, StockError};

/// Broad error categories. The presentation layer picks its message per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or missing input
    Validation,
    /// Uniqueness violation
    Conflict,
    /// Index, id or name does not resolve to an entry
    NotFound,
    /// Sale quantity exceeds available stock
    InsufficientStock,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Field '{0}' must not be empty")]
    EmptyField(&'static str),

    #[error("Invalid number for '{field}': '{value}' ({reason})")]
    InvalidNumber {
        field: &'static str,
        value: String,
        reason: ParseAmountError,
    },

    #[error("Price must be a finite, non-negative number (got {0})")]
    InvalidPrice(f64),

    #[error("Quantity must be a positive integer")]
    InvalidQuantity,

    #[error("Stock of '{product}' would overflow ({current} + {added})")]
    StockOverflow {
        product: String,
        current: u32,
        added: u32,
    },

    #[error("Phone already registered: {0}")]
    PhoneAlreadyRegistered(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    #[error("No {0} to select from")]
    EmptyCollection(&'static str),

    #[error("No {collection} at index {index} (have {len})")]
    IndexOutOfRange {
        collection: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Not enough stock of '{product}': available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: u32,
        requested: u32,
    },
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::EmptyField(_)
            | LedgerError::InvalidNumber { .. }
            | LedgerError::InvalidPrice(_)
            | LedgerError::InvalidQuantity
            | LedgerError::StockOverflow { .. } => ErrorKind::Validation,
            LedgerError::PhoneAlreadyRegistered(_) => ErrorKind::Conflict,
            LedgerError::ProductNotFound(_)
            | LedgerError::CustomerNotFound(_)
            | LedgerError::EmptyCollection(_)
            | LedgerError::IndexOutOfRange { .. } => ErrorKind::NotFound,
            LedgerError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
        }
    }

    /// Map a parse failure on a named form field. Empty input keeps its own variant
    /// so callers can tell "fill all fields" apart from "bad number".
    pub fn from_parse(field: &'static str, value: &str, reason: ParseAmountError) -> Self {
        match reason {
            ParseAmountError::Empty => LedgerError::EmptyField(field),
            ParseAmountError::NotPositive => LedgerError::InvalidQuantity,
            reason => LedgerError::InvalidNumber {
                field,
                value: value.trim().to_string(),
                reason,
            },
        }
    }

    pub(crate) fn from_stock(product: &str, err: StockError) -> Self {
        match err {
            StockError::Insufficient {
                available,
                requested,
            } => LedgerError::InsufficientStock {
                product: product.to_string(),
                available,
                requested,
            },
            StockError::Overflow { current, added } => LedgerError::StockOverflow {
                product: product.to_string(),
                current,
                added,
            },
        }
    }
}
