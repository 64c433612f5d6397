use std::fmt;

/// Prices and sale totals are plain reals. Totals are summed in recording order,
/// so rounding is deterministic for a given sale history.
pub type Amount = f64;

/// Format an amount for display, always keeping one fractional digit for whole values.
/// Example: 200.0 -> "200.0", 12.5 -> "12.5", 0.1 + 0.2 -> "0.30000000000000004"
pub fn format_amount(amount: Amount) -> String {
    if amount.is_finite() && amount.fract() == 0.0 {
        format!("{:.1}", amount)
    } else {
        format!("{}", amount)
    }
}

/// Parse a unit price. Must be a finite, non-negative real.
/// Example: "50" -> 50.0, "12.75" -> 12.75
pub fn parse_price(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    let price: Amount = input.parse().map_err(|_| ParseAmountError::InvalidFormat)?;
    if !price.is_finite() {
        return Err(ParseAmountError::InvalidFormat);
    }
    if price < 0.0 {
        return Err(ParseAmountError::Negative);
    }
    // Normalizes "-0" to 0.0
    Ok(price.abs())
}

/// Parse a stock count. Zero is allowed.
pub fn parse_stock(input: &str) -> Result<u32, ParseAmountError> {
    parse_count(input)
}

/// Parse a sale quantity. Must be a positive integer.
pub fn parse_quantity(input: &str) -> Result<u32, ParseAmountError> {
    match parse_count(input)? {
        0 => Err(ParseAmountError::NotPositive),
        quantity => Ok(quantity),
    }
}

fn parse_count(input: &str) -> Result<u32, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    match input.parse::<u32>() {
        Ok(count) => Ok(count),
        // A well-formed negative integer gets its own error so callers can say so
        Err(_) if input.starts_with('-') && input[1..].parse::<u64>().is_ok() => {
            Err(ParseAmountError::Negative)
        }
        Err(_) => Err(ParseAmountError::InvalidFormat),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat,
    Negative,
    NotPositive,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "value is empty"),
            ParseAmountError::InvalidFormat => write!(f, "invalid number format"),
            ParseAmountError::Negative => write!(f, "value must not be negative"),
            ParseAmountError::NotPositive => write!(f, "value must be a positive integer"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
