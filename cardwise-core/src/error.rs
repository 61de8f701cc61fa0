use thiserror::Error;

use crate::category::SpendingCategory;

/// Caller contract violations. Data conditions (missing card, no cap, no
/// bonus, unclassified merchant) are not errors and never end up here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Amount must be a non-negative number, got {0}")]
    InvalidAmount(f64),

    #[error("Category label is empty")]
    EmptyCategory,

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Malformed cache key: {0:?}")]
    MalformedCacheKey(String),

    #[error("Too many selected categories: {got} (max {max})")]
    TooManySelections { got: usize, max: usize },

    #[error("Category {0} cannot be selected on this card")]
    NotSelectable(SpendingCategory),

    #[error("Card has no selectable bonus configuration: {0}")]
    NoSelectableConfig(String),

    #[error("Unknown wallet entry: {0}")]
    UnknownWalletEntry(String),

    #[error("Unknown card: {0}")]
    UnknownCard(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Reject negative, NaN and infinite amounts.
pub fn ensure_amount(amount: f64) -> Result<f64> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(amount)
    } else {
        Err(EngineError::InvalidAmount(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_and_nan_amounts() {
        assert_eq!(ensure_amount(0.0), Ok(0.0));
        assert_eq!(ensure_amount(12.5), Ok(12.5));
        assert_eq!(ensure_amount(-1.0), Err(EngineError::InvalidAmount(-1.0)));
        assert!(ensure_amount(f64::NAN).is_err());
        assert!(ensure_amount(f64::INFINITY).is_err());
    }

    #[test]
    fn messages_name_the_offending_value() {
        let e = EngineError::TooManySelections { got: 3, max: 2 };
        assert_eq!(e.to_string(), "Too many selected categories: 3 (max 2)");
        let e = EngineError::UnknownCategory("bowling".into());
        assert_eq!(e.to_string(), "Unknown category: bowling");
    }
}
