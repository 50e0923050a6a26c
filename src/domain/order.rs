use crate::error::AppError;
use chrono::NaiveTime;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest amount a single order may carry.
pub const MIN_AMOUNT: Decimal = dec!(50.00);
/// Largest amount a single order may carry.
pub const MAX_AMOUNT: Decimal = dec!(500.00);
/// Number of decimal places every amount is stored with.
pub const AMOUNT_SCALE: u32 = 2;

/// Represents the monetary value of a single order.
///
/// Amounts are bounded to `[MIN_AMOUNT, MAX_AMOUNT]` (inclusive) and are always
/// stored with exactly two decimal places, so sums over them never need
/// rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, AppError> {
        if value < MIN_AMOUNT || value > MAX_AMOUNT {
            return Err(AppError::ValidationError(format!(
                "Amount {} outside [{}, {}]",
                value, MIN_AMOUNT, MAX_AMOUNT
            )));
        }
        if value.normalize().scale() > AMOUNT_SCALE {
            return Err(AppError::ValidationError(format!(
                "Amount {} has more than {} decimal places",
                value, AMOUNT_SCALE
            )));
        }

        let mut value = value;
        value.rescale(AMOUNT_SCALE);
        Ok(Self(value))
    }

    /// Builds an amount from a whole number of cents.
    pub fn from_cents(cents: i64) -> Result<Self, AppError> {
        Self::new(Decimal::new(cents, AMOUNT_SCALE))
    }

    /// Builds an amount from cents already known to lie within bounds.
    pub(crate) fn from_cents_in_range(cents: i64) -> Self {
        debug_assert!((5_000..=50_000).contains(&cents));
        Self(Decimal::new(cents, AMOUNT_SCALE))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AppError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for Amount {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let decimal = Decimal::from_str(value.trim()).map_err(|e| {
            AppError::ValidationError(format!("Invalid amount '{}': {}", value, e))
        })?;
        Self::new(decimal)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.to_string()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// A single synthetic order.
///
/// Records are immutable once created; the engine only ever appends them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub customer: String,
    pub amount: Amount,
    /// Wall-clock time of creation, second precision.
    pub time: NaiveTime,
}

impl OrderRecord {
    pub fn new(
        order_id: impl Into<String>,
        customer: impl Into<String>,
        amount: Amount,
        time: NaiveTime,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            customer: customer.into(),
            amount,
            time,
        }
    }

    /// Checks the fields the amount type cannot guard on its own.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.order_id.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Order is missing an identifier".to_string(),
            ));
        }
        if self.customer.trim().is_empty() {
            return Err(AppError::ValidationError(format!(
                "Order {} is missing a customer",
                self.order_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn test_amount_bounds_are_inclusive() {
        assert!(Amount::new(dec!(50.00)).is_ok());
        assert!(Amount::new(dec!(500.00)).is_ok());
        assert!(matches!(
            Amount::new(dec!(49.99)),
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            Amount::new(dec!(500.01)),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_amount_precision() {
        assert!(Amount::new(dec!(123.456)).is_err());
        // Trailing zeros beyond two places carry no extra precision
        let amount = Amount::new(dec!(123.4500)).unwrap();
        assert_eq!(amount.value().scale(), 2);
        assert_eq!(amount.to_string(), "123.45");
    }

    #[test]
    fn test_amount_is_rescaled_to_cents() {
        let amount = Amount::new(dec!(100)).unwrap();
        assert_eq!(amount.to_string(), "100.00");
        assert_eq!(Amount::from_cents(5000).unwrap().value(), dec!(50.00));
    }

    #[test]
    fn test_amount_from_string() {
        assert_eq!(
            Amount::try_from(" 75.5 ".to_string()).unwrap().value(),
            dec!(75.50)
        );
        assert!(Amount::try_from("abc".to_string()).is_err());
        assert!(Amount::try_from("10".to_string()).is_err());
    }

    #[test]
    fn test_record_validation() {
        let amount = Amount::new(dec!(100)).unwrap();
        assert!(OrderRecord::new("O1", "Alice", amount, noon()).validate().is_ok());
        assert!(matches!(
            OrderRecord::new("O1", "  ", amount, noon()).validate(),
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            OrderRecord::new("", "Alice", amount, noon()).validate(),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_record_json_shape() {
        let record = OrderRecord::new("O1234", "Bob", Amount::new(dec!(99.9)).unwrap(), noon());
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"order_id":"O1234","customer":"Bob","amount":"99.90","time":"12:00:00"}"#
        );
    }
}
