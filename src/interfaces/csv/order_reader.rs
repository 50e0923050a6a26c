use crate::domain::order::OrderRecord;
use crate::error::{AppError, Result};
use chrono::SubsecRound;
use std::io::Read;

/// Reads orders from a CSV source with an `order_id,customer,amount,time` header.
///
/// This reader wraps `csv::Reader` and provides an iterator over `Result<OrderRecord>`.
/// Each row is parsed independently, so one bad row does not end the stream.
pub struct OrderReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OrderReader<R> {
    /// Creates a new `OrderReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes orders.
    ///
    /// Times are kept to whole seconds; any fractional part in the file is dropped.
    pub fn orders(self) -> impl Iterator<Item = Result<OrderRecord>> {
        self.reader.into_deserialize().map(|result| {
            result
                .map(|mut order: OrderRecord| {
                    order.time = order.time.trunc_subsecs(0);
                    order
                })
                .map_err(AppError::from)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_valid_stream() {
        let data = "order_id, customer, amount, time\nO1234, Alice, 100.00, 09:15:00\nO5678, Bob, 75.5, 09:15:01";
        let reader = OrderReader::new(data.as_bytes());
        let results: Vec<Result<OrderRecord>> = reader.orders().collect();

        assert_eq!(results.len(), 2);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.customer, "Alice");
        assert_eq!(first.amount.value(), dec!(100.00));
        assert_eq!(first.time.to_string(), "09:15:00");

        let second = results[1].as_ref().unwrap();
        assert_eq!(second.amount.to_string(), "75.50");
    }

    #[test]
    fn test_reader_malformed_lines() {
        let data = "order_id, customer, amount, time\n\
                    O1, Alice, lots, 09:15:00\n\
                    O2, Alice, 20.00, 09:15:00\n\
                    O3, Alice, 60.00, noon\n\
                    O4, Alice, 60.00, 09:15:00";
        let reader = OrderReader::new(data.as_bytes());
        let results: Vec<Result<OrderRecord>> = reader.orders().collect();

        assert_eq!(results.len(), 4);
        assert!(results[0].is_err());
        assert!(results[1].is_err());
        assert!(results[2].is_err());
        assert!(results[3].is_ok());
    }

    #[test]
    fn test_reader_drops_fractional_seconds() {
        let data = "order_id,customer,amount,time\nO1,Alice,60.00,09:15:00.750";
        let reader = OrderReader::new(data.as_bytes());
        let order = reader.orders().next().unwrap().unwrap();

        assert_eq!(order.time.to_string(), "09:15:00");
    }

    #[test]
    fn test_reader_passes_empty_customer_through() {
        // Parsing succeeds; the engine is the one that rejects it
        let data = "order_id, customer, amount, time\nO1, , 60.00, 09:15:00";
        let reader = OrderReader::new(data.as_bytes());
        let order = reader.orders().next().unwrap().unwrap();

        assert!(order.customer.is_empty());
        assert!(order.validate().is_err());
    }
}
