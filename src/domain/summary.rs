use super::order::OrderRecord;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Sum of amounts per customer, recomputed from the full order sequence.
///
/// The mapping itself carries no order. Use [`CustomerTotals::ranked`] for
/// display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerTotals(HashMap<String, Decimal>);

/// One row of a ranked summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerTotal {
    pub customer: String,
    #[serde(serialize_with = "serialize_money")]
    pub total: Decimal,
}

fn serialize_money<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("{:.2}", value))
}

impl CustomerTotals {
    pub fn get(&self, customer: &str) -> Option<Decimal> {
        self.0.get(customer).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(customer, total)| (customer.as_str(), *total))
    }

    /// Totals sorted by amount descending, ties broken by customer name.
    pub fn ranked(&self) -> Vec<CustomerTotal> {
        let mut rows: Vec<CustomerTotal> = self
            .0
            .iter()
            .map(|(customer, total)| CustomerTotal {
                customer: customer.clone(),
                total: *total,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.customer.cmp(&b.customer))
        });
        rows
    }
}

impl Serialize for CustomerTotals {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.ranked().serialize(serializer)
    }
}

/// Groups `orders` by customer and sums their amounts, in sequence order.
pub fn aggregate(orders: &[OrderRecord]) -> CustomerTotals {
    let mut totals: HashMap<String, Decimal> = HashMap::new();
    for order in orders {
        *totals.entry(order.customer.clone()).or_insert(Decimal::ZERO) += order.amount.value();
    }
    CustomerTotals(totals)
}
