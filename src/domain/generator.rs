use super::order::{Amount, OrderRecord};
use chrono::{Local, NaiveTime, SubsecRound};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Customers the generator draws from.
pub const CUSTOMERS: [&str; 7] = [
    "Alice", "Bob", "Charlie", "Diana", "Mahi", "Lalitha", "Sandhya",
];

const ID_PREFIX: char = 'O';
const RANDOM_ID_MIN: u32 = 1000;
const RANDOM_ID_MAX: u32 = 9999;
// Amount bounds expressed in cents, both inclusive.
const MIN_CENTS: i64 = 5_000;
const MAX_CENTS: i64 = 50_000;

/// How generated orders are identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    /// `O1000`..=`O9999`, drawn at random. Collisions are possible.
    #[default]
    Random,
    /// `O1`, `O2`, ... counted per generator.
    Sequential,
}

/// Produces synthetic orders from a random source and the local clock.
pub struct OrderGenerator<R: Rng = StdRng> {
    rng: R,
    ids: IdStrategy,
    next_seq: u64,
}

impl OrderGenerator<StdRng> {
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// A generator whose sequence of orders is fully determined by `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> OrderGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            ids: IdStrategy::default(),
            next_seq: 1,
        }
    }

    pub fn with_id_strategy(mut self, ids: IdStrategy) -> Self {
        self.ids = ids;
        self
    }

    /// Generates an order stamped with the current local time.
    pub fn generate(&mut self) -> OrderRecord {
        self.generate_at(Local::now().time())
    }

    /// Generates an order stamped with `time`, truncated to whole seconds.
    pub fn generate_at(&mut self, time: NaiveTime) -> OrderRecord {
        let order_id = self.next_id();
        let customer = CUSTOMERS[self.rng.gen_range(0..CUSTOMERS.len())];
        let amount = self.next_amount();

        OrderRecord::new(order_id, customer, amount, time.trunc_subsecs(0))
    }

    fn next_id(&mut self) -> String {
        match self.ids {
            IdStrategy::Random => {
                let n = self.rng.gen_range(RANDOM_ID_MIN..=RANDOM_ID_MAX);
                format!("{}{}", ID_PREFIX, n)
            }
            IdStrategy::Sequential => {
                let n = self.next_seq;
                self.next_seq += 1;
                format!("{}{}", ID_PREFIX, n)
            }
        }
    }

    fn next_amount(&mut self) -> Amount {
        Amount::from_cents_in_range(self.rng.gen_range(MIN_CENTS..=MAX_CENTS))
    }
}
