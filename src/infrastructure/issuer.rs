use crate::domain::amount::Amount;
use crate::domain::ports::TicketIssuer;
use crate::domain::ticket::{Ticket, validate_price};
use crate::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Price step of randomly issued tickets.
pub const PRICE_STEP: i64 = 50;
/// Largest multiple of `PRICE_STEP` a random ticket can cost.
pub const MAX_PRICE_STEPS: i64 = 10;

/// Issues tickets priced at a random multiple of 50, from 50 up to 500.
pub struct RandomPriceIssuer {
    rng: StdRng,
}

impl RandomPriceIssuer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// A reproducible issuer: the same seed yields the same prices.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPriceIssuer {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketIssuer for RandomPriceIssuer {
    fn issue(&mut self, number: u32) -> Ticket {
        let steps = self.rng.gen_range(1..=MAX_PRICE_STEPS);
        Ticket::new(number, Amount::new(steps * PRICE_STEP))
    }
}

/// Issues every ticket at the same price.
pub struct FixedPriceIssuer {
    price: Amount,
}

impl FixedPriceIssuer {
    /// Fails with `InvalidPrice` if tickets at `price` could not be paid.
    pub fn new(price: Amount) -> Result<Self> {
        validate_price(price)?;
        Ok(Self { price })
    }
}

impl TicketIssuer for FixedPriceIssuer {
    fn issue(&mut self, number: u32) -> Ticket {
        Ticket::new(number, self.price)
    }
}
