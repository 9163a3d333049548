use super::amount::Amount;
use super::denomination::Denomination;
use crate::error::{PaymentError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Highest price a ticket may carry.
pub const MAX_PRICE: Amount = Amount(1_000_000_000);

/// Checks that `price` is payable in coins: positive, a multiple of the
/// smallest face value and no greater than [`MAX_PRICE`].
pub fn validate_price(price: Amount) -> Result<()> {
    if price <= Amount::ZERO
        || price > MAX_PRICE
        || !price.is_multiple_of(Denomination::min_face_value())
    {
        return Err(PaymentError::InvalidPrice(price));
    }
    Ok(())
}

/// A ticket awaiting or having received payment.
///
/// Two tickets are the same ticket iff their numbers match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    /// The identity of the ticket.
    pub number: u32,
    /// When the ticket was issued.
    pub issued_at: DateTime<Utc>,
    /// The amount owed.
    pub price: Amount,
    /// The change returned, set when the payment is closed.
    change: Option<Amount>,
    paid: bool,
}

impl Ticket {
    pub fn new(number: u32, price: Amount) -> Self {
        Self::issued(number, price, Utc::now())
    }

    pub fn issued(number: u32, price: Amount, issued_at: DateTime<Utc>) -> Self {
        Self {
            number,
            issued_at,
            price,
            change: None,
            paid: false,
        }
    }

    pub fn change(&self) -> Option<Amount> {
        self.change
    }

    pub fn is_paid(&self) -> bool {
        self.paid
    }

    /// Marks the ticket paid with the given change. A paid ticket is never
    /// settled twice; returns `false` if it already was.
    pub fn settle(&mut self, change: Amount) -> bool {
        if self.paid {
            return false;
        }
        self.change = Some(change);
        self.paid = true;
        true
    }
}

impl PartialEq for Ticket {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl Eq for Ticket {}

impl Hash for Ticket {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.number.hash(state);
    }
}
