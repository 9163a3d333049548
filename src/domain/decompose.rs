//! Greedy decomposition of an amount into coins.
//!
//! The scan walks the denomination table largest-first and takes as many coins
//! of each denomination as still fit before moving to the next one. Every face
//! value is a multiple of the minimum, so a single pass covers any non-negative
//! multiple of the minimum denomination exactly.

use super::amount::Amount;
use super::denomination::Denomination;
use super::inventory::CoinInventory;
use crate::error::{PaymentError, Result};

fn validate(amount: Amount) -> Result<()> {
    if amount.is_negative() || !amount.is_multiple_of(Denomination::min_face_value()) {
        return Err(PaymentError::InvalidAmount(amount));
    }
    Ok(())
}

/// Decomposes `amount` into coins without any supply constraint.
pub fn decompose(amount: Amount) -> Result<CoinInventory> {
    validate(amount)?;

    let mut coins = CoinInventory::new();
    let mut remaining = amount.value();

    for d in Denomination::ALL {
        let value = i64::from(d.face_value());
        let pieces = remaining / value;
        if pieces > 0 {
            coins.add(d, pieces as u64);
            remaining -= pieces * value;
        }
    }
    debug_assert_eq!(remaining, 0);

    Ok(coins)
}

/// Decomposes `amount` into coins drawn from `stock`.
///
/// Fails with `DenominationExhausted` if `stock` cannot supply a coin of the
/// decomposition; in that case `stock` is left unchanged.
pub fn decompose_from(amount: Amount, stock: &mut CoinInventory) -> Result<CoinInventory> {
    let coins = decompose(amount)?;
    stock.withdraw(&coins)?;
    Ok(coins)
}
