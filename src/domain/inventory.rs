use super::amount::Amount;
use super::denomination::Denomination;
use crate::error::{PaymentError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A count of coins per denomination.
///
/// Entries are created on first insertion and are kept at zero when their
/// last coin is removed. An absent entry and a zero entry mean the same thing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoinInventory {
    coins: BTreeMap<Denomination, u64>,
}

impl CoinInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of `face_value * count` over all entries, saturating at `i64::MAX`.
    pub fn total_value(&self) -> Amount {
        Amount::new(self.coins.iter().fold(0i64, |total, (d, &count)| {
            let count = i64::try_from(count).unwrap_or(i64::MAX);
            total.saturating_add(i64::from(d.face_value()).saturating_mul(count))
        }))
    }

    pub fn count(&self, denomination: Denomination) -> u64 {
        self.coins.get(&denomination).copied().unwrap_or(0)
    }

    /// Total number of coins regardless of denomination, saturating at `u64::MAX`.
    pub fn coin_count(&self) -> u64 {
        self.coins
            .values()
            .fold(0u64, |total, &count| total.saturating_add(count))
    }

    /// Adds `pieces` coins of `denomination`. Counts saturate at `u64::MAX`.
    pub fn add(&mut self, denomination: Denomination, pieces: u64) {
        let count = self.coins.entry(denomination).or_insert(0);
        *count = count.saturating_add(pieces);
    }

    /// Removes a single coin.
    pub fn remove(&mut self, denomination: Denomination) -> Result<()> {
        match self.coins.get_mut(&denomination) {
            Some(count) if *count > 0 => {
                *count -= 1;
                Ok(())
            }
            _ => Err(PaymentError::DenominationExhausted(denomination)),
        }
    }

    /// Removes every coin of `plan` or, if any denomination is short, none of them.
    pub fn withdraw(&mut self, plan: &CoinInventory) -> Result<()> {
        if let Some((&short, _)) = plan
            .coins
            .iter()
            .find(|&(&d, &needed)| self.count(d) < needed)
        {
            return Err(PaymentError::DenominationExhausted(short));
        }

        for (&d, &needed) in &plan.coins {
            if let Some(count) = self.coins.get_mut(&d) {
                *count -= needed;
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.coins.values().all(|count| *count == 0)
    }

    /// Moves every coin of `other` into this inventory, leaving `other` empty.
    pub fn merge(&mut self, other: &mut CoinInventory) {
        for (d, count) in std::mem::take(&mut other.coins) {
            self.add(d, count);
        }
    }

    pub fn clear(&mut self) {
        self.coins.clear();
    }

    /// Entries largest-first, including those at zero.
    pub fn iter(&self) -> impl Iterator<Item = (Denomination, u64)> + '_ {
        self.coins.iter().map(|(d, count)| (*d, *count))
    }
}

impl PartialEq for CoinInventory {
    fn eq(&self, other: &Self) -> bool {
        Denomination::ALL
            .into_iter()
            .all(|d| self.count(d) == other.count(d))
    }
}

impl Eq for CoinInventory {}

impl FromIterator<(Denomination, u64)> for CoinInventory {
    fn from_iter<I: IntoIterator<Item = (Denomination, u64)>>(iter: I) -> Self {
        let mut inventory = CoinInventory::new();
        for (d, pieces) in iter {
            inventory.add(d, pieces);
        }
        inventory
    }
}
