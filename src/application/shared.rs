use super::machine::{MachineReport, PaymentMachine};
use crate::domain::amount::Amount;
use crate::domain::denomination::Denomination;
use crate::domain::inventory::CoinInventory;
use crate::domain::ticket::Ticket;
use crate::error::Result;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// A payment machine shared between concurrent callers.
///
/// The whole machine is one critical section: a caller holds the lock from
/// `begin` until the returned [`SessionGuard`] is closed, cancelled or dropped.
/// Other callers wait for the session to end.
#[derive(Clone)]
pub struct SharedMachine {
    inner: Arc<Mutex<PaymentMachine>>,
}

impl SharedMachine {
    /// # Arguments
    ///
    /// * `machine` - The machine to share. It should be idle.
    pub fn new(machine: PaymentMachine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(machine)),
        }
    }

    /// Waits for exclusive access and starts a payment for `ticket`.
    pub async fn begin(&self, ticket: Ticket) -> Result<SessionGuard> {
        let mut machine = self.inner.clone().lock_owned().await;
        machine.start_payment(ticket)?;
        Ok(SessionGuard {
            machine,
            finished: false,
        })
    }

    /// Waits for any ongoing session to end before reading the stock.
    pub async fn has_any_available_coins(&self) -> bool {
        self.inner.lock().await.has_any_available_coins()
    }

    /// A report taken between sessions.
    pub async fn snapshot(&self) -> MachineReport {
        self.inner.lock().await.report()
    }
}

/// Exclusive handle on a machine with an ongoing payment.
///
/// Dropping the guard without closing it cancels the payment.
pub struct SessionGuard {
    machine: OwnedMutexGuard<PaymentMachine>,
    finished: bool,
}

impl SessionGuard {
    pub fn add_coin(&mut self, denomination: Denomination) -> Result<()> {
        self.machine.add_coin(denomination)
    }

    pub fn change_due(&self) -> Result<Amount> {
        self.machine.change_due()
    }

    pub fn tendered_total(&self) -> Amount {
        self.machine.tendered_total()
    }

    /// Draws the change due from stock and returns a copy of it.
    ///
    /// On failure the session stays open with stock untouched.
    pub fn compute_change(&mut self) -> Result<CoinInventory> {
        self.machine.compute_change().cloned()
    }

    /// Closes the payment and releases the lock. If closing fails the guard
    /// is dropped and the payment cancelled.
    pub fn close(mut self) -> Result<Ticket> {
        let ticket = self.machine.close()?;
        self.finished = true;
        Ok(ticket)
    }

    /// Cancels the payment and releases the lock.
    pub fn cancel(mut self) -> Option<Ticket> {
        self.finished = true;
        self.machine.cancel()
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if !self.finished {
            self.machine.cancel();
        }
    }
}
