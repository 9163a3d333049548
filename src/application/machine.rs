use crate::domain::amount::Amount;
use crate::domain::decompose::{decompose, decompose_from};
use crate::domain::denomination::Denomination;
use crate::domain::inventory::CoinInventory;
use crate::domain::ticket::{Ticket, validate_price};
use crate::error::{PaymentError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Total value a machine is seeded with when none is configured.
pub const DEFAULT_INITIAL_AMOUNT: i64 = 19995;

/// Where the machine is in the payment lifecycle of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Collecting,
    Reconciling,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Collecting => "collecting",
            SessionState::Reconciling => "reconciling",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Default)]
enum Session {
    #[default]
    Idle,
    Collecting(Ticket),
    Reconciling(Ticket),
}

impl Session {
    fn state(&self) -> SessionState {
        match self {
            Session::Idle => SessionState::Idle,
            Session::Collecting(_) => SessionState::Collecting,
            Session::Reconciling(_) => SessionState::Reconciling,
        }
    }

    fn ticket(&self) -> Option<&Ticket> {
        match self {
            Session::Idle => None,
            Session::Collecting(ticket) | Session::Reconciling(ticket) => Some(ticket),
        }
    }
}

/// A point-in-time view of the machine, suitable for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct MachineReport {
    pub state: SessionState,
    pub stock: CoinInventory,
    pub stock_total: Amount,
    pub closed_tickets: Vec<Ticket>,
}

/// A coin-operated payment terminal.
///
/// Owns three inventories: `stock` (coins the machine holds), `tendered`
/// (coins fed in for the ongoing payment, not yet part of stock) and `change`
/// (coins drawn from stock to be returned for the ongoing payment). At most
/// one payment is ongoing at a time.
#[derive(Debug)]
pub struct PaymentMachine {
    stock: CoinInventory,
    tendered: CoinInventory,
    change: CoinInventory,
    session: Session,
    closed: BTreeMap<u32, Ticket>,
}

impl PaymentMachine {
    /// Creates a machine whose stock is the greedy decomposition of `initial_amount`.
    pub fn new(initial_amount: Amount) -> Result<Self> {
        Ok(Self::with_stock(decompose(initial_amount)?))
    }

    /// Creates an idle machine holding exactly `stock`.
    ///
    /// # Arguments
    ///
    /// * `stock` - The coins the machine starts with. Zero entries are kept.
    pub fn with_stock(stock: CoinInventory) -> Self {
        Self {
            stock,
            tendered: CoinInventory::new(),
            change: CoinInventory::new(),
            session: Session::Idle,
            closed: BTreeMap::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn has_any_available_coins(&self) -> bool {
        !self.stock.is_empty()
    }

    pub fn has_ongoing_payment(&self) -> bool {
        self.session.ticket().is_some()
    }

    pub fn is_ticket_processed(&self, number: u32) -> bool {
        self.closed.contains_key(&number)
    }

    pub fn active_ticket(&self) -> Option<&Ticket> {
        self.session.ticket()
    }

    /// Tickets whose payment has been closed, ordered by number.
    pub fn closed_tickets(&self) -> impl Iterator<Item = &Ticket> {
        self.closed.values()
    }

    pub fn stock(&self) -> &CoinInventory {
        &self.stock
    }

    pub fn tendered(&self) -> &CoinInventory {
        &self.tendered
    }

    pub fn change(&self) -> &CoinInventory {
        &self.change
    }

    pub fn stock_total(&self) -> Amount {
        self.stock.total_value()
    }

    pub fn tendered_total(&self) -> Amount {
        self.tendered.total_value()
    }

    pub fn change_total(&self) -> Amount {
        self.change.total_value()
    }

    /// Tendered total minus the ticket price. Negative while underpaid.
    pub fn change_due(&self) -> Result<Amount> {
        let ticket = self
            .session
            .ticket()
            .ok_or(PaymentError::NoOngoingPayment)?;
        self.tendered_total()
            .checked_sub(ticket.price)
            .ok_or(PaymentError::InvalidPrice(ticket.price))
    }

    pub fn is_payment_sufficient(&self) -> bool {
        self.change_due().is_ok_and(|due| !due.is_negative())
    }

    /// Opens a payment session for `ticket`.
    ///
    /// # Arguments
    ///
    /// * `ticket` - An unpaid ticket whose price passes [`validate_price`].
    ///   Numbers of closed tickets are refused.
    pub fn start_payment(&mut self, ticket: Ticket) -> Result<()> {
        if let Some(active) = self.session.ticket() {
            return Err(PaymentError::PaymentInProgress(active.number));
        }
        if ticket.is_paid() || self.is_ticket_processed(ticket.number) {
            return Err(PaymentError::TicketAlreadyProcessed(ticket.number));
        }
        validate_price(ticket.price)?;

        self.session = Session::Collecting(ticket);
        Ok(())
    }

    pub fn add_coin(&mut self, denomination: Denomination) -> Result<()> {
        match self.session.state() {
            SessionState::Idle => Err(PaymentError::NoOngoingPayment),
            SessionState::Reconciling => Err(PaymentError::InvalidTransition {
                operation: "add a coin",
                state: SessionState::Reconciling,
            }),
            SessionState::Collecting => {
                self.tendered.add(denomination, 1);
                Ok(())
            }
        }
    }

    /// Draws the change due from stock into the change inventory.
    ///
    /// On failure the machine stays in `Collecting` with stock untouched, so
    /// more coins can be added or the payment cancelled.
    pub fn compute_change(&mut self) -> Result<&CoinInventory> {
        match self.session.state() {
            SessionState::Idle => return Err(PaymentError::NoOngoingPayment),
            SessionState::Reconciling => return Err(PaymentError::ChangeAlreadyComputed),
            SessionState::Collecting => {}
        }
        if !self.change.is_empty() {
            return Err(PaymentError::ChangeAlreadyComputed);
        }

        let due = self.change_due()?;
        self.change = decompose_from(due, &mut self.stock)?;

        if let Session::Collecting(ticket) = std::mem::take(&mut self.session) {
            self.session = Session::Reconciling(ticket);
        }
        Ok(&self.change)
    }

    /// Finalizes the ongoing payment and returns the settled ticket.
    ///
    /// The ticket's change is whatever the change inventory holds, so a payment
    /// closed without `compute_change` returns no change.
    pub fn close(&mut self) -> Result<Ticket> {
        let mut ticket = match std::mem::take(&mut self.session) {
            Session::Idle => return Err(PaymentError::NoOngoingPayment),
            Session::Collecting(ticket) | Session::Reconciling(ticket) => ticket,
        };

        let settled = ticket.settle(self.change.total_value());
        debug_assert!(settled, "ticket #{} settled twice", ticket.number);
        self.closed.insert(ticket.number, ticket.clone());

        self.stock.merge(&mut self.tendered);
        self.change.clear();
        Ok(ticket)
    }

    /// Abandons the ongoing payment, returning the released ticket.
    ///
    /// Tendered coins are handed back to the payer and leave the machine's
    /// accounting. Change already drawn was never dispensed and goes back to
    /// stock. Cancelling while idle does nothing.
    pub fn cancel(&mut self) -> Option<Ticket> {
        let ticket = match std::mem::take(&mut self.session) {
            Session::Idle => return None,
            Session::Collecting(ticket) | Session::Reconciling(ticket) => ticket,
        };

        self.tendered.clear();
        self.stock.merge(&mut self.change);
        Some(ticket)
    }

    /// Computes the change and closes the payment in one step.
    pub fn execute_payment(&mut self) -> Result<Ticket> {
        self.compute_change()?;
        self.close()
    }

    pub fn report(&self) -> MachineReport {
        MachineReport {
            state: self.state(),
            stock: self.stock.clone(),
            stock_total: self.stock_total(),
            closed_tickets: self.closed.values().cloned().collect(),
        }
    }
}
