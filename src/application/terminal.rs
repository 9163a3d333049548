use super::machine::PaymentMachine;
use crate::domain::amount::Amount;
use crate::domain::denomination::Denomination;
use crate::domain::ports::TicketIssuerBox;
use crate::domain::ticket::Ticket;
use crate::error::{PaymentError, Result};
use tracing::{debug, info, warn};

/// An operator instruction for the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start paying for a ticket. Without a price the ticket issuer sets one.
    Start { ticket: u32, price: Option<Amount> },
    /// Feed a coin, given as its face value token.
    Coin(String),
    Change,
    Close,
    /// Compute change and close.
    Pay,
    Cancel,
    Exit,
}

/// Whether the terminal keeps accepting commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// The payment of the given ticket was closed.
    Closed(u32),
    Exit,
    OutOfOrder,
}

/// A command that could not be executed.
#[derive(Debug)]
pub struct Rejection {
    /// 1-based position of the command in the input.
    pub position: usize,
    pub error: PaymentError,
}

/// Outcome of [`Terminal::run`].
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Commands executed without error.
    pub executed: usize,
    pub rejections: Vec<Rejection>,
    /// Numbers of the tickets closed during the run, in closing order.
    pub closed: Vec<u32>,
    pub out_of_order: bool,
}

/// Drives a payment machine from a stream of operator commands.
pub struct Terminal {
    machine: PaymentMachine,
    issuer: TicketIssuerBox,
}

impl Terminal {
    /// # Arguments
    ///
    /// * `machine` - The machine the commands act on.
    /// * `issuer` - Prices tickets whose `Start` command carries no price.
    pub fn new(machine: PaymentMachine, issuer: TicketIssuerBox) -> Self {
        Self { machine, issuer }
    }

    pub fn machine(&self) -> &PaymentMachine {
        &self.machine
    }

    pub fn into_machine(self) -> PaymentMachine {
        self.machine
    }

    /// Executes a single command against the machine.
    ///
    /// # Arguments
    ///
    /// * `command` - The operator instruction. A `Start` without a price takes
    ///   its ticket from the issuer; a `Start` on an empty stock is not executed
    ///   and yields `Step::OutOfOrder`.
    pub fn execute(&mut self, command: Command) -> Result<Step> {
        match command {
            Command::Start { ticket, price } => {
                if !self.machine.has_any_available_coins() {
                    warn!("Machine out of order (no available coins)");
                    return Ok(Step::OutOfOrder);
                }
                let ticket = match price {
                    Some(price) => Ticket::new(ticket, price),
                    None => self.issuer.issue(ticket),
                };
                info!(ticket = ticket.number, price = %ticket.price, "Payment started");
                self.machine.start_payment(ticket)?;
            }
            Command::Coin(token) => {
                let denomination: Denomination = token.parse()?;
                self.machine.add_coin(denomination)?;
                debug!(
                    coin = %denomination,
                    tendered = %self.machine.tendered_total(),
                    "Coin accepted"
                );
            }
            Command::Change => {
                let change = self.machine.compute_change()?.total_value();
                debug!(change = %change, "Change computed");
            }
            Command::Close => {
                let ticket = self.machine.close()?;
                return Ok(self.closed(&ticket));
            }
            Command::Pay => {
                let ticket = self.machine.execute_payment()?;
                return Ok(self.closed(&ticket));
            }
            Command::Cancel => {
                if let Some(ticket) = self.machine.cancel() {
                    info!(ticket = ticket.number, "Payment cancelled");
                }
            }
            Command::Exit => return Ok(Step::Exit),
        }
        Ok(Step::Continue)
    }

    /// Executes commands until the input ends, an `Exit` is read, or the
    /// machine runs out of coins. Failed commands are recorded and skipped.
    pub fn run<I>(&mut self, commands: I) -> RunSummary
    where
        I: IntoIterator<Item = Result<Command>>,
    {
        let mut summary = RunSummary::default();

        for (index, command) in commands.into_iter().enumerate() {
            let position = index + 1;
            match command.and_then(|command| self.execute(command)) {
                Ok(Step::Continue) => summary.executed += 1,
                Ok(Step::Closed(number)) => {
                    summary.executed += 1;
                    summary.closed.push(number);
                }
                Ok(Step::Exit) => break,
                Ok(Step::OutOfOrder) => {
                    summary.out_of_order = true;
                    break;
                }
                Err(error) => {
                    warn!(position, %error, "Command rejected");
                    summary.rejections.push(Rejection { position, error });
                }
            }
        }

        summary
    }

    fn closed(&self, ticket: &Ticket) -> Step {
        info!(
            ticket = ticket.number,
            change = %ticket.change().unwrap_or_default(),
            stock = %self.machine.stock_total(),
            "Payment closed"
        );
        Step::Closed(ticket.number)
    }
}
