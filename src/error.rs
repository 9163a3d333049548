use crate::application::machine::SessionState;
use crate::domain::amount::Amount;
use crate::domain::denomination::Denomination;
use crate::domain::ticket::MAX_PRICE;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentError>;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Invalid amount: {0} is not a non-negative multiple of {min}", min = Denomination::MIN.face_value())]
    InvalidAmount(Amount),
    #[error("Invalid price: {0} is not a positive multiple of {min} up to {max}", min = Denomination::MIN.face_value(), max = MAX_PRICE)]
    InvalidPrice(Amount),
    #[error("Unknown denomination: {0:?}")]
    UnknownDenomination(String),
    #[error("Ticket #{0} has already been processed")]
    TicketAlreadyProcessed(u32),
    #[error("Denomination exhausted: no {0} coin left in stock")]
    DenominationExhausted(Denomination),
    #[error("Change has already been computed for the ongoing payment")]
    ChangeAlreadyComputed,
    #[error("No ongoing payment")]
    NoOngoingPayment,
    #[error("Payment for ticket #{0} is already in progress")]
    PaymentInProgress(u32),
    #[error("Cannot {operation} while {state}")]
    InvalidTransition {
        operation: &'static str,
        state: SessionState,
    },
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PaymentError {
    /// Errors caused by operator input that can be fixed by re-entering it.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PaymentError::UnknownDenomination(_)
                | PaymentError::InvalidPrice(_)
                | PaymentError::TicketAlreadyProcessed(_)
                | PaymentError::InvalidCommand(_)
        )
    }
}
