use super::ticket::Ticket;

/// Supplies the tickets the machine is asked to collect payment for.
pub trait TicketIssuer: Send {
    fn issue(&mut self, number: u32) -> Ticket;
}

pub type TicketIssuerBox = Box<dyn TicketIssuer>;
