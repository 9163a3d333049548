//! Domain layer: coins, amounts, tickets and the change-making algorithm.
//!
//! Nothing in here performs I/O or logs.

pub mod amount;
pub mod decompose;
pub mod denomination;
pub mod inventory;
pub mod ports;
pub mod ticket;
