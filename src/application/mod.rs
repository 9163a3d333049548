//! Application layer: the payment machine and the drivers around it.
//!
//! `PaymentMachine` is the single-threaded core. `SharedMachine` serializes
//! whole sessions for concurrent callers, and `Terminal` runs operator
//! commands against a machine.

pub mod machine;
pub mod shared;
pub mod terminal;
