//! Adapters between the terminal and the outside world.

pub mod csv;
pub mod json;
