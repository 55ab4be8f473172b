//! Adapters between the wallet and the outside world.

pub mod csv;
