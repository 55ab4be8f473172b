//! Domain model of the wallet: money, accounts, payments and favorites, plus
//! the storage ports the application layer is written against.

pub mod account;
pub mod favorite;
pub mod payment;
pub mod ports;
