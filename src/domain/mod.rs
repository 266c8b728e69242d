//! Domain types shared by the processor and the storage adapters.

pub mod account;
pub mod ports;
pub mod transaction;
