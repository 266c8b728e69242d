//! Application layer containing the transfer business rules.
//!
//! `TransferProcessor` implements the individual steps of a transfer against
//! an injected `AccountStore`, and `TransferHandler` chains them into the
//! single call the boundary layer uses.

pub mod handler;
pub mod processor;
