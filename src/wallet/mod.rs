//! Wallet module containing the cash ledger and its event stream

pub mod core;
pub mod events;

pub use self::core::*;
pub use self::events::*;
