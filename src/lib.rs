//! # Wallet Core
//!
//! The cash-handling core of an accessible wallet for visually-impaired
//! users: a denomination-count ledger with derived balance and transaction
//! history, a recognition-confirmation pipeline that keeps noisy classifier
//! output behind an explicit user confirmation, and a greedy change
//! calculator for the payment workflow.
//!
//! ## Features
//!
//! - **Denomination catalog**: the closed set of euro face values, with the
//!   display-formatting contract shared across the whole system
//! - **Cash ledger**: per-denomination counts, derived total balance,
//!   newest-first transaction history, and savings-goal tracking
//! - **Recognition pipeline**: confidence gate plus a scan session that
//!   commits to the ledger only on explicit confirmation
//! - **Change calculator**: greedy breakdown over the catalog, exact to the
//!   cent
//! - **Storage abstraction**: trait-based persistence with best-effort saves
//!   and empty-ledger fallback on load
//!
//! ## Quick Start
//!
//! ```rust
//! use bigdecimal::BigDecimal;
//! use wallet_core::utils::MemoryStore;
//! use wallet_core::{Wallet, WalletResult};
//!
//! async fn demo() -> WalletResult<()> {
//!     let mut wallet = Wallet::new(MemoryStore::new());
//!     let fifty: BigDecimal = "50".parse().unwrap();
//!     wallet.add_money(&fifty).await?;
//!     assert_eq!(wallet.balance(), &fifty);
//!     Ok(())
//! }
//! ```

pub mod change;
pub mod denomination;
pub mod recognition;
pub mod traits;
pub mod types;
pub mod utils;
pub mod wallet;

// Re-export commonly used types
pub use change::*;
pub use denomination::*;
pub use recognition::*;
pub use traits::*;
pub use types::*;
pub use wallet::*;
