//! Collaborator abstractions at the system boundary

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use std::collections::HashMap;

use crate::denomination::Denomination;
use crate::types::{ImageHandle, RecognitionResult, Transaction, WalletResult};

/// Persistence abstraction for wallet state.
///
/// This trait allows the wallet core to work with any key/value backend.
/// Missing or undecodable data loads as `Ok(None)`; the wallet falls back to
/// empty defaults on `Err` as well. Saves are best-effort: each call must
/// complete or fail atomically, but the wallet tolerates a failed save.
#[async_trait]
pub trait WalletStore: Send + Sync {
    /// Load the denomination-count mapping
    async fn load_denominations(&self) -> WalletResult<Option<HashMap<Denomination, u32>>>;

    /// Save the denomination-count mapping
    async fn save_denominations(
        &mut self,
        denominations: &HashMap<Denomination, u32>,
    ) -> WalletResult<()>;

    /// Load the transaction history, newest first
    async fn load_history(&self) -> WalletResult<Option<Vec<Transaction>>>;

    /// Save the transaction history
    async fn save_history(&mut self, history: &[Transaction]) -> WalletResult<()>;

    /// Load the savings goal
    async fn load_goal(&self) -> WalletResult<Option<BigDecimal>>;

    /// Save the savings goal
    async fn save_goal(&mut self, goal: &BigDecimal) -> WalletResult<()>;
}

/// Banknote classifier boundary.
///
/// An untyped external collaborator: it produces a label string and a
/// confidence score, nothing more. The recognition gate owns the parsing.
#[async_trait]
pub trait BanknoteClassifier: Send + Sync {
    async fn classify(&self, frame: &ImageHandle) -> RecognitionResult;
}

/// Camera capture surface.
///
/// Hands out whatever frame is currently available; the core never blocks
/// waiting for one.
pub trait FrameSource: Send + Sync {
    fn latest_frame(&self) -> Option<ImageHandle>;
}

/// Speech, haptic, or on-screen announcement sink.
///
/// Fire-and-forget: the core never awaits delivery or checks for success.
pub trait NotificationSink: Send + Sync {
    fn announce(&self, text: &str);
}
