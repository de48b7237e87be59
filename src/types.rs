//! Core types and data structures for the wallet system

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Direction of a ledger mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Money added to the wallet
    Credit,
    /// Money removed from the wallet
    Debit,
}

/// Immutable record of one successful ledger mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier for the transaction
    pub id: Uuid,
    /// Face value that was added or removed
    pub amount: BigDecimal,
    /// Whether money was added or removed
    pub direction: Direction,
    /// When the mutation happened (UTC)
    pub timestamp: NaiveDateTime,
}

impl Transaction {
    /// Create a new transaction stamped with the current time.
    pub fn new(amount: BigDecimal, direction: Direction) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            direction,
            timestamp: chrono::Utc::now().naive_utc(),
        }
    }
}

/// One classifier output for one captured frame.
///
/// Transient: produced per classification call, consumed by the recognition
/// gate, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionResult {
    /// Raw label from the classifier, if anything was detected
    pub label: Option<String>,
    /// Classifier confidence in `0.0..=1.0`
    pub confidence: f32,
}

/// Opaque camera frame handle.
///
/// The core never inspects the pixel data; it only passes the handle through
/// to the classifier.
#[derive(Debug, Clone)]
pub struct ImageHandle(Arc<[u8]>);

impl ImageHandle {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Errors that can occur in the wallet system
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("unknown denomination: {0}")]
    UnknownDenomination(BigDecimal),
    #[error("validation error: {0}")]
    Validation(String),
}

/// Result type for wallet operations
pub type WalletResult<T> = Result<T, WalletError>;
