//! In-memory storage implementation for testing and development

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::denomination::Denomination;
use crate::traits::WalletStore;
use crate::types::{Transaction, WalletResult};

/// In-memory [`WalletStore`]. Clones share the same underlying state, which
/// lets a test save through one handle and load through another.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    denominations: Arc<RwLock<Option<HashMap<Denomination, u32>>>>,
    history: Arc<RwLock<Option<Vec<Transaction>>>>,
    goal: Arc<RwLock<Option<BigDecimal>>>,
}

impl MemoryStore {
    /// Create a new memory store with nothing saved yet.
    pub fn new() -> Self {
        Self {
            denominations: Arc::new(RwLock::new(None)),
            history: Arc::new(RwLock::new(None)),
            goal: Arc::new(RwLock::new(None)),
        }
    }

    /// Clear all saved data (useful for testing).
    pub fn clear(&self) {
        *self.denominations.write().unwrap() = None;
        *self.history.write().unwrap() = None;
        *self.goal.write().unwrap() = None;
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WalletStore for MemoryStore {
    async fn load_denominations(&self) -> WalletResult<Option<HashMap<Denomination, u32>>> {
        Ok(self.denominations.read().unwrap().clone())
    }

    async fn save_denominations(
        &mut self,
        denominations: &HashMap<Denomination, u32>,
    ) -> WalletResult<()> {
        *self.denominations.write().unwrap() = Some(denominations.clone());
        Ok(())
    }

    async fn load_history(&self) -> WalletResult<Option<Vec<Transaction>>> {
        Ok(self.history.read().unwrap().clone())
    }

    async fn save_history(&mut self, history: &[Transaction]) -> WalletResult<()> {
        *self.history.write().unwrap() = Some(history.to_vec());
        Ok(())
    }

    async fn load_goal(&self) -> WalletResult<Option<BigDecimal>> {
        Ok(self.goal.read().unwrap().clone())
    }

    async fn save_goal(&mut self, goal: &BigDecimal) -> WalletResult<()> {
        *self.goal.write().unwrap() = Some(goal.clone());
        Ok(())
    }
}
