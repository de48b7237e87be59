//! JSON-file persistence for wallet state
//!
//! One JSON file per logical key under a base directory. Decode failures
//! read back as "no saved data", which the wallet turns into an empty
//! default; write failures surface as `WalletError::Storage` and are dropped
//! by the wallet's best-effort persistence.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::denomination::Denomination;
use crate::traits::WalletStore;
use crate::types::{Transaction, WalletError, WalletResult};

const DENOMINATIONS_FILE: &str = "denominations.json";
const HISTORY_FILE: &str = "history.json";
const GOAL_FILE: &str = "savings_goal.json";

/// File-per-key JSON [`WalletStore`].
#[derive(Debug, Clone)]
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    /// Open (and create if needed) a store rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> WalletResult<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).map_err(|err| WalletError::Storage(err.to_string()))?;
        Ok(Self { base_dir })
    }

    fn read<T: DeserializeOwned>(&self, file: &str) -> Option<T> {
        let bytes = fs::read(self.base_dir.join(file)).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    fn write<T: Serialize>(&self, file: &str, value: &T) -> WalletResult<()> {
        let bytes =
            serde_json::to_vec(value).map_err(|err| WalletError::Storage(err.to_string()))?;
        fs::write(self.base_dir.join(file), bytes)
            .map_err(|err| WalletError::Storage(err.to_string()))
    }
}

#[async_trait]
impl WalletStore for JsonStore {
    async fn load_denominations(&self) -> WalletResult<Option<HashMap<Denomination, u32>>> {
        Ok(self.read(DENOMINATIONS_FILE))
    }

    async fn save_denominations(
        &mut self,
        denominations: &HashMap<Denomination, u32>,
    ) -> WalletResult<()> {
        self.write(DENOMINATIONS_FILE, denominations)
    }

    async fn load_history(&self) -> WalletResult<Option<Vec<Transaction>>> {
        Ok(self.read(HISTORY_FILE))
    }

    async fn save_history(&mut self, history: &[Transaction]) -> WalletResult<()> {
        self.write(HISTORY_FILE, &history.to_vec())
    }

    async fn load_goal(&self) -> WalletResult<Option<BigDecimal>> {
        Ok(self.read(GOAL_FILE))
    }

    async fn save_goal(&mut self, goal: &BigDecimal) -> WalletResult<()> {
        self.write(GOAL_FILE, goal)
    }
}
