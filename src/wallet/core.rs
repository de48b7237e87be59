//! The stateful cash ledger

use bigdecimal::{BigDecimal, ToPrimitive};
use log::warn;
use std::collections::HashMap;

use crate::denomination::Denomination;
use crate::traits::{NotificationSink, WalletStore};
use crate::types::{Direction, Transaction, WalletResult};
use crate::wallet::events::{announcement, WalletEvent};

type Subscriber = Box<dyn Fn(&WalletEvent) + Send + Sync>;

/// Authoritative ledger of the physical cash the user holds.
///
/// Owns the per-denomination counts, the derived total balance, the
/// newest-first transaction history, and the savings goal. All mutations go
/// through `&mut self`, so updates are serialized and the balance is never
/// observable mid-update. Persistence is best-effort: a failed save is
/// logged and dropped, never surfaced to the caller.
pub struct Wallet<S: WalletStore> {
    store: S,
    denominations: HashMap<Denomination, u32>,
    total_balance: BigDecimal,
    history: Vec<Transaction>,
    savings_goal: BigDecimal,
    subscribers: Vec<Subscriber>,
}

impl<S: WalletStore> Wallet<S> {
    /// Start from an empty ledger.
    pub fn new(store: S) -> Self {
        Self {
            store,
            denominations: HashMap::new(),
            total_balance: BigDecimal::from(0),
            history: Vec::new(),
            savings_goal: BigDecimal::from(0),
            subscribers: Vec::new(),
        }
    }

    /// Load persisted state, falling back to empty defaults when any piece
    /// is missing or malformed. The balance is recomputed from the counts,
    /// never trusted from storage.
    pub async fn load(store: S) -> Self {
        let denominations = store
            .load_denominations()
            .await
            .ok()
            .flatten()
            .unwrap_or_default();
        let history = store.load_history().await.ok().flatten().unwrap_or_default();
        let savings_goal = store
            .load_goal()
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| BigDecimal::from(0));

        let mut wallet = Self::new(store);
        wallet.denominations = denominations;
        wallet.denominations.retain(|_, count| *count > 0);
        wallet.total_balance = derived_balance(&wallet.denominations);
        wallet.history = history;
        wallet.savings_goal = savings_goal;
        wallet
    }

    /// Register a post-mutation event subscriber.
    pub fn subscribe(&mut self, subscriber: impl Fn(&WalletEvent) + Send + Sync + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Forward every event to a notification sink as spoken text.
    pub fn announce_with(&mut self, sink: impl NotificationSink + 'static) {
        self.subscribe(move |event| sink.announce(&announcement(event)));
    }

    /// Derived total, always equal to the sum over counts of value × count.
    pub fn balance(&self) -> &BigDecimal {
        &self.total_balance
    }

    /// Current counts per denomination. Never holds a zero count.
    pub fn denominations(&self) -> &HashMap<Denomination, u32> {
        &self.denominations
    }

    /// Counts sorted by face value, smallest first, for presentation.
    pub fn denomination_counts(&self) -> Vec<(Denomination, u32)> {
        let mut counts: Vec<_> = self
            .denominations
            .iter()
            .map(|(denomination, count)| (denomination.clone(), *count))
            .collect();
        counts.sort_by(|a, b| a.0.cmp(&b.0));
        counts
    }

    /// Transaction history, newest first.
    pub fn history(&self) -> &[Transaction] {
        &self.history
    }

    pub fn savings_goal(&self) -> &BigDecimal {
        &self.savings_goal
    }

    /// Whether a goal is set and the balance has reached it.
    pub fn goal_reached(&self) -> bool {
        self.savings_goal > BigDecimal::from(0) && self.total_balance >= self.savings_goal
    }

    /// Progress toward the goal as a fraction in `0.0..=1.0`. The
    /// denominator is clamped to at least one euro so an unset goal reads as
    /// zero progress rather than dividing by zero.
    pub fn goal_progress(&self) -> f64 {
        let goal = self.savings_goal.to_f64().unwrap_or(0.0).max(1.0);
        let balance = self.total_balance.to_f64().unwrap_or(0.0);
        (balance / goal).clamp(0.0, 1.0)
    }

    /// Add one note or coin of the given face value.
    ///
    /// Fails with `UnknownDenomination` before any mutation if the value is
    /// not in the catalog.
    pub async fn add_money(&mut self, amount: &BigDecimal) -> WalletResult<()> {
        let denomination = Denomination::from_amount(amount)?;
        *self.denominations.entry(denomination.clone()).or_insert(0) += 1;
        self.total_balance += denomination.value();
        self.push_transaction(denomination.value().clone(), Direction::Credit);
        self.persist().await;
        self.publish(WalletEvent::MoneyAdded {
            denomination,
            balance: self.total_balance.clone(),
        });
        Ok(())
    }

    /// Remove one note or coin of the given face value.
    ///
    /// Removing a denomination that is absent from the wallet is a silent
    /// no-op: state is unchanged and no transaction is recorded. An
    /// off-catalog value still fails with `UnknownDenomination`.
    pub async fn remove_money(&mut self, amount: &BigDecimal) -> WalletResult<()> {
        let denomination = Denomination::from_amount(amount)?;
        let Some(count) = self.denominations.get_mut(&denomination) else {
            return Ok(());
        };
        // counts in the map are always >= 1
        *count -= 1;
        if *count == 0 {
            self.denominations.remove(&denomination);
        }
        self.total_balance -= denomination.value();
        self.push_transaction(denomination.value().clone(), Direction::Debit);
        self.persist().await;
        self.publish(WalletEvent::MoneyRemoved {
            denomination,
            balance: self.total_balance.clone(),
        });
        Ok(())
    }

    /// Empty the denomination counts and reset the balance to zero. The
    /// transaction history is untouched.
    pub async fn clear_denominations(&mut self) {
        self.denominations.clear();
        self.total_balance = BigDecimal::from(0);
        if let Err(err) = self.store.save_denominations(&self.denominations).await {
            warn!("dropping failed denomination save: {err}");
        }
        self.publish(WalletEvent::DenominationsCleared);
    }

    /// Drop the transaction history. Counts and balance are untouched.
    pub async fn clear_history(&mut self) {
        self.history.clear();
        if let Err(err) = self.store.save_history(&self.history).await {
            warn!("dropping failed history save: {err}");
        }
        self.publish(WalletEvent::HistoryCleared);
    }

    /// Replace the savings goal. No validation: a negative or zero goal is
    /// stored as-is.
    pub async fn set_savings_goal(&mut self, goal: BigDecimal) {
        self.savings_goal = goal.clone();
        if let Err(err) = self.store.save_goal(&goal).await {
            warn!("dropping failed goal save: {err}");
        }
        self.publish(WalletEvent::GoalSet(goal));
    }

    fn push_transaction(&mut self, amount: BigDecimal, direction: Direction) {
        self.history.insert(0, Transaction::new(amount, direction));
    }

    async fn persist(&mut self) {
        if let Err(err) = self.store.save_denominations(&self.denominations).await {
            warn!("dropping failed denomination save: {err}");
        }
        if let Err(err) = self.store.save_history(&self.history).await {
            warn!("dropping failed history save: {err}");
        }
    }

    fn publish(&self, event: WalletEvent) {
        for subscriber in &self.subscribers {
            subscriber(&event);
        }
    }
}

fn derived_balance(denominations: &HashMap<Denomination, u32>) -> BigDecimal {
    denominations
        .iter()
        .map(|(denomination, count)| denomination.value() * BigDecimal::from(*count))
        .sum()
}
