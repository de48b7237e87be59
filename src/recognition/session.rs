//! One scan-to-ledger-update cycle
//!
//! The session snapshots a camera frame, runs it through the classifier and
//! the gate, then holds an accepted denomination until the user explicitly
//! confirms or cancels. Nothing reaches the ledger on recognition alone.

use log::debug;

use crate::denomination::Denomination;
use crate::recognition::gate::{self, GateDecision, RejectReason};
use crate::traits::{BanknoteClassifier, FrameSource, WalletStore};
use crate::types::{ImageHandle, RecognitionResult, WalletResult};
use crate::wallet::Wallet;

/// Where one scan cycle currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanState {
    /// Waiting for the user to trigger a capture
    Idle,
    /// A classification is in flight; further triggers are ignored
    Classifying,
    /// The gate accepted a denomination; awaiting explicit confirm or cancel
    AwaitingConfirmation(Denomination),
}

/// Handle for one in-flight classification.
///
/// Only the ticket minted by the most recent [`ScanSession::begin_scan`] can
/// change the session; results arriving for older tickets are discarded.
#[derive(Debug)]
pub struct ScanTicket {
    generation: u64,
    frame: ImageHandle,
}

impl ScanTicket {
    /// The frame snapshotted at trigger time.
    pub fn frame(&self) -> &ImageHandle {
        &self.frame
    }
}

/// What applying one classification produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanUpdate {
    /// Gate accepted; the session now awaits confirmation
    Accepted(Denomination),
    /// Gate rejected; the session is back at `Idle`, retry permitted
    Rejected(RejectReason),
    /// Result arrived for a superseded scan and was discarded
    Stale,
}

/// Orchestrates capture → classify → gate → confirm for one scan at a time.
pub struct ScanSession<C, F> {
    classifier: C,
    frames: F,
    state: ScanState,
    generation: u64,
}

impl<C: BanknoteClassifier, F: FrameSource> ScanSession<C, F> {
    pub fn new(classifier: C, frames: F) -> Self {
        Self {
            classifier,
            frames,
            state: ScanState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    /// Snapshot the current camera frame and enter `Classifying`.
    ///
    /// Returns `None` when the session is not idle (a trigger during an
    /// in-flight classification is ignored, not queued, and a pending
    /// confirmation must be resolved first) or when no frame is available.
    pub fn begin_scan(&mut self) -> Option<ScanTicket> {
        if self.state != ScanState::Idle {
            return None;
        }
        let frame = self.frames.latest_frame()?;
        self.generation += 1;
        self.state = ScanState::Classifying;
        Some(ScanTicket {
            generation: self.generation,
            frame,
        })
    }

    /// Run the classifier for a ticket and apply its result.
    pub async fn classify(&mut self, ticket: ScanTicket) -> ScanUpdate {
        let result = self.classifier.classify(&ticket.frame).await;
        self.apply_result(ticket, result)
    }

    /// Apply one classifier result to the session.
    ///
    /// Split-phase entry point for callers that drive the classifier
    /// themselves. A result for a superseded ticket, or one arriving when no
    /// classification is in flight, is discarded as [`ScanUpdate::Stale`].
    pub fn apply_result(&mut self, ticket: ScanTicket, result: RecognitionResult) -> ScanUpdate {
        if self.state != ScanState::Classifying || ticket.generation != self.generation {
            debug!(
                "discarding classification result for stale scan generation {}",
                ticket.generation
            );
            return ScanUpdate::Stale;
        }
        match gate::evaluate(&result) {
            GateDecision::Accept(denomination) => {
                self.state = ScanState::AwaitingConfirmation(denomination.clone());
                ScanUpdate::Accepted(denomination)
            }
            GateDecision::Reject(reason) => {
                self.state = ScanState::Idle;
                ScanUpdate::Rejected(reason)
            }
        }
    }

    /// Hand the accepted denomination to the caller and return to `Idle`.
    ///
    /// This is the external-callback path (e.g. feeding a
    /// [`PaymentTally`](crate::change::PaymentTally)). `None` unless a result
    /// is awaiting confirmation.
    pub fn confirm(&mut self) -> Option<Denomination> {
        match std::mem::replace(&mut self.state, ScanState::Idle) {
            ScanState::AwaitingConfirmation(denomination) => Some(denomination),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Commit the accepted denomination into the wallet.
    ///
    /// The denomination reaches the ledger if and only if this (or
    /// [`confirm`](Self::confirm)) is called on an awaiting result.
    pub async fn confirm_into<S: WalletStore>(
        &mut self,
        wallet: &mut Wallet<S>,
    ) -> WalletResult<Option<Denomination>> {
        match self.confirm() {
            Some(denomination) => {
                wallet.add_money(denomination.value()).await?;
                Ok(Some(denomination))
            }
            None => Ok(None),
        }
    }

    /// Discard any pending result and return to `Idle`. No ledger mutation.
    pub fn cancel(&mut self) {
        self.state = ScanState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::MemoryStore;
    use async_trait::async_trait;
    use bigdecimal::BigDecimal;

    struct FixedClassifier(RecognitionResult);

    impl FixedClassifier {
        fn labeled(label: &str, confidence: f32) -> Self {
            Self(RecognitionResult {
                label: Some(label.to_string()),
                confidence,
            })
        }
    }

    #[async_trait]
    impl BanknoteClassifier for FixedClassifier {
        async fn classify(&self, _frame: &ImageHandle) -> RecognitionResult {
            self.0.clone()
        }
    }

    struct StaticFrames;

    impl FrameSource for StaticFrames {
        fn latest_frame(&self) -> Option<ImageHandle> {
            Some(ImageHandle::new(vec![0u8; 4]))
        }
    }

    struct NoFrames;

    impl FrameSource for NoFrames {
        fn latest_frame(&self) -> Option<ImageHandle> {
            None
        }
    }

    fn amount(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn accepted_scan_commits_only_on_confirm() {
        let mut wallet = Wallet::new(MemoryStore::new());
        let mut session = ScanSession::new(FixedClassifier::labeled("50", 0.95), StaticFrames);

        let ticket = session.begin_scan().unwrap();
        let update = session.classify(ticket).await;
        assert!(matches!(update, ScanUpdate::Accepted(_)));
        assert!(matches!(session.state(), ScanState::AwaitingConfirmation(_)));
        // recognition alone must not touch the ledger
        assert_eq!(wallet.balance(), &amount("0"));

        let committed = session.confirm_into(&mut wallet).await.unwrap().unwrap();
        assert_eq!(committed.value(), &amount("50"));
        assert_eq!(wallet.balance(), &amount("50"));
        assert_eq!(session.state(), &ScanState::Idle);
    }

    #[tokio::test]
    async fn cancel_discards_accepted_result() {
        let mut wallet = Wallet::new(MemoryStore::new());
        let mut session = ScanSession::new(FixedClassifier::labeled("20", 0.9), StaticFrames);

        let ticket = session.begin_scan().unwrap();
        session.classify(ticket).await;
        session.cancel();

        assert_eq!(session.state(), &ScanState::Idle);
        assert!(session.confirm_into(&mut wallet).await.unwrap().is_none());
        assert_eq!(wallet.balance(), &amount("0"));
        assert!(wallet.history().is_empty());
    }

    #[tokio::test]
    async fn rejection_returns_to_idle_for_retry() {
        let mut session = ScanSession::new(FixedClassifier::labeled("50", 0.5), StaticFrames);

        let ticket = session.begin_scan().unwrap();
        let update = session.classify(ticket).await;
        assert_eq!(update, ScanUpdate::Rejected(RejectReason::LowConfidence));
        assert_eq!(session.state(), &ScanState::Idle);
        // retry is permitted immediately
        assert!(session.begin_scan().is_some());
    }

    #[tokio::test]
    async fn second_trigger_during_classification_is_ignored() {
        let mut session = ScanSession::new(FixedClassifier::labeled("50", 0.95), StaticFrames);

        let ticket = session.begin_scan().unwrap();
        assert!(session.begin_scan().is_none());

        let update = session.classify(ticket).await;
        assert!(matches!(update, ScanUpdate::Accepted(_)));
        // exactly one outcome was applied
        assert_eq!(
            session.state(),
            &ScanState::AwaitingConfirmation(
                Denomination::from_amount(&amount("50")).unwrap()
            )
        );
    }

    #[tokio::test]
    async fn superseded_result_is_discarded() {
        let mut session = ScanSession::new(FixedClassifier::labeled("50", 0.95), StaticFrames);

        let stale_ticket = session.begin_scan().unwrap();
        session.cancel();
        let fresh_ticket = session.begin_scan().unwrap();

        let result = RecognitionResult {
            label: Some("50".to_string()),
            confidence: 0.95,
        };
        assert_eq!(
            session.apply_result(stale_ticket, result.clone()),
            ScanUpdate::Stale
        );
        assert!(matches!(
            session.apply_result(fresh_ticket, result),
            ScanUpdate::Accepted(_)
        ));
    }

    #[tokio::test]
    async fn no_frame_means_no_scan() {
        let mut session = ScanSession::new(FixedClassifier::labeled("50", 0.95), NoFrames);
        assert!(session.begin_scan().is_none());
        assert_eq!(session.state(), &ScanState::Idle);
    }

    #[tokio::test]
    async fn confirm_feeds_external_consumer() {
        let mut tally = crate::change::PaymentTally::new();
        let mut session = ScanSession::new(FixedClassifier::labeled("10", 0.9), StaticFrames);

        let ticket = session.begin_scan().unwrap();
        session.classify(ticket).await;
        if let Some(denomination) = session.confirm() {
            tally.add(&denomination);
        }
        assert_eq!(tally.total(), &amount("10"));
    }
}
