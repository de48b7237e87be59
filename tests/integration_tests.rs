//! Integration tests for wallet-core

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use std::sync::{Arc, Mutex};

use wallet_core::utils::JsonStore;
use wallet_core::{
    announcement, BanknoteClassifier, ChangeResult, FrameSource, ImageHandle, NotificationSink,
    PaymentTally, RecognitionResult, ScanSession, ScanUpdate, Wallet,
};

struct ScriptedClassifier {
    results: Mutex<Vec<RecognitionResult>>,
}

impl ScriptedClassifier {
    fn new(results: Vec<RecognitionResult>) -> Self {
        Self {
            results: Mutex::new(results),
        }
    }
}

#[async_trait]
impl BanknoteClassifier for ScriptedClassifier {
    async fn classify(&self, _frame: &ImageHandle) -> RecognitionResult {
        self.results.lock().unwrap().remove(0)
    }
}

struct StaticFrames;

impl FrameSource for StaticFrames {
    fn latest_frame(&self) -> Option<ImageHandle> {
        Some(ImageHandle::new(vec![0u8; 16]))
    }
}

struct RecordingSink(Arc<Mutex<Vec<String>>>);

impl NotificationSink for RecordingSink {
    fn announce(&self, text: &str) {
        self.0.lock().unwrap().push(text.to_string());
    }
}

fn amount(s: &str) -> BigDecimal {
    s.parse().unwrap()
}

fn labeled(label: &str, confidence: f32) -> RecognitionResult {
    RecognitionResult {
        label: Some(label.to_string()),
        confidence,
    }
}

#[tokio::test]
async fn scan_confirm_persist_and_reload_workflow() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = JsonStore::new(dir.path()).unwrap();
        let mut wallet = Wallet::load(store).await;
        assert_eq!(wallet.balance(), &amount("0"));

        // one low-confidence capture, then two good ones
        let classifier = ScriptedClassifier::new(vec![
            labeled("50", 0.4),
            labeled("50", 0.95),
            labeled("20 euros", 0.88),
        ]);
        let mut session = ScanSession::new(classifier, StaticFrames);

        let ticket = session.begin_scan().unwrap();
        let update = session.classify(ticket).await;
        assert!(matches!(update, ScanUpdate::Rejected(_)));

        let ticket = session.begin_scan().unwrap();
        session.classify(ticket).await;
        session.confirm_into(&mut wallet).await.unwrap();

        let ticket = session.begin_scan().unwrap();
        session.classify(ticket).await;
        session.confirm_into(&mut wallet).await.unwrap();

        wallet.set_savings_goal(amount("100")).await;
        assert_eq!(wallet.balance(), &amount("70"));
        assert_eq!(wallet.history().len(), 2);
    }

    // a fresh process picks the state back up from disk
    let store = JsonStore::new(dir.path()).unwrap();
    let wallet = Wallet::load(store).await;
    assert_eq!(wallet.balance(), &amount("70"));
    assert_eq!(wallet.history().len(), 2);
    assert_eq!(wallet.savings_goal(), &amount("100"));
    assert!(!wallet.goal_reached());
}

#[tokio::test]
async fn payment_workflow_scans_tender_and_computes_change() {
    let classifier = ScriptedClassifier::new(vec![labeled("10", 0.9), labeled("5", 0.92)]);
    let mut session = ScanSession::new(classifier, StaticFrames);
    let mut tally = PaymentTally::new();

    for _ in 0..2 {
        let ticket = session.begin_scan().unwrap();
        session.classify(ticket).await;
        if let Some(denomination) = session.confirm() {
            tally.add(&denomination);
        }
    }

    assert_eq!(tally.total(), &amount("15"));
    let ChangeResult::ChangeDue { amount: due, breakdown } = tally.change_for(&amount("12.50"))
    else {
        panic!("expected change due");
    };
    assert_eq!(due, amount("2.50"));
    let reassembled: BigDecimal = breakdown
        .iter()
        .map(|(denomination, count)| denomination.value() * BigDecimal::from(*count))
        .sum();
    assert_eq!(reassembled, amount("2.50"));
}

#[tokio::test]
async fn notification_sink_hears_ledger_mutations() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path()).unwrap();
    let mut wallet = Wallet::load(store).await;

    let spoken = Arc::new(Mutex::new(Vec::new()));
    wallet.announce_with(RecordingSink(Arc::clone(&spoken)));

    wallet.add_money(&amount("5")).await.unwrap();
    wallet.clear_denominations().await;

    let spoken = spoken.lock().unwrap();
    assert_eq!(
        spoken.as_slice(),
        [
            "Added 5 euros. Total balance is now 5 euros.",
            "All denominations cleared. Total balance is now 0 euro.",
        ]
    );
}

#[tokio::test]
async fn clears_are_independent_and_durable() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = JsonStore::new(dir.path()).unwrap();
        let mut wallet = Wallet::load(store).await;
        wallet.add_money(&amount("100")).await.unwrap();
        wallet.add_money(&amount("0.50")).await.unwrap();
        wallet.clear_history().await;
    }

    let wallet = Wallet::load(JsonStore::new(dir.path()).unwrap()).await;
    assert_eq!(wallet.balance(), &amount("100.50"));
    assert!(wallet.history().is_empty());

    let mut wallet = wallet;
    wallet.clear_denominations().await;
    drop(wallet);

    let wallet = Wallet::load(JsonStore::new(dir.path()).unwrap()).await;
    assert_eq!(wallet.balance(), &amount("0"));
    assert!(wallet.denominations().is_empty());
}

#[test]
fn announcement_is_exported_for_presentation_layers() {
    use wallet_core::{Denomination, WalletEvent};

    let denomination = Denomination::from_amount(&amount("0.20")).unwrap();
    let text = announcement(&WalletEvent::MoneyAdded {
        denomination,
        balance: amount("0.20"),
    });
    assert_eq!(text, "Added 20 cents. Total balance is now 20 cents.");
}
