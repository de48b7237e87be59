//! Confidence gate between the classifier and the ledger

use bigdecimal::BigDecimal;
use std::fmt;
use std::str::FromStr;

use crate::denomination::Denomination;
use crate::types::RecognitionResult;

/// Minimum classifier confidence the gate accepts.
///
/// Fixed policy constant, not user-configurable: rejecting a readable note is
/// recoverable, committing a misread value to the ledger is not.
pub const CONFIDENCE_THRESHOLD: f32 = 0.8;

/// Verdict on one classifier result.
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    Accept(Denomination),
    Reject(RejectReason),
}

/// Why a capture was rejected. All of these drive a "try again" path in the
/// caller, never a hard failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The classifier produced no label at all
    NoDetection,
    /// The label carried no parseable numeric value
    Unparseable,
    /// Confidence fell below [`CONFIDENCE_THRESHOLD`]
    LowConfidence,
    /// The parsed value is not in the denomination catalog
    InvalidDenomination,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RejectReason::NoDetection => "No banknote detected. Please try again.",
            RejectReason::Unparseable => "Could not read a value from the note. Please try again.",
            RejectReason::LowConfidence => "Recognition confidence too low. Please try again.",
            RejectReason::InvalidDenomination => {
                "The detected value is not a known banknote. Please try again."
            }
        };
        f.write_str(text)
    }
}

/// Decide whether one classifier result may reach the ledger.
///
/// Checks run in a fixed order: detection, parseability, confidence, catalog
/// membership. Pure function of its input, no side effects.
pub fn evaluate(result: &RecognitionResult) -> GateDecision {
    let Some(label) = result.label.as_deref() else {
        return GateDecision::Reject(RejectReason::NoDetection);
    };

    let numeric: String = label
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let Ok(value) = BigDecimal::from_str(&numeric) else {
        return GateDecision::Reject(RejectReason::Unparseable);
    };

    if result.confidence < CONFIDENCE_THRESHOLD {
        return GateDecision::Reject(RejectReason::LowConfidence);
    }

    match Denomination::from_amount(&value) {
        Ok(denomination) => GateDecision::Accept(denomination),
        Err(_) => GateDecision::Reject(RejectReason::InvalidDenomination),
    }
}
