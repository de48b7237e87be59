//! Greedy change calculation for the payment workflow

use bigdecimal::rounding::RoundingMode;
use bigdecimal::{BigDecimal, ToPrimitive};

use crate::denomination::{self, format_balance, Denomination};

/// Outcome of comparing a tendered amount against a price.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeResult {
    /// Tendered equals the price exactly
    Exact,
    /// Tendered falls short of the price by this amount
    Shortfall(BigDecimal),
    /// Change is owed, with a greedy denomination breakdown (largest first)
    ChangeDue {
        amount: BigDecimal,
        breakdown: Vec<(Denomination, u32)>,
    },
}

impl ChangeResult {
    /// Spoken result text for the payment calculator.
    pub fn announcement(&self) -> String {
        match self {
            ChangeResult::Exact => "Exact payment. No change needed.".to_string(),
            ChangeResult::Shortfall(amount) => format!(
                "Additional {} needed to complete the payment.",
                format_balance(amount)
            ),
            ChangeResult::ChangeDue { amount, breakdown } => format!(
                "Change required: {}. Suggested change: {}.",
                format_balance(amount),
                format_breakdown(breakdown)
            ),
        }
    }
}

/// Compute the signed difference between tendered and price, with a greedy
/// breakdown of any change due.
///
/// Inputs are quantized to the cent up front and the remainder is
/// re-quantized after every subtraction, so the loop always terminates at
/// exactly zero once the 0.01 denomination has been processed. A non-zero
/// terminal remainder is a programming fault, not a user-facing error.
pub fn compute_change(price: &BigDecimal, tendered: &BigDecimal) -> ChangeResult {
    let zero = BigDecimal::from(0);
    let difference = (tendered - price).with_scale_round(2, RoundingMode::HalfUp);
    if difference == zero {
        return ChangeResult::Exact;
    }
    if difference < zero {
        return ChangeResult::Shortfall(difference.abs());
    }

    let mut remaining = difference.clone();
    let mut breakdown = Vec::new();
    for denomination in denomination::ordered_descending() {
        if remaining == zero {
            break;
        }
        let count = (&remaining / denomination.value())
            .with_scale_round(0, RoundingMode::Down)
            .to_u32()
            .unwrap_or(0);
        if count > 0 {
            // re-quantize to the cent after every subtraction
            remaining =
                (&remaining - denomination.value() * BigDecimal::from(count)).with_scale(2);
            breakdown.push((denomination, count));
        }
    }

    if remaining != zero {
        unreachable!("change remainder {remaining} not decomposed to zero");
    }

    ChangeResult::ChangeDue {
        amount: difference,
        breakdown,
    }
}

/// Suggestion text for a breakdown, e.g. `"1 x €5, 2 x 50 cents"`.
pub fn format_breakdown(breakdown: &[(Denomination, u32)]) -> String {
    if breakdown.is_empty() {
        return "No suitable change available.".to_string();
    }
    breakdown
        .iter()
        .map(|(denomination, count)| {
            if denomination.value() >= &BigDecimal::from(1) {
                format!("{count} x €{}", denomination.value().with_scale(0))
            } else {
                let cents = (denomination.value() * BigDecimal::from(100))
                    .to_u32()
                    .unwrap_or(0);
                format!("{count} x {cents} cent{}", if *count > 1 { "s" } else { "" })
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Running total of scanned payment amounts for the calculator workflow.
///
/// Confirmed scans accumulate here instead of touching the wallet; once the
/// buyer or seller is done scanning, [`PaymentTally::change_for`] compares
/// the tender against the price.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentTally {
    total: BigDecimal,
}

impl PaymentTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one confirmed scan to the tendered total.
    pub fn add(&mut self, denomination: &Denomination) {
        self.total += denomination.value();
    }

    pub fn total(&self) -> &BigDecimal {
        &self.total
    }

    pub fn reset(&mut self) {
        self.total = BigDecimal::from(0);
    }

    /// Change owed for the accumulated tender against a price.
    pub fn change_for(&self, price: &BigDecimal) -> ChangeResult {
        compute_change(price, &self.total)
    }
}
