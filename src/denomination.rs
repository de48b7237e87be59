//! The fixed euro denomination catalog and the shared amount formatting
//! contract.
//!
//! Every denomination value in the ledger, the recognition gate, and the
//! change calculator is a member of this closed set; no other numeric value
//! is ever stored as a denomination key.

use bigdecimal::rounding::RoundingMode;
use bigdecimal::{BigDecimal, ToPrimitive};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

use crate::types::{WalletError, WalletResult};

/// Face values of the catalog, largest first.
static FACE_VALUES: LazyLock<Vec<BigDecimal>> = LazyLock::new(|| {
    [
        "200", "100", "50", "20", "10", "5", "2", "1", "0.50", "0.20", "0.10", "0.05", "0.02",
        "0.01",
    ]
    .iter()
    .map(|value| value.parse().expect("literal face value"))
    .collect()
});

/// A member of the fixed euro denomination set.
///
/// Construction always goes through [`Denomination::from_amount`] (including
/// deserialization), so a value of this type is guaranteed to carry one of
/// the fourteen legal face values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Denomination(BigDecimal);

impl Denomination {
    /// Validate an arbitrary amount against the catalog.
    pub fn from_amount(amount: &BigDecimal) -> WalletResult<Self> {
        if is_valid(amount) {
            Ok(Self(amount.with_scale(2)))
        } else {
            Err(WalletError::UnknownDenomination(amount.clone()))
        }
    }

    /// The face value, quantized to the cent.
    pub fn value(&self) -> &BigDecimal {
        &self.0
    }

    /// Canonical display label, e.g. `"50 cents"` or `"5 euros"`.
    pub fn label(&self) -> String {
        let one = BigDecimal::from(1);
        if self.0 < one {
            let cents = (&self.0 * BigDecimal::from(100)).to_u32().unwrap_or(0);
            if cents == 1 {
                "1 cent".to_string()
            } else {
                format!("{cents} cents")
            }
        } else {
            let euros = self.0.to_u32().unwrap_or(0);
            if euros == 1 {
                "1 euro".to_string()
            } else {
                format!("{euros} euros")
            }
        }
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for Denomination {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Denomination {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = BigDecimal::deserialize(deserializer)?;
        Denomination::from_amount(&amount).map_err(serde::de::Error::custom)
    }
}

/// Whether an amount is a legal face value.
pub fn is_valid(amount: &BigDecimal) -> bool {
    FACE_VALUES.iter().any(|value| value == amount)
}

/// Display label for an arbitrary amount; fails off-catalog.
pub fn display_label(amount: &BigDecimal) -> WalletResult<String> {
    Denomination::from_amount(amount).map(|denomination| denomination.label())
}

/// All denominations, largest face value first.
pub fn ordered_descending() -> Vec<Denomination> {
    FACE_VALUES
        .iter()
        .map(|value| Denomination(value.with_scale(2)))
        .collect()
}

/// Shared balance formatting used by announcements and presentation.
///
/// `"0 euro"` for zero, `"N cent(s)"` below one euro, integer `"N euros"`
/// for whole amounts, otherwise two decimal places. Callers compare against
/// these strings literally, so the output must stay bit-identical across the
/// whole system.
pub fn format_balance(amount: &BigDecimal) -> String {
    let zero = BigDecimal::from(0);
    let one = BigDecimal::from(1);
    if *amount == zero {
        return "0 euro".to_string();
    }
    if *amount == one {
        return "1 euro".to_string();
    }
    if *amount > zero && *amount < one {
        let cents = (amount * BigDecimal::from(100))
            .with_scale_round(0, RoundingMode::HalfUp)
            .to_u32()
            .unwrap_or(0);
        return if cents == 1 {
            "1 cent".to_string()
        } else {
            format!("{cents} cents")
        };
    }
    if amount.is_integer() {
        format!("{} euros", amount.with_scale(0))
    } else {
        format!("{} euros", amount.with_scale_round(2, RoundingMode::HalfUp))
    }
}
