//! Post-mutation wallet events and their spoken announcements
//!
//! The ledger publishes an event after each mutation has been applied and
//! persisted; subscribers (speech, haptics, presentation) react to it. The
//! ledger itself stays free of UI concerns.

use bigdecimal::BigDecimal;

use crate::denomination::{format_balance, Denomination};

/// Published by the wallet after a successful mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum WalletEvent {
    MoneyAdded {
        denomination: Denomination,
        balance: BigDecimal,
    },
    MoneyRemoved {
        denomination: Denomination,
        balance: BigDecimal,
    },
    DenominationsCleared,
    HistoryCleared,
    GoalSet(BigDecimal),
}

/// Spoken text for an event, shared by every notification subscriber.
pub fn announcement(event: &WalletEvent) -> String {
    match event {
        WalletEvent::MoneyAdded {
            denomination,
            balance,
        } => format!(
            "Added {}. Total balance is now {}.",
            denomination.label(),
            format_balance(balance)
        ),
        WalletEvent::MoneyRemoved {
            denomination,
            balance,
        } => format!(
            "Removed {}. Total balance is now {}.",
            denomination.label(),
            format_balance(balance)
        ),
        WalletEvent::DenominationsCleared => {
            "All denominations cleared. Total balance is now 0 euro.".to_string()
        }
        WalletEvent::HistoryCleared => "Transaction history cleared.".to_string(),
        WalletEvent::GoalSet(goal) => {
            format!("Savings goal set to {}.", format_balance(goal))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn denom(s: &str) -> Denomination {
        Denomination::from_amount(&s.parse().unwrap()).unwrap()
    }

    #[test]
    fn announcement_texts() {
        assert_eq!(
            announcement(&WalletEvent::MoneyAdded {
                denomination: denom("50"),
                balance: "50".parse().unwrap(),
            }),
            "Added 50 euros. Total balance is now 50 euros."
        );
        assert_eq!(
            announcement(&WalletEvent::MoneyRemoved {
                denomination: denom("0.50"),
                balance: "0".parse().unwrap(),
            }),
            "Removed 50 cents. Total balance is now 0 euro."
        );
        assert_eq!(
            announcement(&WalletEvent::GoalSet("100".parse().unwrap())),
            "Savings goal set to 100 euros."
        );
    }
}
