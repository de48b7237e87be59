//! Basic wallet walkthrough: ledger mutations, goal tracking, and the
//! change calculator.

use bigdecimal::BigDecimal;
use wallet_core::utils::MemoryStore;
use wallet_core::{announcement, compute_change, format_balance, ChangeResult, Wallet};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut wallet = Wallet::new(MemoryStore::new());
    wallet.subscribe(|event| println!("  [announce] {}", announcement(event)));

    println!("Adding money...");
    for value in ["50", "20", "0.50", "0.50"] {
        let amount: BigDecimal = value.parse()?;
        wallet.add_money(&amount).await?;
    }

    println!("\nDenominations held:");
    for (denomination, count) in wallet.denomination_counts() {
        println!("  {} x {}", denomination.label(), count);
    }
    println!("Total balance: {}", format_balance(wallet.balance()));

    println!("\nSetting a savings goal of 100 euros...");
    wallet.set_savings_goal("100".parse()?).await;
    println!(
        "Progress: {:.0}% (reached: {})",
        wallet.goal_progress() * 100.0,
        wallet.goal_reached()
    );

    println!("\nCalculating change for a 12.50 euro purchase paid with 20 euros:");
    let result = compute_change(&"12.50".parse()?, &"20.00".parse()?);
    println!("  {}", result.announcement());
    if let ChangeResult::ChangeDue { breakdown, .. } = &result {
        for (denomination, count) in breakdown {
            println!("  {} x {}", count, denomination.label());
        }
    }

    println!("\nTransaction history (newest first):");
    for transaction in wallet.history() {
        println!(
            "  {:?} {} at {}",
            transaction.direction,
            format_balance(&transaction.amount),
            transaction.timestamp
        );
    }

    Ok(())
}
