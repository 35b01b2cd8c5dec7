//! # Ledger dApp Demo
//!
//! Runs both apps against the in-memory ledger:
//!
//! 1. Initialize telemetry from the environment
//! 2. Load `RuntimeConfig` (defaults + `LD_*` overrides)
//! 3. Register a business, record revenue, print the dashboard
//! 4. Cook a pizza, print its layout
//! 5. Dump metrics and shut down

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use dapp_runtime::{DappContext, RuntimeConfig};
use dapp_telemetry::{encode_metrics, init_telemetry, TelemetryConfig};
use ld_01_transaction_builder::{Topping, ToppingCounts};
use ld_02_read_model::{eligible_lenders, format_idr};
use ld_03_mutation_coordinator::MutationOutcome;
use shared_ledger::InMemoryLedger;
use shared_types::Address;
use tracing::info;

/// Signer of the demo wallet.
const DEMO_ACCOUNT: [u8; 32] = [0x42; 32];

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry = init_telemetry(TelemetryConfig::from_env())
        .context("Failed to initialize telemetry")?;

    let config = RuntimeConfig::from_env().context("Invalid LD_* configuration")?;
    let account = Address::from_bytes(DEMO_ACCOUNT);
    let ledger = Arc::new(InMemoryLedger::new(account.clone()).with_latency(Duration::from_millis(25)));
    let context = DappContext::new(ledger, config, Some(account))?;

    info!("===========================================");
    info!("  Kredith + Pack a Pizza (in-memory ledger)");
    info!("===========================================");

    run_reputation(&context).await?;
    run_pizza(&context).await?;

    println!("\n{}", encode_metrics()?);
    context.shutdown().await;
    Ok(())
}

async fn run_reputation(context: &DappContext) -> Result<()> {
    let session = context.reputation();

    if session.resume().await?.is_none() {
        expect_confirmed(session.register("Kopi Senja", "F&B").await?)?;
    }
    expect_confirmed(session.record_revenue(15_000_000, "Catering order").await?)?;

    let Some(state) = session.view() else {
        bail!("no business view after confirmation");
    };
    let view = &state.view;
    println!("{} ({})", view.name, view.category);
    println!("  revenue:     Rp {}", format_idr(view.revenue));
    println!("  tier:        {}", view.tier().as_str());
    println!("  trust score: {}", view.trust_score());
    println!("  milestone:   {}", view.next_milestone());
    for entry in session.history() {
        println!(
            "  {}  {}  +Rp {}",
            entry.date_label(),
            entry.description,
            format_idr(entry.amount)
        );
    }
    for lender in eligible_lenders(view.tier()) {
        println!("  eligible:    {} (up to Rp {})", lender.name, format_idr(lender.max_loan));
    }
    Ok(())
}

async fn run_pizza(context: &DappContext) -> Result<()> {
    let session = context.pizza();

    let mut toppings = ToppingCounts::default();
    toppings.set(Topping::Pepperoni, 8);
    toppings.set(Topping::Cheese, 12);
    toppings.set(Topping::Chives, 3);
    expect_confirmed(session.cook(toppings).await?)?;

    for (topping, glyphs) in session.layout().unwrap_or_default() {
        println!("{:>10}: {} glyphs", topping.field_name(), glyphs.len());
    }
    Ok(())
}

fn expect_confirmed(outcome: MutationOutcome) -> Result<()> {
    match outcome {
        MutationOutcome::Confirmed(effects) => {
            info!(digest = %effects.digest, "Confirmed");
            Ok(())
        }
        MutationOutcome::Failed(error) => bail!("mutation failed: {}", error),
        MutationOutcome::Abandoned => bail!("mutation abandoned"),
    }
}
