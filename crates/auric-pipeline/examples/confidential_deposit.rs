//! Run a confidential deposit end to end against the in-memory ledger.
//!
//! ```text
//! cargo run -p auric-pipeline --example confidential_deposit
//! RUST_LOG=debug cargo run -p auric-pipeline --example confidential_deposit
//! ```

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use auric_core::{Amount, Operation};
use auric_gateway::mock::InMemoryLedger;
use auric_gateway::SessionAddress;
use auric_pipeline::{BalanceCache, OperationSubmitter, PipelineConfig, SessionContext};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let ledger = Arc::new(InMemoryLedger::new());
    let address = SessionAddress::new("0xd00d00000000000000000000000000000000cafe")?;
    let cache = BalanceCache::default();

    let submitter = OperationSubmitter::new(
        SessionContext::connected(address),
        Arc::clone(&ledger),
        cache.clone(),
        PipelineConfig::default(),
    );

    let outcome = submitter
        .submit(Operation::Deposit {
            amount: Amount::parse("0.1")?,
        })
        .await;

    println!("terminal state: {}", outcome.state);
    if let Some(refresh) = outcome.balance_refresh {
        refresh.await?;
    }
    if let Some(balance) = cache.get() {
        println!("vault balance:  {balance}");
    }
    for event in ledger.events() {
        println!("ledger event:   {event:?}");
    }
    Ok(())
}
