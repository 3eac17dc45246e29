//! Chain inspection binary
//!
//! Opens the persisted chain, runs the full verification pass, and
//! reports statistics. Exits non-zero when the chain does not verify so
//! operators can wire it into health checks.

use integrity_ledger::{Config, IntegrityLedger};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting chain inspection");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(path = %config.chain_path().display(), "Inspecting chain file");

    let ledger = IntegrityLedger::open(config)?;
    let stats = ledger.stats();

    tracing::info!(
        blocks = stats.total_blocks,
        transactions = stats.total_transactions,
        integrity = stats.chain_integrity,
        latest_block_time = stats.latest_block_time,
        "Chain status"
    );

    if !stats.chain_integrity {
        tracing::error!("Chain failed verification; operator intervention required");
        std::process::exit(1);
    }

    Ok(())
}
