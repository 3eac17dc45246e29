//! Metrics collection for observability
//!
//! Prometheus metrics for monitoring the chain.
//!
//! # Metrics
//!
//! - `chain_transactions_total` - Transactions recorded
//! - `chain_blocks_total` - Blocks mined
//! - `chain_mining_iterations` - Histogram of nonce search lengths
//! - `chain_integrity_failures_total` - Failed verification passes
//! - `chain_height` - Current chain length

use prometheus::{Histogram, HistogramOpts, IntCounter, IntGauge, Registry};
use std::sync::Arc;

/// Metrics collector
///
/// Each ledger owns its registry, so multiple instances in one process
/// (tests, mostly) never collide on registration.
#[derive(Clone)]
pub struct Metrics {
    /// Transactions recorded
    pub transactions_total: IntCounter,

    /// Blocks mined
    pub blocks_total: IntCounter,

    /// Nonce search length histogram
    pub mining_iterations: Histogram,

    /// Failed full-chain verification passes
    pub integrity_failures_total: IntCounter,

    /// Current chain length
    pub chain_height: IntGauge,

    /// Prometheus registry
    pub registry: Arc<Registry>,
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> prometheus::Result<Self> {
        let registry = Arc::new(Registry::new());

        let transactions_total =
            IntCounter::new("chain_transactions_total", "Transactions recorded")?;
        registry.register(Box::new(transactions_total.clone()))?;

        let blocks_total = IntCounter::new("chain_blocks_total", "Blocks mined")?;
        registry.register(Box::new(blocks_total.clone()))?;

        let mining_iterations = Histogram::with_opts(
            HistogramOpts::new(
                "chain_mining_iterations",
                "Histogram of nonce search lengths",
            )
            .buckets(vec![
                16.0, 256.0, 4_096.0, 65_536.0, 1_048_576.0, 16_777_216.0,
            ]),
        )?;
        registry.register(Box::new(mining_iterations.clone()))?;

        let integrity_failures_total = IntCounter::new(
            "chain_integrity_failures_total",
            "Failed full-chain verification passes",
        )?;
        registry.register(Box::new(integrity_failures_total.clone()))?;

        let chain_height = IntGauge::new("chain_height", "Current chain length")?;
        registry.register(Box::new(chain_height.clone()))?;

        Ok(Self {
            transactions_total,
            blocks_total,
            mining_iterations,
            integrity_failures_total,
            chain_height,
            registry,
        })
    }
}
