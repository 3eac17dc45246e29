//! Main ledger orchestration layer
//!
//! Ties together the canonical hashing, chain store, and metrics into
//! the high-level recording and verification API.
//!
//! # Example
//!
//! ```no_run
//! use integrity_ledger::{Config, IntegrityLedger};
//!
//! fn main() -> integrity_ledger::Result<()> {
//!     let config = Config::default();
//!     let ledger = IntegrityLedger::open(config)?;
//!
//!     // let hash = ledger.record(invoice_id, &snapshot)?;
//!     // ledger.mine_pending()?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Concurrency
//!
//! The API is synchronous. Chain and pending queue sit behind a single
//! mutex, so "enqueue transaction" and "mine + persist" are mutually
//! exclusive: two concurrent mining calls can never read the same
//! predecessor and append conflicting blocks at one index.

use crate::{
    clock::{Clock, SystemClock},
    metrics::Metrics,
    store::ChainStore,
    types::{content_hash, Block, ChainStats, InvoiceSnapshot, Transaction, VerificationReport},
    Config, Error, LineItem, Result,
};
use parking_lot::Mutex;
use std::sync::Arc;

struct ChainState {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
}

/// Hash-chained, file-persisted integrity ledger
///
/// Sole owner of the chain and the pending-transaction queue. Created
/// once per process; [`IntegrityLedger::open`] loads the persisted chain
/// (or starts a fresh one) and runs the startup integrity check.
pub struct IntegrityLedger {
    state: Mutex<ChainState>,
    store: ChainStore,
    clock: Arc<dyn Clock>,
    config: Config,
    metrics: Metrics,
}

impl std::fmt::Debug for IntegrityLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntegrityLedger")
            .field("store", &self.store)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl IntegrityLedger {
    /// Open the ledger with configuration
    ///
    /// Loads the persisted chain. An absent file falls back to a fresh
    /// genesis block, which is saved immediately. A file that exists but
    /// cannot be decoded surfaces [`Error::CorruptChain`]; a chain that
    /// fails verification surfaces [`Error::ChainIntegrity`]. Neither is
    /// silently discarded - recovery is the operator's call, via
    /// [`IntegrityLedger::reinitialize`].
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;

        let store = ChainStore::new(config.chain_path());
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let metrics = Metrics::new()?;

        let chain = match store.load()? {
            Some(chain) => {
                if !Self::verify_blocks(&chain) {
                    metrics.integrity_failures_total.inc();
                    return Err(Error::ChainIntegrity(format!(
                        "persisted chain at {} failed verification; refusing to reinitialize",
                        store.path().display()
                    )));
                }
                tracing::info!(blocks = chain.len(), "Loaded persisted chain");
                chain
            }
            None => {
                let genesis = Block::genesis(clock.now())?;
                let chain = vec![genesis];
                store.save(&chain)?;
                tracing::info!(path = %store.path().display(), "Initialized fresh chain");
                chain
            }
        };

        metrics.chain_height.set(chain.len() as i64);

        Ok(Self {
            state: Mutex::new(ChainState {
                chain,
                pending: Vec::new(),
            }),
            store,
            clock,
            config,
            metrics,
        })
    }

    /// Replace the clock (for deterministic tests)
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Metrics collector for this ledger
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Record an invoice snapshot as a pending transaction
    ///
    /// The transaction is hashed and queued; it reaches the chain on the
    /// next [`IntegrityLedger::mine_pending`]. Returns the transaction
    /// hash for the caller to attach to the originating invoice.
    pub fn record(&self, subject_id: u64, snapshot: &InvoiceSnapshot) -> Result<String> {
        let tx = Transaction::for_invoice(subject_id, snapshot, self.clock.now())?;
        let hash = tx.hash.clone();

        let mut state = self.state.lock();
        state.pending.push(tx);
        self.metrics.transactions_total.inc();

        tracing::info!(
            subject_id,
            invoice_number = %snapshot.invoice_number,
            hash = %hash,
            "Queued record transaction"
        );

        Ok(hash)
    }

    /// Mine all pending transactions into one block and persist the chain
    ///
    /// Returns `Ok(None)` when no transaction is pending. On success the
    /// block has been appended and the pending queue cleared; a save
    /// failure after the append still surfaces as `Err` so callers know
    /// durability was lost.
    pub fn mine_pending(&self) -> Result<Option<Block>> {
        let mut state = self.state.lock();
        if state.pending.is_empty() {
            return Ok(None);
        }

        let previous = match state.chain.last() {
            Some(block) => block.clone(),
            None => Block::genesis(self.clock.now())?,
        };

        let transactions = state.pending.clone();
        let block = self.mine(&previous, transactions, self.clock.now())?;

        state.chain.push(block.clone());
        state.pending.clear();
        self.metrics.blocks_total.inc();
        self.metrics.chain_height.set(state.chain.len() as i64);

        tracing::info!(
            index = block.index,
            nonce = block.nonce,
            transactions = block.transactions.len(),
            hash = %block.hash,
            "Mined block"
        );

        // Persisted while still holding the lock, so a concurrent miner
        // cannot interleave between append and save.
        self.store.save(&state.chain)?;

        Ok(Some(block))
    }

    /// Record a snapshot and commit it in one call
    ///
    /// Convenience path for callers that want one block per record.
    pub fn record_and_mine(&self, subject_id: u64, snapshot: &InvoiceSnapshot) -> Result<String> {
        let hash = self.record(subject_id, snapshot)?;
        self.mine_pending()?;
        Ok(hash)
    }

    /// Nonce search: increment until the hash meets the difficulty target
    fn mine(&self, previous: &Block, transactions: Vec<Transaction>, timestamp: f64) -> Result<Block> {
        let difficulty = self.config.mining.difficulty;
        let cap = self.config.mining.max_iterations;

        let mut block = Block {
            index: previous.index + 1,
            timestamp,
            transactions,
            previous_hash: previous.hash.clone(),
            nonce: 0,
            hash: String::new(),
        };

        let mut iterations: u64 = 0;
        loop {
            block.hash = block.compute_hash()?;
            iterations += 1;

            if block.meets_difficulty(difficulty) {
                self.metrics.mining_iterations.observe(iterations as f64);
                return Ok(block);
            }

            if iterations >= cap {
                return Err(Error::MiningExhausted {
                    iterations,
                    difficulty,
                });
            }

            block.nonce += 1;
        }
    }

    /// Verify the whole chain
    ///
    /// For every block past genesis: recompute its hash from current
    /// fields and check the link to the prior block's stored hash.
    /// Fail-fast; idempotent on an unchanged chain.
    pub fn verify_chain_integrity(&self) -> bool {
        let state = self.state.lock();
        let ok = Self::verify_blocks(&state.chain);
        if !ok {
            self.metrics.integrity_failures_total.inc();
        }
        ok
    }

    fn verify_blocks(chain: &[Block]) -> bool {
        for i in 1..chain.len() {
            let current = &chain[i];
            let previous = &chain[i - 1];

            match current.compute_hash() {
                Ok(recomputed) if recomputed == current.hash => {}
                _ => {
                    tracing::warn!(index = current.index, "Block hash mismatch");
                    return false;
                }
            }

            if current.previous_hash != previous.hash {
                tracing::warn!(index = current.index, "Broken link to previous block");
                return false;
            }
        }
        true
    }

    /// Verify a recorded invoice against its current detail lines
    ///
    /// Scans blocks in chain order; the first transaction matching
    /// `subject_id` wins (later updates for the same subject are not
    /// consulted). Recomputes the content hash over `current_lines` and
    /// compares it with the hash stored at recording time. Never errors:
    /// missing records and detected edits come back as structured
    /// not-verified reports.
    pub fn verify_record_integrity(
        &self,
        subject_id: u64,
        current_lines: &[LineItem],
    ) -> VerificationReport {
        let state = self.state.lock();

        let found = state.chain.iter().find_map(|block| {
            block
                .transactions
                .iter()
                .find(|tx| tx.subject_id == subject_id)
                .map(|tx| (block.index, tx.clone()))
        });

        let (block_index, tx) = match found {
            Some(found) => found,
            None => {
                return VerificationReport::not_found(format!(
                    "No ledger transaction for subject {}",
                    subject_id
                ))
            }
        };
        drop(state);

        let current_hash = match content_hash(current_lines) {
            Ok(hash) => hash,
            Err(e) => return VerificationReport::not_found(format!("Hashing failed: {}", e)),
        };

        let matches = current_hash == tx.payload.content_hash;
        VerificationReport {
            verified: matches,
            ledger_hash: Some(tx.hash),
            timestamp: Some(tx.timestamp),
            block_index: Some(block_index),
            integrity_check: matches,
            reason: if matches {
                None
            } else {
                Some("Invoice data has been modified since ledger entry".to_string())
            },
        }
    }

    /// Aggregate chain statistics
    pub fn stats(&self) -> ChainStats {
        let state = self.state.lock();
        ChainStats {
            total_blocks: state.chain.len() as u64,
            total_transactions: state
                .chain
                .iter()
                .map(|b| b.transactions.len() as u64)
                .sum(),
            chain_integrity: Self::verify_blocks(&state.chain),
            latest_block_time: state.chain.last().map(|b| b.timestamp),
        }
    }

    /// Number of blocks, genesis included
    pub fn chain_len(&self) -> usize {
        self.state.lock().chain.len()
    }

    /// Number of queued transactions
    pub fn pending_len(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Clone of the newest block
    pub fn latest_block(&self) -> Option<Block> {
        self.state.lock().chain.last().cloned()
    }

    /// Clone of the block at `index`
    pub fn block_at(&self, index: usize) -> Option<Block> {
        self.state.lock().chain.get(index).cloned()
    }

    /// Discard the chain and restart from a fresh genesis block
    ///
    /// The deliberate operator path after a failed integrity check.
    /// History is lost; the fresh chain is persisted immediately.
    pub fn reinitialize(&self) -> Result<()> {
        let mut state = self.state.lock();
        let genesis = Block::genesis(self.clock.now())?;
        state.chain = vec![genesis];
        state.pending.clear();
        self.metrics.chain_height.set(1);
        self.store.save(&state.chain)?;

        tracing::warn!(path = %self.store.path().display(), "Chain reinitialized from genesis");
        Ok(())
    }
}
