//! InvoiceChain Integrity Ledger
//!
//! Append-only, hash-chained record of invoice snapshots with a
//! proof-of-work throttle on block creation and a full-chain
//! verification pass.
//!
//! # Architecture
//!
//! - **Append-only**: blocks are never modified or deleted once mined
//! - **Hash linkage**: every block commits to its predecessor's hash
//! - **Canonical hashing**: sorted-key JSON makes every hash reproducible
//! - **Single writer**: one mutex around enqueue and mine+persist
//!
//! # Invariants
//!
//! - `chain[i].previous_hash == chain[i-1].hash` for all i >= 1
//! - Every non-genesis block hash meets the configured difficulty
//! - Recomputing any stored hash from current fields reproduces it,
//!   or the chain is tampered

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod canonical;
pub mod clock;
pub mod config;
pub mod contract;
pub mod error;
pub mod ledger;
pub mod metrics;
pub mod store;
pub mod types;

// Re-exports
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, MiningConfig};
pub use contract::{
    ContractRegistry, ContractStatus, ExecutionOutcome, PaymentContract, ReleaseConditions,
    TriggerEvent,
};
pub use error::{Error, Result};
pub use ledger::IntegrityLedger;
pub use store::ChainStore;
pub use types::{
    content_hash, Block, ChainStats, InvoiceSnapshot, LineItem, Transaction, TxKind, TxPayload,
    VerificationReport,
};
