//! Core types for the integrity chain
//!
//! All types are designed for:
//! - Deterministic hashing (canonical JSON, sorted keys)
//! - Exact arithmetic (Decimal for money)
//! - Human-readable persistence (the chain file is plain JSON)

use crate::{canonical, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single invoice detail line
///
/// Exactly the fields that participate in the content hash. Richer
/// business-side line items are stripped down to this shape before
/// recording, so cosmetic fields never affect integrity checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item description
    pub description: String,

    /// Quantity
    pub quantity: Decimal,

    /// Price per unit
    pub unit_price: Decimal,

    /// Line total
    pub total_amount: Decimal,
}

/// Snapshot of an invoice's fields at recording time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceSnapshot {
    /// Human-facing invoice number
    pub invoice_number: String,

    /// Owning client
    pub client_id: u64,

    /// Invoice total
    pub total_amount: Decimal,

    /// Invoice date
    pub invoice_date: NaiveDate,

    /// Detail lines, in invoice order
    pub line_items: Vec<LineItem>,
}

/// Hash of the detail lines only
///
/// Detects later edits to descriptions, quantities, or prices
/// independently of metadata changes on the invoice itself.
pub fn content_hash(lines: &[LineItem]) -> Result<String> {
    canonical::hash_canonical(&lines)
}

/// Transaction kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxKind {
    /// Snapshot of a record at creation time
    #[serde(rename = "record-creation")]
    RecordCreation,
}

/// Top-level snapshot fields committed to the chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxPayload {
    /// Invoice number at recording time
    pub invoice_number: String,

    /// Owning client
    pub client_id: u64,

    /// Invoice total at recording time
    pub total_amount: Decimal,

    /// Invoice date at recording time
    pub invoice_date: NaiveDate,

    /// Hash over the detail lines (see [`content_hash`])
    pub content_hash: String,
}

/// A single hashed record describing an invoice snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Kind tag
    pub kind: TxKind,

    /// Identifier of the invoice this transaction describes
    pub subject_id: u64,

    /// Creation time (seconds since epoch)
    pub timestamp: f64,

    /// Snapshot payload
    pub payload: TxPayload,

    /// SHA-256 hex over the canonical serialization of all other fields
    pub hash: String,
}

impl Transaction {
    /// Build a record-creation transaction for an invoice snapshot
    ///
    /// Pure except for the caller-supplied timestamp: identical snapshots
    /// with the same timestamp always produce the same transaction hash.
    pub fn for_invoice(
        subject_id: u64,
        snapshot: &InvoiceSnapshot,
        timestamp: f64,
    ) -> Result<Self> {
        let content_hash = content_hash(&snapshot.line_items)?;

        let mut tx = Self {
            kind: TxKind::RecordCreation,
            subject_id,
            timestamp,
            payload: TxPayload {
                invoice_number: snapshot.invoice_number.clone(),
                client_id: snapshot.client_id,
                total_amount: snapshot.total_amount,
                invoice_date: snapshot.invoice_date,
                content_hash,
            },
            hash: String::new(),
        };
        tx.hash = tx.compute_hash()?;
        Ok(tx)
    }

    /// Recompute the transaction hash from current fields
    pub fn compute_hash(&self) -> Result<String> {
        canonical::hash_excluding_own(self)
    }
}

/// A batch of transactions plus linkage metadata and a proof-of-work nonce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// 0 for genesis, monotonically increasing thereafter
    pub index: u64,

    /// Block creation time (seconds since epoch)
    pub timestamp: f64,

    /// Transactions in insertion order; empty only for genesis
    pub transactions: Vec<Transaction>,

    /// Hash of the prior block, `"0"` for genesis
    pub previous_hash: String,

    /// Proof-of-work nonce
    pub nonce: u64,

    /// SHA-256 hex over (index, timestamp, transactions, previous_hash, nonce)
    pub hash: String,
}

impl Block {
    /// Hash of a nonexistent predecessor
    pub const NO_PREVIOUS: &'static str = "0";

    /// Create the genesis block
    pub fn genesis(timestamp: f64) -> Result<Self> {
        let mut block = Self {
            index: 0,
            timestamp,
            transactions: Vec::new(),
            previous_hash: Self::NO_PREVIOUS.to_string(),
            nonce: 0,
            hash: String::new(),
        };
        block.hash = block.compute_hash()?;
        Ok(block)
    }

    /// Recompute the block hash from current fields
    ///
    /// The stored `hash` does not participate in its own preimage.
    pub fn compute_hash(&self) -> Result<String> {
        canonical::hash_excluding_own(self)
    }

    /// Whether the stored hash meets a leading-zero difficulty target
    pub fn meets_difficulty(&self, difficulty: usize) -> bool {
        self.hash.len() >= difficulty && self.hash.bytes().take(difficulty).all(|b| b == b'0')
    }
}

/// Outcome of a per-record integrity check
///
/// Never an error: a missing record or a detected modification is a
/// structured "not verified" result with a reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Whether the record checks out against the chain
    pub verified: bool,

    /// Transaction hash stored on the chain, if the record was found
    pub ledger_hash: Option<String>,

    /// Recording time, if the record was found
    pub timestamp: Option<f64>,

    /// Index of the block holding the transaction
    pub block_index: Option<u64>,

    /// Whether the recomputed content hash matched the stored one
    pub integrity_check: bool,

    /// Why verification failed, when it did
    pub reason: Option<String>,
}

impl VerificationReport {
    /// Report for a subject with no transaction on the chain
    pub fn not_found(reason: impl Into<String>) -> Self {
        Self {
            verified: false,
            ledger_hash: None,
            timestamp: None,
            block_index: None,
            integrity_check: false,
            reason: Some(reason.into()),
        }
    }
}

/// Aggregate chain statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainStats {
    /// Number of blocks, genesis included
    pub total_blocks: u64,

    /// Number of transactions across all blocks
    pub total_transactions: u64,

    /// Result of a full-chain verification pass
    pub chain_integrity: bool,

    /// Timestamp of the newest block
    pub latest_block_time: Option<f64>,
}
