//! End-to-end scenario: fresh chain, one recorded invoice, tamper check

use chrono::NaiveDate;
use integrity_ledger::{Config, IntegrityLedger, InvoiceSnapshot, LineItem};
use rust_decimal::Decimal;

fn snapshot() -> InvoiceSnapshot {
    InvoiceSnapshot {
        invoice_number: "INV-0042".to_string(),
        client_id: 42,
        total_amount: Decimal::new(10000, 2), // 100.00
        invoice_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        line_items: vec![LineItem {
            description: "Widget".to_string(),
            quantity: Decimal::from(2),
            unit_price: Decimal::new(5000, 2), // 50.00
            total_amount: Decimal::new(10000, 2),
        }],
    }
}

#[test]
fn fresh_ledger_record_mine_verify_and_detect_edit() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.data_dir = dir.path().to_path_buf();
    config.mining.difficulty = 2;

    // Empty storage: chain is genesis-only and verifies
    let ledger = IntegrityLedger::open(config).unwrap();
    assert_eq!(ledger.chain_len(), 1);
    assert!(ledger.verify_chain_integrity());

    // Record subject 42 and mine
    let tx_hash = ledger.record(42, &snapshot()).unwrap();
    let block = ledger.mine_pending().unwrap().expect("one block mined");

    assert_eq!(ledger.chain_len(), 2);
    assert!(block.hash.starts_with("00"));
    assert_eq!(block.previous_hash, ledger.block_at(0).unwrap().hash);
    assert_eq!(block.transactions.len(), 1);
    assert_eq!(block.transactions[0].hash, tx_hash);

    // Unmodified data verifies
    let report = ledger.verify_record_integrity(42, &snapshot().line_items);
    assert!(report.verified);
    assert_eq!(report.ledger_hash.as_deref(), Some(tx_hash.as_str()));

    // Change the line price 50.00 -> 60.00: verification fails with a
    // modification reason
    let mut edited = snapshot().line_items;
    edited[0].unit_price = Decimal::new(6000, 2);
    let report = ledger.verify_record_integrity(42, &edited);
    assert!(!report.verified);
    assert!(report.reason.unwrap().contains("modified"));

    // The chain itself is still intact; only the external data changed
    assert!(ledger.verify_chain_integrity());
}
