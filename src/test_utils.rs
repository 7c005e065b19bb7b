//! Shared test utilities for `CouncilLedger`.
//!
//! This module provides common helper functions for building test entries
//! and drafts with sensible defaults, and for wiring a repository over the
//! in-memory store.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use crate::entities::{BudgetEntry, EntryDraft, EntryType, Fund, Impact};
use crate::store::{EntryRepository, MemoryStore};

/// Initializes tracing output for tests; safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

/// Fixed base timestamp so test entries order deterministically.
fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Builds an entry with full control over the classification fields.
/// `seq` drives the id and creation timestamp: higher `seq` means newer.
pub fn entry_at(
    seq: usize,
    title: &str,
    amount: Decimal,
    entry_type: EntryType,
    impact: Impact,
    department: &str,
    fund: Option<Fund>,
) -> BudgetEntry {
    let created_at = base_time() + Duration::minutes(i64::try_from(seq).unwrap_or(0));
    BudgetEntry {
        id: format!("{seq:08}"),
        title: title.to_string(),
        amount,
        entry_type,
        category: String::new(),
        department: department.to_string(),
        fund,
        date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap_or_default(),
        approved_by: "Alex Reyes".to_string(),
        impact,
        created_at,
        updated_at: created_at,
    }
}

/// A ledger income entry.
pub fn income(seq: usize, department: &str, amount: Decimal) -> BudgetEntry {
    entry_at(
        seq,
        "Income entry",
        amount,
        EntryType::Income,
        Impact::Ledger,
        department,
        None,
    )
}

/// A ledger expense entry booked against `fund`.
pub fn expense(seq: usize, department: &str, amount: Decimal, fund: Fund) -> BudgetEntry {
    entry_at(
        seq,
        "Expense entry",
        amount,
        EntryType::Expense,
        Impact::Ledger,
        department,
        Some(fund),
    )
}

/// An available-only balance adjustment entry.
pub fn adjustment(seq: usize, department: &str, amount: Decimal) -> BudgetEntry {
    entry_at(
        seq,
        "Balance adjustment",
        amount,
        EntryType::Income,
        Impact::AvailableOnly,
        department,
        None,
    )
}

/// Builds a draft with sensible defaults.
///
/// # Defaults
/// * `category`: "Test"
/// * `department`: "general"
/// * `fund`: operational for expenses, absent otherwise
/// * `impact`: ledger
pub fn draft(title: &str, amount: Decimal, entry_type: EntryType) -> EntryDraft {
    let fund = match entry_type {
        EntryType::Expense => Some(Fund::Operational),
        EntryType::Income => None,
    };

    EntryDraft {
        title: title.to_string(),
        amount,
        entry_type,
        category: "Test".to_string(),
        department: "general".to_string(),
        fund,
        date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap_or_default(),
        approved_by: "Alex Reyes".to_string(),
        impact: Impact::Ledger,
    }
}

/// Wires an entry repository over a fresh in-memory store using the default
/// entries collection name.
pub fn setup_repository() -> (Arc<MemoryStore>, EntryRepository<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let repo = EntryRepository::new(Arc::clone(&store), "budgetEntries");
    (store, repo)
}
