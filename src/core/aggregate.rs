//! Aggregation engine - computes the ledger's derived totals.
//!
//! Recomputation is pure and total: a single pass over an immutable entry
//! snapshot, classifying each scope-matching entry into exactly one of
//! revenue, expenditure (plus its fund bucket), or the available-only sum.
//! It never fails for well-typed input and never touches the store.

use rust_decimal::Decimal;

use crate::entities::{BudgetEntry, BudgetOverride, EntryType, Fund, Impact, Scope};

/// Ledger expenditure broken down by fund.
///
/// Fund buckets partition the ledger expenditure: every funded expense lands
/// in exactly one bucket. Overrides never touch these - they adjust only the
/// three top-line numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FundUtilization {
    /// Expenditure booked against the operational fund.
    pub operational: Decimal,
    /// Expenditure booked against the project fund.
    pub project: Decimal,
    /// Expenditure booked against the trust fund.
    pub trust: Decimal,
}

impl FundUtilization {
    /// Bucket for one fund.
    #[must_use]
    pub const fn get(&self, fund: Fund) -> Decimal {
        match fund {
            Fund::Operational => self.operational,
            Fund::Project => self.project,
            Fund::Trust => self.trust,
        }
    }

    /// Sum over all three buckets.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.operational + self.project + self.trust
    }

    fn slot_mut(&mut self, fund: Fund) -> &mut Decimal {
        match fund {
            Fund::Operational => &mut self.operational,
            Fund::Project => &mut self.project,
            Fund::Trust => &mut self.trust,
        }
    }
}

/// The derived totals for one department scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerTotals {
    /// Ledger income plus the revenue override delta.
    pub revenue: Decimal,
    /// Ledger expenditure plus the expenditure override delta.
    pub expenditure: Decimal,
    /// Available balance: raw revenue minus raw expenditure, plus the
    /// available-only sum, plus the available override delta.
    pub available: Decimal,
    /// Ledger expenditure by fund, override-free.
    pub funds: FundUtilization,
}

/// Computes the derived totals for `scope` from the full entry snapshot,
/// merging the scope's override additively.
///
/// The revenue/expenditure override deltas shift only their own displayed
/// totals and are *not* double-counted into `available`; only
/// `override.available` reaches the available balance. Downstream consumers
/// depend on these two adjustment paths staying independent.
#[must_use]
pub fn summarize(entries: &[BudgetEntry], scope: &Scope, adjustment: BudgetOverride) -> LedgerTotals {
    let mut revenue = Decimal::ZERO;
    let mut expenditure = Decimal::ZERO;
    let mut available_only = Decimal::ZERO;
    let mut funds = FundUtilization::default();

    for entry in entries.iter().filter(|e| scope.matches(&e.department)) {
        match (entry.impact, entry.entry_type) {
            (Impact::AvailableOnly, _) => available_only += entry.amount,
            (Impact::Ledger, EntryType::Income) => revenue += entry.amount,
            (Impact::Ledger, EntryType::Expense) => {
                expenditure += entry.amount;
                // Legacy expenses can predate the fund requirement; they
                // count in expenditure but in no bucket.
                if let Some(fund) = entry.fund {
                    *funds.slot_mut(fund) += entry.amount;
                }
            }
        }
    }

    LedgerTotals {
        revenue: revenue + adjustment.revenue,
        expenditure: expenditure + adjustment.expenditure,
        available: revenue - expenditure + available_only + adjustment.available,
        funds,
    }
}
