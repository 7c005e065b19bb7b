//! Budget entry - one line item of the shared ledger.
//!
//! Each entry carries a type (income/expense), an impact (full ledger or
//! available-balance only), an organizational department, and, for ledger
//! expenses, the fund the money is booked against. Amounts are stored
//! non-negative; the sign is derived from the type at display time.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Scope key under which the organization-wide override document is stored.
/// `"ALL"` is reserved: it is never a valid department name.
pub const ALL_SCOPE_KEY: &str = "ALL";

/// Whether an entry adds to or draws from the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryType {
    /// Money received.
    Income,
    /// Money spent.
    Expense,
}

impl EntryType {
    /// Stored wire literal, also used by the search filter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }
}

/// Earmarked expenditure category. Required on every ledger expense entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fund {
    /// Day-to-day operating budget.
    Operational,
    /// Project-earmarked budget.
    Project,
    /// Trust fund.
    Trust,
}

impl Fund {
    /// All fund keys, in stored order.
    pub const ALL: [Self; 3] = [Self::Operational, Self::Project, Self::Trust];

    /// Stored wire literal, also used by the search filter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Operational => "operational",
            Self::Project => "project",
            Self::Trust => "trust",
        }
    }
}

/// Which totals an entry counts toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Impact {
    /// Counts toward revenue/expenditure and, through them, the available
    /// balance. The default for ordinary entries.
    Ledger,
    /// Counts only toward the available balance. Used for manual balance
    /// corrections that must not masquerade as income/expense activity.
    AvailableOnly,
}

impl Impact {
    /// Stored wire literal, also used by the search filter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ledger => "LEDGER",
            Self::AvailableOnly => "AVAILABLE_ONLY",
        }
    }
}

/// One ledger line item, as normalized from the stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetEntry {
    /// Opaque unique identifier, assigned by the store on creation.
    pub id: String,
    /// Free-text description. Non-empty on the write path; legacy documents
    /// may hold an empty title after normalization.
    pub title: String,
    /// Non-negative amount. Zero is rejected at entry time but tolerated on
    /// read (legacy data).
    pub amount: Decimal,
    /// Income or expense. Fixed to income for available-only entries.
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Free-text label; defaulted from type/impact when left blank.
    pub category: String,
    /// Organizational unit this entry belongs to. The organization-wide
    /// aggregate (`"ALL"`) is a view-time scope, never a stored value.
    pub department: String,
    /// Fund the amount is booked against. Present on every ledger expense
    /// written through this crate; may be absent on legacy documents.
    pub fund: Option<Fund>,
    /// Calendar date of the transaction.
    pub date: NaiveDate,
    /// Name of the acting editor, captured at write time.
    pub approved_by: String,
    /// Which totals this entry counts toward.
    pub impact: Impact,
    /// Store-assigned creation timestamp. Ordering only - never part of the
    /// aggregation math.
    pub created_at: DateTime<Utc>,
    /// Store-assigned last-modification timestamp. Ordering only.
    pub updated_at: DateTime<Utc>,
}

/// Write-path input for creating or replacing a ledger entry.
///
/// A draft holds everything a [`BudgetEntry`] holds except the id and the
/// store-assigned timestamps. [`EntryDraft::validate`] enforces the entry
/// rules before any write; [`EntryDraft::document`] produces the sanitized
/// document the store receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDraft {
    /// Free-text description, required.
    pub title: String,
    /// Amount, must be strictly positive.
    pub amount: Decimal,
    /// Income or expense.
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Free-text label; defaulted when blank.
    pub category: String,
    /// Organizational unit.
    pub department: String,
    /// Fund, required when this is a ledger expense.
    pub fund: Option<Fund>,
    /// Calendar date of the transaction.
    pub date: NaiveDate,
    /// Name of the acting editor.
    pub approved_by: String,
    /// Which totals the entry counts toward.
    pub impact: Impact,
}

impl EntryDraft {
    /// Checks the write-path entry rules.
    ///
    /// # Errors
    /// * [`Error::EmptyTitle`] when the title trims to nothing
    /// * [`Error::InvalidAmount`] when the amount is zero or negative
    /// * [`Error::MissingFund`] when a ledger expense names no fund
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::EmptyTitle);
        }

        if self.amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount {
                amount: self.amount,
            });
        }

        // Available-only entries never draw from a fund, so the fund rule
        // applies to ledger expenses only.
        if self.impact == Impact::Ledger
            && self.entry_type == EntryType::Expense
            && self.fund.is_none()
        {
            return Err(Error::MissingFund);
        }

        Ok(())
    }

    /// Category label applied when the editor leaves the field blank.
    #[must_use]
    pub const fn default_category(&self) -> &'static str {
        default_category(self.impact, self.entry_type)
    }

    /// Produces the sanitized stored document: trimmed title, defaulted
    /// category, and the type forced to income for available-only entries.
    /// The store adds the id and timestamps.
    pub fn document(&self) -> Result<serde_json::Value> {
        let mut draft = self.clone();
        draft.title = draft.title.trim().to_string();
        if draft.impact == Impact::AvailableOnly {
            draft.entry_type = EntryType::Income;
        }
        if draft.category.trim().is_empty() {
            draft.category = draft.default_category().to_string();
        }

        serde_json::to_value(&draft)
            .map_err(|e| Error::transport(format!("failed to encode entry document: {e}")))
    }
}

/// Category label used when an entry of the given impact and type carries a
/// blank category.
#[must_use]
pub const fn default_category(impact: Impact, entry_type: EntryType) -> &'static str {
    match (impact, entry_type) {
        (Impact::AvailableOnly, _) => "Balance Adjustment",
        (Impact::Ledger, EntryType::Income) => "Income",
        (Impact::Ledger, EntryType::Expense) => "Expense",
    }
}

/// Department scope for aggregation, override lookup, and display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Organization-wide: no department filter.
    All,
    /// A single department.
    Department(String),
}

impl Scope {
    /// Scope over one department.
    pub fn department(name: impl Into<String>) -> Self {
        Self::Department(name.into())
    }

    /// Whether an entry in `department` falls inside this scope.
    #[must_use]
    pub fn matches(&self, department: &str) -> bool {
        match self {
            Self::All => true,
            Self::Department(name) => name == department,
        }
    }

    /// The key the scope's override document is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::All => ALL_SCOPE_KEY,
            Self::Department(name) => name,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::draft;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_accepts_well_formed_draft() {
        let d = draft("Homecoming decorations", dec!(120), EntryType::Expense);
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_title() {
        let mut d = draft("", dec!(10), EntryType::Income);
        assert!(matches!(d.validate(), Err(Error::EmptyTitle)));

        d.title = "   ".to_string();
        assert!(matches!(d.validate(), Err(Error::EmptyTitle)));
    }

    #[test]
    fn test_validate_rejects_zero_and_negative_amounts() {
        let mut d = draft("Dues", dec!(0), EntryType::Income);
        assert!(matches!(
            d.validate(),
            Err(Error::InvalidAmount { amount }) if amount == dec!(0)
        ));

        d.amount = dec!(-5);
        assert!(matches!(d.validate(), Err(Error::InvalidAmount { .. })));
    }

    #[test]
    fn test_validate_requires_fund_on_ledger_expense() {
        let mut d = draft("Posters", dec!(40), EntryType::Expense);
        d.fund = None;
        assert!(matches!(d.validate(), Err(Error::MissingFund)));

        d.fund = Some(Fund::Operational);
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_validate_available_only_needs_no_fund() {
        let mut d = draft("Opening balance fix", dec!(75), EntryType::Income);
        d.impact = Impact::AvailableOnly;
        d.fund = None;
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_document_forces_income_for_available_only() {
        let mut d = draft("Correction", dec!(30), EntryType::Expense);
        d.impact = Impact::AvailableOnly;
        d.fund = None;

        let doc = d.document().unwrap();
        assert_eq!(doc["type"], "INCOME");
        assert_eq!(doc["impact"], "AVAILABLE_ONLY");
    }

    #[test]
    fn test_document_defaults_blank_category() {
        let mut d = draft("Bake sale", dec!(200), EntryType::Income);
        d.category = String::new();
        assert_eq!(d.document().unwrap()["category"], "Income");

        let mut d = draft("Venue rental", dec!(300), EntryType::Expense);
        d.category = "  ".to_string();
        assert_eq!(d.document().unwrap()["category"], "Expense");

        let mut d = draft("Carry-over", dec!(10), EntryType::Income);
        d.impact = Impact::AvailableOnly;
        d.category = String::new();
        assert_eq!(d.document().unwrap()["category"], "Balance Adjustment");
    }

    #[test]
    fn test_document_trims_title_and_keeps_category() {
        let mut d = draft("  Club fair  ", dec!(90), EntryType::Income);
        d.category = "Events".to_string();

        let doc = d.document().unwrap();
        assert_eq!(doc["title"], "Club fair");
        assert_eq!(doc["category"], "Events");
    }

    #[test]
    fn test_scope_matching_and_keys() {
        assert!(Scope::All.matches("student-welfare"));
        assert_eq!(Scope::All.key(), ALL_SCOPE_KEY);

        let scope = Scope::department("student-welfare");
        assert!(scope.matches("student-welfare"));
        assert!(!scope.matches("sports"));
        assert_eq!(scope.key(), "student-welfare");
    }

    #[test]
    fn test_wire_literals() {
        assert_eq!(EntryType::Income.as_str(), "INCOME");
        assert_eq!(EntryType::Expense.as_str(), "EXPENSE");
        assert_eq!(Fund::Operational.as_str(), "operational");
        assert_eq!(Fund::Project.as_str(), "project");
        assert_eq!(Fund::Trust.as_str(), "trust");
        assert_eq!(Impact::Ledger.as_str(), "LEDGER");
        assert_eq!(Impact::AvailableOnly.as_str(), "AVAILABLE_ONLY");
    }
}
