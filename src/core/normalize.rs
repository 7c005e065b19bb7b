//! Classification and normalization of raw stored documents.
//!
//! The remote store holds loosely-typed records: legacy rows predate the
//! current entry form and may carry malformed amounts, unknown funds, or
//! unparseable dates. This module is the single conversion point between
//! those records and the validated [`BudgetEntry`] type. It is total (never
//! fails - malformed fields coerce to safe defaults so historical data stays
//! readable) and idempotent (normalizing an already-normalized entry yields
//! the same entry).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde_json::Value;
use std::str::FromStr;

use crate::entities::entry::default_category;
use crate::entities::{BudgetEntry, BudgetOverride, EntryType, Fund, Impact};
use crate::store::RawDocument;

/// Normalizes one stored document into a well-typed entry.
#[must_use]
pub fn normalize_document(doc: &RawDocument) -> BudgetEntry {
    normalize_record(&doc.id, &doc.data, doc.created_at, doc.updated_at)
}

/// Normalizes a raw record body into a well-typed entry.
///
/// Coercion rules, applied field by field:
/// * `amount` - non-numeric values become zero (zero-amount entries are
///   tolerated on read even though the write path rejects them)
/// * `type` - anything other than the literal `INCOME` is an expense;
///   available-only entries are always income
/// * `fund` - only the three known fund keys are accepted, anything else is
///   absent
/// * `impact` - only the literal `AVAILABLE_ONLY` is recognized
/// * `date` - a `YYYY-MM-DD` string is kept unchanged, RFC 3339 timestamps
///   are reduced to their date, anything else becomes today
/// * `category` - blank values take the type/impact default label
#[must_use]
pub fn normalize_record(
    id: &str,
    data: &Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> BudgetEntry {
    let impact = coerce_impact(data.get("impact"));
    let entry_type = if impact == Impact::AvailableOnly {
        EntryType::Income
    } else {
        coerce_type(data.get("type"))
    };

    let category = string_field(data, "category");
    let category = if category.is_empty() {
        default_category(impact, entry_type).to_string()
    } else {
        category
    };

    BudgetEntry {
        id: id.to_string(),
        title: string_field(data, "title"),
        amount: coerce_amount(data.get("amount")),
        entry_type,
        category,
        department: string_field(data, "department"),
        fund: coerce_fund(data.get("fund")),
        date: coerce_date(data.get("date")),
        approved_by: string_field(data, "approvedBy"),
        impact,
        created_at,
        updated_at,
    }
}

/// Normalizes a stored override record. Missing or malformed fields default
/// to zero - overrides carry no validation beyond numeric coercion.
#[must_use]
pub fn normalize_override(data: &Value) -> BudgetOverride {
    BudgetOverride {
        available: coerce_amount(data.get("available")),
        revenue: coerce_amount(data.get("revenue")),
        expenditure: coerce_amount(data.get("expenditure")),
    }
}

/// Coerces a raw amount to a decimal, defaulting to zero. JSON numbers and
/// decimal strings are accepted; everything else carries no usable value.
#[must_use]
pub fn coerce_amount(value: Option<&Value>) -> Decimal {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Decimal::from)
            .or_else(|| n.as_u64().map(Decimal::from))
            .or_else(|| n.as_f64().and_then(Decimal::from_f64))
            .unwrap_or(Decimal::ZERO),
        Some(Value::String(s)) => Decimal::from_str(s.trim()).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

fn coerce_type(value: Option<&Value>) -> EntryType {
    if value.and_then(Value::as_str) == Some("INCOME") {
        EntryType::Income
    } else {
        EntryType::Expense
    }
}

fn coerce_fund(value: Option<&Value>) -> Option<Fund> {
    match value.and_then(Value::as_str) {
        Some("operational") => Some(Fund::Operational),
        Some("project") => Some(Fund::Project),
        Some("trust") => Some(Fund::Trust),
        _ => None,
    }
}

fn coerce_impact(value: Option<&Value>) -> Impact {
    if value.and_then(Value::as_str) == Some("AVAILABLE_ONLY") {
        Impact::AvailableOnly
    } else {
        Impact::Ledger
    }
}

fn coerce_date(value: Option<&Value>) -> NaiveDate {
    let Some(raw) = value.and_then(Value::as_str) else {
        return Utc::now().date_naive();
    };

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date;
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return timestamp.date_naive();
    }

    Utc::now().date_naive()
}

fn string_field(data: &Value, key: &str) -> String {
    data.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_well_formed_record_passes_through() {
        let data = json!({
            "title": "Sports fest venue",
            "amount": "2500.50",
            "type": "EXPENSE",
            "category": "Events",
            "department": "sports",
            "fund": "operational",
            "date": "2026-02-14",
            "approvedBy": "Dana Cruz",
            "impact": "LEDGER",
        });

        let entry = normalize_record("e1", &data, ts(), ts());
        assert_eq!(entry.title, "Sports fest venue");
        assert_eq!(entry.amount, dec!(2500.50));
        assert_eq!(entry.entry_type, EntryType::Expense);
        assert_eq!(entry.category, "Events");
        assert_eq!(entry.fund, Some(Fund::Operational));
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2026, 2, 14).unwrap());
        assert_eq!(entry.impact, Impact::Ledger);
    }

    #[test]
    fn test_amount_coercion() {
        assert_eq!(coerce_amount(Some(&json!(120))), dec!(120));
        assert_eq!(coerce_amount(Some(&json!(99.25))), dec!(99.25));
        assert_eq!(coerce_amount(Some(&json!("43.10"))), dec!(43.10));
        assert_eq!(coerce_amount(Some(&json!(" 7 "))), dec!(7));
        assert_eq!(coerce_amount(Some(&json!("not a number"))), Decimal::ZERO);
        assert_eq!(coerce_amount(Some(&json!(null))), Decimal::ZERO);
        assert_eq!(coerce_amount(Some(&json!({"usd": 4}))), Decimal::ZERO);
        assert_eq!(coerce_amount(None), Decimal::ZERO);
    }

    #[test]
    fn test_unknown_type_normalizes_to_expense() {
        let entry = normalize_record("e1", &json!({"type": "REVENUE"}), ts(), ts());
        assert_eq!(entry.entry_type, EntryType::Expense);

        let entry = normalize_record("e1", &json!({"type": 3}), ts(), ts());
        assert_eq!(entry.entry_type, EntryType::Expense);
    }

    #[test]
    fn test_available_only_forces_income() {
        let data = json!({"type": "EXPENSE", "impact": "AVAILABLE_ONLY"});
        let entry = normalize_record("e1", &data, ts(), ts());
        assert_eq!(entry.impact, Impact::AvailableOnly);
        assert_eq!(entry.entry_type, EntryType::Income);
    }

    #[test]
    fn test_unknown_fund_becomes_absent() {
        let entry = normalize_record("e1", &json!({"fund": "slush"}), ts(), ts());
        assert_eq!(entry.fund, None);

        let entry = normalize_record("e1", &json!({"fund": 9}), ts(), ts());
        assert_eq!(entry.fund, None);
    }

    #[test]
    fn test_unknown_impact_normalizes_to_ledger() {
        let entry = normalize_record("e1", &json!({"impact": "available_only"}), ts(), ts());
        assert_eq!(entry.impact, Impact::Ledger);
    }

    #[test]
    fn test_date_coercion() {
        let entry = normalize_record("e1", &json!({"date": "2025-11-30"}), ts(), ts());
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2025, 11, 30).unwrap());

        // RFC 3339 timestamps reduce to their calendar date
        let entry =
            normalize_record("e1", &json!({"date": "2025-11-30T08:15:00Z"}), ts(), ts());
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2025, 11, 30).unwrap());

        // Unparseable input falls back to today
        let entry = normalize_record("e1", &json!({"date": "soon"}), ts(), ts());
        assert_eq!(entry.date, Utc::now().date_naive());

        let entry = normalize_record("e1", &json!({}), ts(), ts());
        assert_eq!(entry.date, Utc::now().date_naive());
    }

    #[test]
    fn test_blank_category_takes_default_label() {
        let entry = normalize_record("e1", &json!({"type": "INCOME"}), ts(), ts());
        assert_eq!(entry.category, "Income");

        let entry = normalize_record("e1", &json!({"type": "EXPENSE", "category": " "}), ts(), ts());
        assert_eq!(entry.category, "Expense");

        let entry = normalize_record("e1", &json!({"impact": "AVAILABLE_ONLY"}), ts(), ts());
        assert_eq!(entry.category, "Balance Adjustment");
    }

    #[test]
    fn test_zero_amount_tolerated_on_read() {
        let entry = normalize_record("e1", &json!({"amount": 0, "type": "INCOME"}), ts(), ts());
        assert_eq!(entry.amount, Decimal::ZERO);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let malformed = [
            json!({}),
            json!({"title": "  padded  ", "amount": "12.00", "type": "income"}),
            json!({"amount": true, "fund": "slush", "impact": "AVAILABLE_ONLY", "date": 17}),
            json!({"type": "EXPENSE", "fund": "trust", "category": "", "date": "2024-02-29"}),
        ];

        for data in &malformed {
            let once = normalize_record("e1", data, ts(), ts());
            let reserialized = serde_json::to_value(&once).unwrap();
            let twice = normalize_record("e1", &reserialized, ts(), ts());
            assert_eq!(once, twice, "normalize must be idempotent for {data}");
        }
    }

    #[test]
    fn test_normalize_override_coerces_each_field() {
        let parsed = normalize_override(&json!({"available": "200", "revenue": 15.5}));
        assert_eq!(parsed.available, dec!(200));
        assert_eq!(parsed.revenue, dec!(15.5));
        assert_eq!(parsed.expenditure, Decimal::ZERO);

        let parsed = normalize_override(&json!({"available": "garbage"}));
        assert_eq!(parsed, BudgetOverride::ZERO);
    }
}
