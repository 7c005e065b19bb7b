//! Budget override - a manual additive correction to a scope's top-line
//! aggregates, stored per scope key and independent of the entry history.
//!
//! An override lets an administrator close a known data-entry gap without
//! retroactively rewriting entries. It carries no validation beyond numeric
//! coercion and is merged additively by the aggregation engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Manual deltas applied on top of the computed aggregates for one scope.
///
/// The `revenue` and `expenditure` deltas shift only their own displayed
/// totals; only `available` shifts the available balance. The two paths are
/// deliberately independent - see [`crate::core::aggregate::summarize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetOverride {
    /// Delta added to the available balance.
    #[serde(default)]
    pub available: Decimal,
    /// Delta added to the displayed revenue total.
    #[serde(default)]
    pub revenue: Decimal,
    /// Delta added to the displayed expenditure total.
    #[serde(default)]
    pub expenditure: Decimal,
}

impl BudgetOverride {
    /// An all-zero override - the value assumed when no override document
    /// exists for a scope.
    pub const ZERO: Self = Self {
        available: Decimal::ZERO,
        revenue: Decimal::ZERO,
        expenditure: Decimal::ZERO,
    };
}
