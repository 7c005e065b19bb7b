//! Unified error types for the ledger core.
//!
//! Validation failures are raised synchronously before any write reaches the
//! document store; transport failures are propagated to the caller unmodified
//! (this crate never retries). Malformed stored data is not an error at all -
//! it is coerced to safe defaults at read time by [`crate::core::normalize`].

use rust_decimal::Decimal;
use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Entry title was empty (or whitespace-only) on the write path.
    #[error("entry title cannot be empty")]
    EmptyTitle,

    /// Entry amount was zero or negative on the write path. A zero-amount
    /// entry carries no information; sign is derived from type at display
    /// time, never stored.
    #[error("entry amount must be greater than zero, got {amount}")]
    InvalidAmount {
        /// The rejected amount.
        amount: Decimal,
    },

    /// A ledger expense entry was submitted without a fund.
    #[error("expense entries must be booked against a fund")]
    MissingFund,

    /// Configuration file could not be read, parsed, or validated.
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable cause.
        message: String,
    },

    /// The document store rejected or failed an operation.
    #[error("document store error: {message}")]
    Transport {
        /// Store-provided failure description, passed through unmodified.
        message: String,
    },

    /// A write referenced a document id the store does not hold.
    #[error("no document {id} in collection {collection}")]
    NotFound {
        /// Collection that was addressed.
        collection: String,
        /// Missing document id.
        id: String,
    },
}

impl Error {
    /// Shorthand for a [`Error::Transport`] with the given message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Whether this error came from the write-path validation rules rather
    /// than the store. Validation errors are recoverable locally (the caller
    /// re-prompts); transport errors need user-visible messaging.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyTitle | Self::InvalidAmount { .. } | Self::MissingFund
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
