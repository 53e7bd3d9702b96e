use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::CoreError;

/// How a transaction affects an asset's running value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Adds the entered amount to the running value.
    Deposit,
    /// Subtracts the entered amount from the running value.
    Withdrawal,
    /// Replaces the running value with the entered amount outright
    /// (repricing, not a cash flow).
    MarketValueUpdate,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Deposit => write!(f, "Deposit"),
            TransactionKind::Withdrawal => write!(f, "Withdrawal"),
            TransactionKind::MarketValueUpdate => write!(f, "Market Value Update"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Deposit" => Ok(TransactionKind::Deposit),
            "Withdrawal" => Ok(TransactionKind::Withdrawal),
            "Market Value Update" | "MarketValueUpdate" => Ok(TransactionKind::MarketValueUpdate),
            other => Err(CoreError::ValidationError(format!(
                "Unknown transaction kind '{other}' (expected Deposit, Withdrawal, or Market Value Update)"
            ))),
        }
    }
}

/// One persisted link in an asset's valuation chain.
///
/// **Important**: `value` is the running balance of the whole asset
/// after this transaction, computed by the ledger — never user input.
/// The amount the user originally entered is not stored; it can be
/// recovered from the chain via [`Transaction::input_amount`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: Uuid,

    /// Groups transactions into one asset's history.
    /// Name equality is the grouping key (case-sensitive, exact match).
    pub asset_name: String,

    /// Classification tag (e.g., "Stock", "Real Estate"). An attribute
    /// of the asset, carried redundantly on each transaction and kept
    /// consistent across an asset's full history.
    pub asset_category: String,

    /// Deposit, Withdrawal, or Market Value Update
    pub kind: TransactionKind,

    /// Running balance of the asset after this transaction is applied
    pub value: f64,

    /// ISO-style currency code of `value` (e.g., "USD")
    pub currency: String,

    /// Calendar date of the event (no time component)
    pub date: NaiveDate,

    /// Creation timestamp, used only to break ties between transactions
    /// sharing a date. Records without one sort before any that have it.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Optional free-text memo, opaque to the core
    #[serde(default)]
    pub description: Option<String>,
}

impl Transaction {
    /// Sort key defining an asset's chain order: date ascending, then
    /// creation timestamp ascending (`None` first), stable among ties.
    #[must_use]
    pub fn chain_key(&self) -> (NaiveDate, Option<DateTime<Utc>>) {
        (self.date, self.created_at)
    }

    /// Recover the amount the user originally entered, given the running
    /// value immediately before this transaction in chain order.
    #[must_use]
    pub fn input_amount(&self, previous_value: f64) -> f64 {
        match self.kind {
            TransactionKind::Deposit => self.value - previous_value,
            TransactionKind::Withdrawal => previous_value - self.value,
            TransactionKind::MarketValueUpdate => self.value,
        }
    }
}

/// User input for one transaction, before the ledger has valued it.
///
/// `amount` is a delta for `Deposit`/`Withdrawal` and the new absolute
/// value for `MarketValueUpdate`. Drafts are transient: only valued
/// [`Transaction`]s are persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub asset_name: String,
    pub asset_category: String,
    pub kind: TransactionKind,
    pub amount: f64,
    pub currency: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
}

impl TransactionDraft {
    pub fn new(
        asset_name: impl Into<String>,
        asset_category: impl Into<String>,
        kind: TransactionKind,
        amount: f64,
        currency: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            asset_name: asset_name.into(),
            asset_category: asset_category.into(),
            kind,
            amount,
            currency: currency.into().to_uppercase(),
            date,
            description: None,
        }
    }

    /// Attach a free-text memo.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check the draft is well-formed before it enters a ledger walk.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.asset_name.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Transaction asset name must not be empty".into(),
            ));
        }
        if !self.amount.is_finite() {
            return Err(CoreError::ValidationError(format!(
                "Transaction amount must be a finite number, got {}",
                self.amount
            )));
        }
        if self.currency.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Transaction currency must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// A draft paired with the identity it keeps once valued: one link of an
/// asset's chain as the ledger sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainEntry {
    pub id: Uuid,
    pub created_at: Option<DateTime<Utc>>,
    pub draft: TransactionDraft,
}

impl ChainEntry {
    /// Chain ordering key, matching [`Transaction::chain_key`].
    #[must_use]
    pub fn chain_key(&self) -> (NaiveDate, Option<DateTime<Utc>>) {
        (self.draft.date, self.created_at)
    }
}

/// Parse a calendar date from external input (`YYYY-MM-DD`).
pub fn parse_date(s: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(CoreError::ValidationError(
            "Transaction date must not be empty".into(),
        ));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|e| {
        CoreError::ValidationError(format!("Invalid date '{trimmed}': {e}"))
    })
}
