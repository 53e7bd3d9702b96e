use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::dividend::Dividend;
use crate::models::settings::Settings;
use crate::models::transaction::Transaction;

/// Trait abstraction over the record store.
///
/// The core never talks to a database directly: a host embeds it with
/// whatever backend it has (IndexedDB bridge, SQLite, the in-memory
/// store) by implementing this trait. `put`/`bulk_put` are upserts keyed
/// by record id; `delete` of an unknown id is a no-op.
///
/// A failed write must leave previously written records durable —
/// callers re-read the store after an error rather than trusting any
/// in-memory view.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Store: Send + Sync {
    // ── Transactions ────────────────────────────────────────────────

    /// All transactions, ordered by `(date, created_at)` ascending.
    async fn transactions(&self) -> Result<Vec<Transaction>, CoreError>;

    async fn transaction_by_id(&self, id: Uuid) -> Result<Option<Transaction>, CoreError>;

    async fn put_transaction(&self, transaction: Transaction) -> Result<(), CoreError>;

    async fn delete_transaction(&self, id: Uuid) -> Result<(), CoreError>;

    async fn bulk_put_transactions(&self, transactions: Vec<Transaction>) -> Result<(), CoreError>;

    async fn clear_transactions(&self) -> Result<(), CoreError>;

    // ── Dividends ───────────────────────────────────────────────────

    /// All dividends, ordered by date ascending.
    async fn dividends(&self) -> Result<Vec<Dividend>, CoreError>;

    async fn dividend_by_id(&self, id: Uuid) -> Result<Option<Dividend>, CoreError>;

    async fn put_dividend(&self, dividend: Dividend) -> Result<(), CoreError>;

    async fn delete_dividend(&self, id: Uuid) -> Result<(), CoreError>;

    async fn bulk_put_dividends(&self, dividends: Vec<Dividend>) -> Result<(), CoreError>;

    async fn clear_dividends(&self) -> Result<(), CoreError>;

    // ── Settings (singleton) ────────────────────────────────────────

    /// The settings record, or `None` if never saved.
    async fn settings(&self) -> Result<Option<Settings>, CoreError>;

    async fn put_settings(&self, settings: Settings) -> Result<(), CoreError>;
}
