use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::dividend::Dividend;
use crate::models::settings::Settings;
use crate::models::transaction::Transaction;
use crate::storage::traits::Store;

/// In-memory `Store` implementation.
///
/// Used by the test suite and by embedders that have not wired a real
/// backend yet. Listings come back date-ordered with the record id as a
/// final tie-break so iteration order is deterministic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    transactions: RwLock<HashMap<Uuid, Transaction>>,
    dividends: RwLock<HashMap<Uuid, Dividend>>,
    settings: RwLock<Option<Settings>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Store for MemoryStore {
    // ── Transactions ────────────────────────────────────────────────

    async fn transactions(&self) -> Result<Vec<Transaction>, CoreError> {
        let guard = self.transactions.read().await;
        let mut all: Vec<Transaction> = guard.values().cloned().collect();
        all.sort_by(|a, b| a.chain_key().cmp(&b.chain_key()).then(a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn transaction_by_id(&self, id: Uuid) -> Result<Option<Transaction>, CoreError> {
        Ok(self.transactions.read().await.get(&id).cloned())
    }

    async fn put_transaction(&self, transaction: Transaction) -> Result<(), CoreError> {
        self.transactions
            .write()
            .await
            .insert(transaction.id, transaction);
        Ok(())
    }

    async fn delete_transaction(&self, id: Uuid) -> Result<(), CoreError> {
        self.transactions.write().await.remove(&id);
        Ok(())
    }

    async fn bulk_put_transactions(&self, transactions: Vec<Transaction>) -> Result<(), CoreError> {
        let mut guard = self.transactions.write().await;
        for transaction in transactions {
            guard.insert(transaction.id, transaction);
        }
        Ok(())
    }

    async fn clear_transactions(&self) -> Result<(), CoreError> {
        self.transactions.write().await.clear();
        Ok(())
    }

    // ── Dividends ───────────────────────────────────────────────────

    async fn dividends(&self) -> Result<Vec<Dividend>, CoreError> {
        let guard = self.dividends.read().await;
        let mut all: Vec<Dividend> = guard.values().cloned().collect();
        all.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn dividend_by_id(&self, id: Uuid) -> Result<Option<Dividend>, CoreError> {
        Ok(self.dividends.read().await.get(&id).cloned())
    }

    async fn put_dividend(&self, dividend: Dividend) -> Result<(), CoreError> {
        self.dividends.write().await.insert(dividend.id, dividend);
        Ok(())
    }

    async fn delete_dividend(&self, id: Uuid) -> Result<(), CoreError> {
        self.dividends.write().await.remove(&id);
        Ok(())
    }

    async fn bulk_put_dividends(&self, dividends: Vec<Dividend>) -> Result<(), CoreError> {
        let mut guard = self.dividends.write().await;
        for dividend in dividends {
            guard.insert(dividend.id, dividend);
        }
        Ok(())
    }

    async fn clear_dividends(&self) -> Result<(), CoreError> {
        self.dividends.write().await.clear();
        Ok(())
    }

    // ── Settings ────────────────────────────────────────────────────

    async fn settings(&self) -> Result<Option<Settings>, CoreError> {
        Ok(self.settings.read().await.clone())
    }

    async fn put_settings(&self, settings: Settings) -> Result<(), CoreError> {
        *self.settings.write().await = Some(settings);
        Ok(())
    }
}
