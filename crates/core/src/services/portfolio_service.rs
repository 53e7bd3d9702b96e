use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::transaction::{ChainEntry, Transaction, TransactionDraft};
use crate::services::ledger_service::LedgerService;
use crate::storage::traits::Store;

/// A pending mutation of one asset's chain.
#[derive(Debug, Clone)]
pub enum TransactionEntry {
    /// Add a brand-new transaction; the coordinator assigns its id and
    /// creation timestamp.
    Create(TransactionDraft),
    /// Replace the fields of the identified transaction, keeping its id
    /// and creation timestamp so chain order stays stable.
    Edit(Uuid, TransactionDraft),
}

/// Orchestrates chain mutations: merges a pending transaction into its
/// asset's existing set, re-runs the ledger, and hands every recomputed
/// record to the store, one asset at a time.
///
/// Mutations against the same asset name are serialized on an in-process
/// mutex so one recomputation's writes are never interleaved with
/// another's; different assets proceed independently.
pub struct PortfolioService {
    ledger_service: LedgerService,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl PortfolioService {
    pub fn new() -> Self {
        Self {
            ledger_service: LedgerService::new(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Apply a mutation to `asset_name`'s chain and persist the result.
    ///
    /// Loads the asset's full transaction set, recovers the unvalued
    /// entries, applies the pending create/edit and/or deletion, runs
    /// the ledger over the merged set, and persists every recomputed
    /// record in ascending chain order — a reader never observes a later
    /// transaction's value without its predecessors already durable.
    ///
    /// On a failed write the store may hold a prefix of the new chain;
    /// the error is surfaced and callers must re-read the store before
    /// trusting values again.
    pub async fn recompute_and_persist(
        &self,
        store: &dyn Store,
        asset_name: &str,
        pending: Option<TransactionEntry>,
        deleted: Option<Uuid>,
    ) -> Result<Vec<Transaction>, CoreError> {
        let lock = self.lock_for(asset_name).await;
        let _guard = lock.lock().await;

        let chain: Vec<Transaction> = store
            .transactions()
            .await?
            .into_iter()
            .filter(|t| t.asset_name == asset_name)
            .collect();

        // Recover input amounts from the full old chain first — later
        // entries' deltas are only correct relative to the values the
        // edited/deleted record produced.
        let mut entries = self.ledger_service.entries_from_chain(&chain);

        if let Some(id) = deleted {
            let before = entries.len();
            entries.retain(|e| e.id != id);
            if entries.len() == before {
                return Err(CoreError::TransactionNotFound(id.to_string()));
            }
        }

        match pending {
            Some(TransactionEntry::Create(draft)) => {
                entries.push(ChainEntry {
                    id: Uuid::new_v4(),
                    created_at: Some(Utc::now()),
                    draft,
                });
            }
            Some(TransactionEntry::Edit(id, draft)) => {
                let pos = entries
                    .iter()
                    .position(|e| e.id == id)
                    .ok_or_else(|| CoreError::TransactionNotFound(id.to_string()))?;
                let old = entries.remove(pos);
                entries.push(ChainEntry {
                    id,
                    created_at: old.created_at,
                    draft,
                });
            }
            None => {}
        }

        backfill_categories(&mut entries);

        let recomputed = self.ledger_service.recompute(entries)?;

        if let Some(id) = deleted {
            store.delete_transaction(id).await?;
        }
        for transaction in &recomputed {
            store.put_transaction(transaction.clone()).await?;
        }

        Ok(recomputed)
    }

    /// One mutex per asset name, created on first use.
    async fn lock_for(&self, asset_name: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(asset_name.to_string())
            .or_default()
            .clone()
    }
}

/// An asset's category lives redundantly on each transaction. Entries
/// that arrived without one (older imports, a draft for an existing
/// asset) inherit the first category found in the chain.
fn backfill_categories(entries: &mut [ChainEntry]) {
    let Some(category) = entries
        .iter()
        .map(|e| e.draft.asset_category.clone())
        .find(|c| !c.is_empty())
    else {
        return;
    };
    for entry in entries {
        if entry.draft.asset_category.is_empty() {
            entry.draft.asset_category = category.clone();
        }
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}
