use log::debug;

use crate::errors::CoreError;
use crate::models::transaction::{ChainEntry, Transaction, TransactionDraft, TransactionKind};

/// Rebuilds the ordered, internally consistent value history of one
/// asset from its raw entries.
///
/// Pure business logic — no I/O. Every running value depends on all
/// prior entries in chain order, so any mutation to one entry requires
/// re-running the walk over the asset's entire set; `recompute` is that
/// walk, and it is O(n log n) in the chain length (sort-dominated).
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Value an asset's chain: sort entries by `(date, created_at)` and
    /// walk them front to back, deriving each running value from the
    /// previous one.
    ///
    /// All entries must belong to a single asset. A withdrawal may drive
    /// the running value negative — the ledger records what the user
    /// entered and leaves balance policy to callers.
    pub fn recompute(&self, mut entries: Vec<ChainEntry>) -> Result<Vec<Transaction>, CoreError> {
        for entry in &entries {
            entry.draft.validate()?;
        }
        if let Some(first) = entries.first() {
            let name = first.draft.asset_name.clone();
            if let Some(stray) = entries.iter().find(|e| e.draft.asset_name != name) {
                return Err(CoreError::ValidationError(format!(
                    "Ledger recompute expects a single asset, got '{}' and '{}'",
                    name, stray.draft.asset_name
                )));
            }
        }

        // Stable sort: entries sharing date and timestamp keep input order.
        entries.sort_by_key(ChainEntry::chain_key);

        let mut chain = Vec::with_capacity(entries.len());
        let mut previous_value = 0.0;

        for entry in entries {
            let ChainEntry { id, created_at, draft } = entry;
            let value = match draft.kind {
                TransactionKind::Deposit => previous_value + draft.amount,
                TransactionKind::Withdrawal => previous_value - draft.amount,
                TransactionKind::MarketValueUpdate => draft.amount,
            };
            previous_value = value;

            chain.push(Transaction {
                id,
                asset_name: draft.asset_name,
                asset_category: draft.asset_category,
                kind: draft.kind,
                value,
                currency: draft.currency,
                date: draft.date,
                created_at,
                description: draft.description,
            });
        }

        if let Some(first) = chain.first() {
            debug!(
                "recomputed {} transactions for asset '{}'",
                chain.len(),
                first.asset_name
            );
        }
        Ok(chain)
    }

    /// Turn a persisted chain back into unvalued entries, recovering
    /// each record's original input amount from the running values.
    ///
    /// This is the edit path: derive the entries, substitute or remove
    /// the touched one, and feed the result back through [`recompute`].
    ///
    /// [`recompute`]: LedgerService::recompute
    #[must_use]
    pub fn entries_from_chain(&self, transactions: &[Transaction]) -> Vec<ChainEntry> {
        let mut sorted: Vec<&Transaction> = transactions.iter().collect();
        sorted.sort_by_key(|t| t.chain_key());

        let mut entries = Vec::with_capacity(sorted.len());
        let mut previous_value = 0.0;

        for tx in sorted {
            let amount = tx.input_amount(previous_value);
            previous_value = tx.value;

            entries.push(ChainEntry {
                id: tx.id,
                created_at: tx.created_at,
                draft: TransactionDraft {
                    asset_name: tx.asset_name.clone(),
                    asset_category: tx.asset_category.clone(),
                    kind: tx.kind,
                    amount,
                    currency: tx.currency.clone(),
                    date: tx.date,
                    description: tx.description.clone(),
                },
            });
        }

        entries
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
