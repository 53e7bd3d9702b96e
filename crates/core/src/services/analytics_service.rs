use log::warn;
use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;

use crate::models::analytics::{
    AllocationSlice, AssetIncome, AssetSnapshot, GainLoss, IncomeReport, MonthlyIncome,
    PortfolioTotal,
};
use crate::models::dividend::Dividend;
use crate::models::settings::Settings;
use crate::models::transaction::{Transaction, TransactionKind};
use crate::services::currency_service::CurrencyService;
use crate::services::ledger_service::LedgerService;

/// Folds per-asset histories into portfolio-level reports: snapshots,
/// totals, allocation, gain/loss, and dividend income.
///
/// All functions take their inputs as plain arguments and return new
/// values — no shared mutable state. Assets whose currency has no rate
/// data are excluded from converted sums and flagged, so one missing
/// rate never aborts a report.
pub struct AnalyticsService {
    ledger_service: LedgerService,
    currency_service: CurrencyService,
}

impl AnalyticsService {
    pub fn new() -> Self {
        Self {
            ledger_service: LedgerService::new(),
            currency_service: CurrencyService::new(),
        }
    }

    /// Latest value per asset: for each distinct name, the transaction
    /// with the maximal `(date, created_at)`. Date ties without
    /// timestamps resolve to the last record in chain order.
    ///
    /// Values stay in each asset's own currency; output is sorted by
    /// asset name for deterministic rendering.
    #[must_use]
    pub fn snapshot(&self, transactions: &[Transaction]) -> Vec<AssetSnapshot> {
        let mut sorted: Vec<&Transaction> = transactions.iter().collect();
        sorted.sort_by_key(|t| t.chain_key());

        let mut latest: HashMap<&str, &Transaction> = HashMap::new();
        for tx in sorted {
            latest.insert(tx.asset_name.as_str(), tx);
        }

        let mut snapshot: Vec<AssetSnapshot> = latest
            .into_values()
            .map(|tx| AssetSnapshot {
                asset_name: tx.asset_name.clone(),
                asset_category: tx.asset_category.clone(),
                value: tx.value,
                currency: tx.currency.clone(),
                date: tx.date,
            })
            .collect();
        snapshot.sort_by(|a, b| a.asset_name.cmp(&b.asset_name));
        snapshot
    }

    /// Total portfolio value in the main currency.
    pub fn total_value(&self, snapshot: &[AssetSnapshot], settings: &Settings) -> PortfolioTotal {
        let mut value = 0.0;
        let mut excluded = Vec::new();

        for entry in snapshot {
            match self.currency_service.convert(
                entry.value,
                &entry.currency,
                &settings.main_currency,
                &settings.rates,
            ) {
                Some(converted) => value += converted,
                None => {
                    warn!(
                        "no rate data to convert '{}' ({} -> {}); excluding from total",
                        entry.asset_name, entry.currency, settings.main_currency
                    );
                    excluded.push(entry.asset_name.clone());
                }
            }
        }

        PortfolioTotal { value, excluded }
    }

    /// Portfolio share per asset category, largest first.
    ///
    /// Percentages sum to 100 (within rounding) when the total is
    /// nonzero, and are all 0 when it is zero. Snapshot entries with no
    /// category land in "Other"; entries that cannot convert are skipped.
    pub fn allocation(&self, snapshot: &[AssetSnapshot], settings: &Settings) -> Vec<AllocationSlice> {
        let mut by_category: BTreeMap<String, f64> = BTreeMap::new();

        for entry in snapshot {
            let Some(converted) = self.currency_service.convert(
                entry.value,
                &entry.currency,
                &settings.main_currency,
                &settings.rates,
            ) else {
                continue;
            };
            let category = if entry.asset_category.is_empty() {
                "Other".to_string()
            } else {
                entry.asset_category.clone()
            };
            *by_category.entry(category).or_insert(0.0) += converted;
        }

        let total: f64 = by_category.values().sum();

        let mut slices: Vec<AllocationSlice> = by_category
            .into_iter()
            .map(|(category, value)| AllocationSlice {
                category,
                value,
                percentage: if total == 0.0 { 0.0 } else { value / total * 100.0 },
            })
            .collect();

        slices.sort_by(|a, b| {
            b.value
                .partial_cmp(&a.value)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        slices
    }

    /// Gain/loss for one asset, in its own currency.
    ///
    /// Deposits and withdrawals are recovered from the chain's running
    /// values; the net contribution is the cost basis the latest value
    /// is measured against. An asset whose history is market updates
    /// only has a zero basis and, per policy, a 0% figure.
    #[must_use]
    pub fn gain_loss(&self, asset_name: &str, transactions: &[Transaction]) -> GainLoss {
        let chain: Vec<Transaction> = transactions
            .iter()
            .filter(|t| t.asset_name == asset_name)
            .cloned()
            .collect();
        let entries = self.ledger_service.entries_from_chain(&chain);

        let mut total_deposited = 0.0;
        let mut total_withdrawn = 0.0;

        for entry in &entries {
            match entry.draft.kind {
                TransactionKind::Deposit => total_deposited += entry.draft.amount,
                TransactionKind::Withdrawal => total_withdrawn += entry.draft.amount,
                TransactionKind::MarketValueUpdate => {}
            }
        }

        // entries_from_chain sorted by chain order; the last entry's id
        // identifies the transaction carrying the current value
        let latest_value = entries
            .last()
            .and_then(|last| chain.iter().find(|t| t.id == last.id))
            .map_or(0.0, |t| t.value);

        let net_contribution = total_deposited - total_withdrawn;
        let amount = latest_value - net_contribution;
        let percentage = if net_contribution == 0.0 {
            0.0
        } else {
            amount / net_contribution * 100.0
        };

        GainLoss {
            total_deposited,
            total_withdrawn,
            net_contribution,
            amount,
            percentage,
        }
    }

    /// Dividend income grouped by calendar month and by asset, in the
    /// main currency. Payments that cannot convert are skipped and their
    /// asset names flagged.
    pub fn income(&self, dividends: &[Dividend], settings: &Settings) -> IncomeReport {
        let mut months: BTreeMap<(i32, u32), f64> = BTreeMap::new();
        let mut by_asset: BTreeMap<String, f64> = BTreeMap::new();
        let mut excluded = Vec::new();

        for dividend in dividends {
            let Some(converted) = self.currency_service.convert(
                dividend.value,
                &dividend.currency,
                &settings.main_currency,
                &settings.rates,
            ) else {
                warn!(
                    "no rate data to convert dividend for '{}' ({} -> {}); excluding from income",
                    dividend.asset_name, dividend.currency, settings.main_currency
                );
                if !excluded.contains(&dividend.asset_name) {
                    excluded.push(dividend.asset_name.clone());
                }
                continue;
            };

            *months
                .entry((dividend.date.year(), dividend.date.month()))
                .or_insert(0.0) += converted;
            *by_asset.entry(dividend.asset_name.clone()).or_insert(0.0) += converted;
        }

        IncomeReport {
            months: months
                .into_iter()
                .map(|((year, month), total)| MonthlyIncome { year, month, total })
                .collect(),
            by_asset: by_asset
                .into_iter()
                .map(|(asset_name, total)| AssetIncome { asset_name, total })
                .collect(),
            excluded,
        }
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}
