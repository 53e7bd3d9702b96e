use std::collections::{BTreeMap, HashMap};

use crate::models::chart::TrendPoint;
use crate::models::settings::Settings;
use crate::models::transaction::Transaction;
use crate::services::currency_service::CurrencyService;

/// Generates the portfolio value trend from the union of all assets'
/// chains.
///
/// The core computes all the numbers — the frontend only renders.
pub struct ChartService {
    currency_service: CurrencyService,
}

impl ChartService {
    pub fn new() -> Self {
        Self {
            currency_service: CurrencyService::new(),
        }
    }

    /// Replay every transaction across all assets in `(date, created_at)`
    /// order, keeping a live map of each asset's most recent value, and
    /// record the converted sum after each step keyed by the step's date.
    ///
    /// When several transactions share a date only the final sum for
    /// that date survives, so the series has exactly one point per
    /// distinct date, ascending. Assets whose currency cannot convert
    /// are left out of the sums.
    #[must_use]
    pub fn value_trend(&self, transactions: &[Transaction], settings: &Settings) -> Vec<TrendPoint> {
        let mut sorted: Vec<&Transaction> = transactions.iter().collect();
        sorted.sort_by_key(|t| t.chain_key());

        // asset name → (latest value, currency)
        let mut live: HashMap<&str, (f64, &str)> = HashMap::new();
        let mut points: BTreeMap<chrono::NaiveDate, f64> = BTreeMap::new();

        for tx in sorted {
            live.insert(tx.asset_name.as_str(), (tx.value, tx.currency.as_str()));

            let sum: f64 = live
                .values()
                .filter_map(|(value, currency)| {
                    self.currency_service.convert(
                        *value,
                        currency,
                        &settings.main_currency,
                        &settings.rates,
                    )
                })
                .sum();

            // Last write per date wins
            points.insert(tx.date, sum);
        }

        points
            .into_iter()
            .map(|(date, value)| TrendPoint { date, value })
            .collect()
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
