use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The most recent value of one asset, taken from the transaction with
/// the maximal `(date, created_at)` in its chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSnapshot {
    pub asset_name: String,
    pub asset_category: String,

    /// Current value in the asset's own currency
    pub value: f64,
    pub currency: String,

    /// Date of the transaction the value was taken from
    pub date: NaiveDate,
}

/// Portfolio total in the main currency.
///
/// Assets whose currency has no rate data are left out of `value` and
/// listed in `excluded` — missing data is flagged, never counted as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTotal {
    pub value: f64,

    /// Names of assets excluded because conversion was unavailable
    pub excluded: Vec<String>,
}

/// One asset category's share of the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSlice {
    pub category: String,

    /// Combined value of the category in the main currency
    pub value: f64,

    /// Share of total portfolio value, 0–100. All slices are 0 when the
    /// total itself is zero.
    pub percentage: f64,
}

/// Gain/loss figures for one asset, in the asset's own currency.
///
/// `net_contribution` (deposits minus withdrawals) is the cost basis;
/// `amount` is the latest running value minus that basis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GainLoss {
    pub total_deposited: f64,
    pub total_withdrawn: f64,
    pub net_contribution: f64,
    pub amount: f64,

    /// `amount / net_contribution * 100`, defined as 0 when the net
    /// contribution is zero
    pub percentage: f64,
}

/// Dividend income received in one calendar month, in the main currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyIncome {
    pub year: i32,
    pub month: u32,
    pub total: f64,
}

/// Dividend income attributed to one asset, in the main currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetIncome {
    pub asset_name: String,
    pub total: f64,
}

/// Aggregated dividend income: by calendar month and by asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeReport {
    /// Chronological, one entry per month with at least one payment
    pub months: Vec<MonthlyIncome>,

    /// Alphabetical by asset name
    pub by_asset: Vec<AssetIncome>,

    /// Names of assets whose dividends could not be converted
    pub excluded: Vec<String>,
}
