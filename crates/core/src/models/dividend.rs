use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A dividend/income payment attributed to an asset.
///
/// Independent of the valuation chain — dividends feed the income
/// reports only and never change a running value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dividend {
    /// Unique identifier
    pub id: Uuid,

    /// The asset this payment refers to (matches `Transaction::asset_name`)
    pub asset_name: String,

    /// Payment date
    pub date: NaiveDate,

    /// Amount paid out
    pub value: f64,

    /// ISO-style currency code of `value`
    pub currency: String,

    /// Optional free-text memo
    #[serde(default)]
    pub description: Option<String>,
}

impl Dividend {
    pub fn new(
        asset_name: impl Into<String>,
        date: NaiveDate,
        value: f64,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            asset_name: asset_name.into(),
            date,
            value,
            currency: currency.into().to_uppercase(),
            description: None,
        }
    }

    /// Attach a free-text memo.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
