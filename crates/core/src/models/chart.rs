use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single point of the portfolio value trend.
///
/// The core generates these — the frontend just renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,

    /// Combined value of all assets seen so far, in the main currency,
    /// after the last transaction of this date
    pub value: f64,
}
