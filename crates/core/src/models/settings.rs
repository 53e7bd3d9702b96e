use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// User-configurable settings, stored as a single record in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// The currency in which portfolio totals and reports are expressed
    /// (e.g., "USD", "EUR", "PLN").
    pub main_currency: String,

    /// Exchange rate table: currency code → units of that currency per
    /// one unit of the pivot currency. All factors share one pivot, so
    /// any-to-any conversion is two hops through it.
    pub rates: HashMap<String, f64>,

    /// When `rates` was last refreshed from the remote source.
    /// `None` until the first successful fetch; an old timestamp is the
    /// staleness indicator after a failed refresh.
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            main_currency: "USD".to_string(),
            rates: HashMap::new(),
            last_updated: None,
        }
    }
}
