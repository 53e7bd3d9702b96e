use async_trait::async_trait;
use std::collections::HashMap;

use crate::errors::CoreError;

/// Trait abstraction for remote exchange-rate sources.
///
/// A provider returns a full pivot-relative table in one call: currency
/// code → units of that currency per one unit of `pivot`. If a source
/// goes away or changes shape, only its implementation is replaced —
/// the rest of the codebase is untouched.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait RatesProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the latest rate table relative to `pivot`.
    async fn fetch_latest_rates(&self, pivot: &str) -> Result<HashMap<String, f64>, CoreError>;
}
