use chrono::Utc;
use log::warn;

use crate::errors::CoreError;
use crate::models::settings::Settings;
use crate::providers::traits::RatesProvider;

/// The currency every rate-table factor is expressed against. Fixed:
/// supporting more than one pivot at a time is a non-goal.
pub const PIVOT_CURRENCY: &str = "USD";

/// Refreshes the exchange-rate table from a remote provider.
///
/// A failed fetch is a degraded state, not a hard error for the rest of
/// the system: the previous table stays in place and `last_updated`
/// keeps its old timestamp, so staleness is visible to the caller.
/// There is no retry loop — the next explicit refresh is the retry.
pub struct RateService {
    provider: Box<dyn RatesProvider>,
}

impl RateService {
    pub fn new(provider: Box<dyn RatesProvider>) -> Self {
        Self { provider }
    }

    /// Fetch the latest pivot-relative table into `settings`.
    ///
    /// On success `settings.rates` is replaced wholesale and
    /// `last_updated` stamped; on failure `settings` is left untouched
    /// and the error returned for the caller to surface.
    pub async fn refresh(&self, settings: &mut Settings) -> Result<(), CoreError> {
        match self.provider.fetch_latest_rates(PIVOT_CURRENCY).await {
            Ok(rates) if rates.is_empty() => {
                warn!(
                    "rate provider '{}' returned an empty table; keeping previous rates",
                    self.provider.name()
                );
                Err(CoreError::RateFetch {
                    provider: self.provider.name().to_string(),
                    message: "Provider returned an empty rate table".into(),
                })
            }
            Ok(rates) => {
                settings.rates = rates;
                settings.last_updated = Some(Utc::now());
                Ok(())
            }
            Err(e) => {
                warn!(
                    "rate refresh via '{}' failed; keeping previous rates: {e}",
                    self.provider.name()
                );
                Err(e)
            }
        }
    }
}
