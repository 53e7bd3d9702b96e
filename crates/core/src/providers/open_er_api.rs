use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::RatesProvider;
use crate::errors::CoreError;

const BASE_URL: &str = "https://open.er-api.com/v6";

const PROVIDER_NAME: &str = "open.er-api.com";

/// ExchangeRate-API open endpoint provider.
///
/// - **Free**: No API key required.
/// - **Coverage**: 160+ currencies, refreshed daily.
/// - **Endpoint**: `/latest/{pivot}` — all factors relative to the
///   requested pivot currency.
pub struct OpenErApiProvider {
    client: Client,
}

impl OpenErApiProvider {
    pub fn new() -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
        }
    }
}

impl Default for OpenErApiProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── open.er-api.com response types ──────────────────────────────────

#[derive(Deserialize)]
struct LatestRatesResponse {
    result: String,
    rates: HashMap<String, f64>,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RatesProvider for OpenErApiProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch_latest_rates(&self, pivot: &str) -> Result<HashMap<String, f64>, CoreError> {
        let base = pivot.to_uppercase();
        let url = format!("{BASE_URL}/latest/{base}");

        let resp: LatestRatesResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::RateFetch {
                provider: PROVIDER_NAME.into(),
                message: format!("Failed to parse response for pivot {base}: {e}"),
            })?;

        if resp.result != "success" {
            return Err(CoreError::RateFetch {
                provider: PROVIDER_NAME.into(),
                message: format!("API reported result '{}' for pivot {base}", resp.result),
            });
        }

        Ok(resp.rates)
    }
}
