pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use errors::CoreError;
use models::{
    analytics::{AllocationSlice, AssetSnapshot, GainLoss, IncomeReport, PortfolioTotal},
    chart::TrendPoint,
    dividend::Dividend,
    settings::Settings,
    transaction::{Transaction, TransactionDraft},
};
use providers::open_er_api::OpenErApiProvider;
use providers::traits::RatesProvider;
use services::{
    analytics_service::AnalyticsService,
    chart_service::ChartService,
    currency_service::CurrencyService,
    portfolio_service::{PortfolioService, TransactionEntry},
    rate_service::RateService,
};
use storage::traits::Store;

/// Main entry point for the Asset Tracker core library.
///
/// Holds the store handle and the services that operate on it. The
/// facade itself keeps no mutable state: every operation reads the
/// store, so after a failed write the next call starts from durable
/// ground truth instead of a drifted in-memory view.
#[must_use]
pub struct AssetTracker {
    store: Arc<dyn Store>,
    portfolio_service: PortfolioService,
    rate_service: RateService,
    analytics_service: AnalyticsService,
    chart_service: ChartService,
    currency_service: CurrencyService,
}

impl AssetTracker {
    /// Build a tracker over `store`, fetching rates from the default
    /// remote source.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self::with_rates_provider(store, Box::new(OpenErApiProvider::new()))
    }

    /// Build a tracker with a custom rate source (tests, offline hosts).
    pub fn with_rates_provider(store: Arc<dyn Store>, provider: Box<dyn RatesProvider>) -> Self {
        Self {
            store,
            portfolio_service: PortfolioService::new(),
            rate_service: RateService::new(provider),
            analytics_service: AnalyticsService::new(),
            chart_service: ChartService::new(),
            currency_service: CurrencyService::new(),
        }
    }

    // ── Transaction Management ──────────────────────────────────────

    /// Add a transaction to its asset's chain.
    ///
    /// The whole chain is revalued and persisted; the returned sequence
    /// is the asset's full recomputed history in chain order.
    pub async fn add_transaction(
        &self,
        draft: TransactionDraft,
    ) -> Result<Vec<Transaction>, CoreError> {
        let asset_name = draft.asset_name.clone();
        self.portfolio_service
            .recompute_and_persist(
                self.store.as_ref(),
                &asset_name,
                Some(TransactionEntry::Create(draft)),
                None,
            )
            .await
    }

    /// Replace an existing transaction's fields and revalue its chain.
    ///
    /// Changing `asset_name` moves the record: it is removed from the
    /// old asset's chain (which is revalued without it) and re-created
    /// under the new name with a fresh id.
    pub async fn update_transaction(
        &self,
        id: Uuid,
        draft: TransactionDraft,
    ) -> Result<Vec<Transaction>, CoreError> {
        let existing = self
            .store
            .transaction_by_id(id)
            .await?
            .ok_or_else(|| CoreError::TransactionNotFound(id.to_string()))?;

        if existing.asset_name == draft.asset_name {
            return self
                .portfolio_service
                .recompute_and_persist(
                    self.store.as_ref(),
                    &existing.asset_name,
                    Some(TransactionEntry::Edit(id, draft)),
                    None,
                )
                .await;
        }

        // Validate before touching the old chain so a bad draft cannot
        // delete the record without re-creating it.
        draft.validate()?;
        self.portfolio_service
            .recompute_and_persist(self.store.as_ref(), &existing.asset_name, None, Some(id))
            .await?;
        let asset_name = draft.asset_name.clone();
        self.portfolio_service
            .recompute_and_persist(
                self.store.as_ref(),
                &asset_name,
                Some(TransactionEntry::Create(draft)),
                None,
            )
            .await
    }

    /// Delete a transaction and revalue the remainder of its chain.
    pub async fn delete_transaction(&self, id: Uuid) -> Result<Vec<Transaction>, CoreError> {
        let existing = self
            .store
            .transaction_by_id(id)
            .await?
            .ok_or_else(|| CoreError::TransactionNotFound(id.to_string()))?;
        self.portfolio_service
            .recompute_and_persist(self.store.as_ref(), &existing.asset_name, None, Some(id))
            .await
    }

    /// All transactions, ordered by `(date, created_at)`.
    pub async fn transactions(&self) -> Result<Vec<Transaction>, CoreError> {
        self.store.transactions().await
    }

    /// One asset's transactions, in chain order (exact name match).
    pub async fn transactions_for_asset(
        &self,
        asset_name: &str,
    ) -> Result<Vec<Transaction>, CoreError> {
        Ok(self
            .store
            .transactions()
            .await?
            .into_iter()
            .filter(|t| t.asset_name == asset_name)
            .collect())
    }

    /// All distinct asset names, sorted.
    pub async fn asset_names(&self) -> Result<Vec<String>, CoreError> {
        let mut names: Vec<String> = self
            .store
            .transactions()
            .await?
            .into_iter()
            .map(|t| t.asset_name)
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    // ── Dividend Management ─────────────────────────────────────────

    /// Record a dividend payment. Returns its id.
    pub async fn add_dividend(&self, dividend: Dividend) -> Result<Uuid, CoreError> {
        validate_dividend(&dividend)?;
        let id = dividend.id;
        self.store.put_dividend(dividend).await?;
        Ok(id)
    }

    /// Replace an existing dividend (matched by id).
    pub async fn update_dividend(&self, dividend: Dividend) -> Result<(), CoreError> {
        validate_dividend(&dividend)?;
        self.store
            .dividend_by_id(dividend.id)
            .await?
            .ok_or_else(|| CoreError::DividendNotFound(dividend.id.to_string()))?;
        self.store.put_dividend(dividend).await
    }

    /// Delete a dividend by id.
    pub async fn delete_dividend(&self, id: Uuid) -> Result<(), CoreError> {
        self.store
            .dividend_by_id(id)
            .await?
            .ok_or_else(|| CoreError::DividendNotFound(id.to_string()))?;
        self.store.delete_dividend(id).await
    }

    /// All dividends, ordered by date.
    pub async fn dividends(&self) -> Result<Vec<Dividend>, CoreError> {
        self.store.dividends().await
    }

    // ── Settings & Rates ────────────────────────────────────────────

    /// Current settings, or defaults if none were ever saved.
    pub async fn settings(&self) -> Result<Settings, CoreError> {
        Ok(self.store.settings().await?.unwrap_or_default())
    }

    /// Set the main reporting currency (e.g., "USD", "EUR", "PLN").
    /// Currency code must be a 3-letter alphabetic string.
    pub async fn set_main_currency(&self, currency: &str) -> Result<(), CoreError> {
        let trimmed = currency.trim().to_uppercase();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::ValidationError(format!(
                "Invalid currency code '{currency}': must be exactly 3 ASCII letters (e.g., USD, EUR, PLN)"
            )));
        }
        let mut settings = self.settings().await?;
        settings.main_currency = trimmed;
        self.store.put_settings(settings).await
    }

    /// Refresh the exchange-rate table from the remote source and
    /// persist the updated settings.
    ///
    /// A failed fetch keeps the previous table (stale but usable) and
    /// surfaces the error; `Settings::last_updated` shows how old the
    /// surviving table is.
    pub async fn refresh_rates(&self) -> Result<Settings, CoreError> {
        let mut settings = self.settings().await?;
        self.rate_service.refresh(&mut settings).await?;
        self.store.put_settings(settings.clone()).await?;
        Ok(settings)
    }

    // ── Reports ─────────────────────────────────────────────────────

    /// Current value per asset (each in its own currency).
    pub async fn snapshot(&self) -> Result<Vec<AssetSnapshot>, CoreError> {
        let transactions = self.store.transactions().await?;
        Ok(self.analytics_service.snapshot(&transactions))
    }

    /// Total portfolio value in the main currency, with unavailable
    /// conversions flagged rather than counted as zero.
    pub async fn total_value(&self) -> Result<PortfolioTotal, CoreError> {
        let transactions = self.store.transactions().await?;
        let settings = self.settings().await?;
        let snapshot = self.analytics_service.snapshot(&transactions);
        Ok(self.analytics_service.total_value(&snapshot, &settings))
    }

    /// Portfolio share per asset category.
    pub async fn allocation(&self) -> Result<Vec<AllocationSlice>, CoreError> {
        let transactions = self.store.transactions().await?;
        let settings = self.settings().await?;
        let snapshot = self.analytics_service.snapshot(&transactions);
        Ok(self.analytics_service.allocation(&snapshot, &settings))
    }

    /// Portfolio value over time, one point per date with activity.
    pub async fn value_trend(&self) -> Result<Vec<TrendPoint>, CoreError> {
        let transactions = self.store.transactions().await?;
        let settings = self.settings().await?;
        Ok(self.chart_service.value_trend(&transactions, &settings))
    }

    /// Gain/loss figures for one asset.
    pub async fn gain_loss(&self, asset_name: &str) -> Result<GainLoss, CoreError> {
        let transactions = self.store.transactions().await?;
        Ok(self.analytics_service.gain_loss(asset_name, &transactions))
    }

    /// Dividend income grouped by month and by asset.
    pub async fn income(&self) -> Result<IncomeReport, CoreError> {
        let dividends = self.store.dividends().await?;
        let settings = self.settings().await?;
        Ok(self.analytics_service.income(&dividends, &settings))
    }

    // ── Conversion ──────────────────────────────────────────────────

    /// Convert an amount between currencies through the pivot-relative
    /// table. `None` means no rate data — never zero.
    #[must_use]
    pub fn convert(
        &self,
        amount: f64,
        from: &str,
        to: &str,
        rates: &HashMap<String, f64>,
    ) -> Option<f64> {
        self.currency_service.convert(amount, from, to, rates)
    }

    /// Convert an amount into the main currency using the stored table.
    pub async fn convert_to_main(&self, amount: f64, from: &str) -> Result<Option<f64>, CoreError> {
        let settings = self.settings().await?;
        Ok(self
            .currency_service
            .convert(amount, from, &settings.main_currency, &settings.rates))
    }
}

fn validate_dividend(dividend: &Dividend) -> Result<(), CoreError> {
    if dividend.asset_name.trim().is_empty() {
        return Err(CoreError::ValidationError(
            "Dividend asset name must not be empty".into(),
        ));
    }
    if !dividend.value.is_finite() {
        return Err(CoreError::ValidationError(format!(
            "Dividend value must be a finite number, got {}",
            dividend.value
        )));
    }
    if dividend.currency.trim().is_empty() {
        return Err(CoreError::ValidationError(
            "Dividend currency must not be empty".into(),
        ));
    }
    Ok(())
}
