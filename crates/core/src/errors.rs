use thiserror::Error;

/// Unified error type for the entire asset-tracker-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
///
/// Conversion unavailability (missing rate data) is deliberately NOT an
/// error: `CurrencyService::convert` returns `Option<f64>` and report
/// builders exclude the affected entries, so one bad currency never
/// aborts a whole report.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    #[error("Dividend not found: {0}")]
    DividendNotFound(String),

    // ── Storage ─────────────────────────────────────────────────────
    #[error("Store operation failed: {0}")]
    Persistence(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("Rate fetch failed ({provider}): {message}")]
    RateFetch {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    // ── Serialization ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Sanitize error message: strip query parameters from URLs so
        // request secrets never end up in logs or user-facing errors.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
