// ═══════════════════════════════════════════════════════════════════
// Storage Tests — MemoryStore against the Store contract
// ═══════════════════════════════════════════════════════════════════

use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use asset_tracker_core::models::dividend::Dividend;
use asset_tracker_core::models::settings::Settings;
use asset_tracker_core::models::transaction::{Transaction, TransactionKind};
use asset_tracker_core::storage::memory::MemoryStore;
use asset_tracker_core::storage::traits::Store;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn tx(name: &str, value: f64, date: NaiveDate) -> Transaction {
    Transaction {
        id: Uuid::new_v4(),
        asset_name: name.to_string(),
        asset_category: "Stock".to_string(),
        kind: TransactionKind::Deposit,
        value,
        currency: "USD".to_string(),
        date,
        created_at: None,
        description: None,
    }
}

// ── Transactions ────────────────────────────────────────────────────

mod transactions {
    use super::*;

    #[tokio::test]
    async fn starts_empty() {
        let store = MemoryStore::new();
        assert!(store.transactions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn put_then_get_by_id() {
        let store = MemoryStore::new();
        let t = tx("Fund", 100.0, d(2023, 1, 1));
        store.put_transaction(t.clone()).await.unwrap();

        let found = store.transaction_by_id(t.id).await.unwrap();
        assert_eq!(found, Some(t));
    }

    #[tokio::test]
    async fn get_by_unknown_id_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.transaction_by_id(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_with_same_id_upserts() {
        let store = MemoryStore::new();
        let mut t = tx("Fund", 100.0, d(2023, 1, 1));
        store.put_transaction(t.clone()).await.unwrap();

        t.value = 250.0;
        store.put_transaction(t.clone()).await.unwrap();

        let all = store.transactions().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].value, 250.0);
    }

    #[tokio::test]
    async fn listing_is_date_ordered() {
        let store = MemoryStore::new();
        store.put_transaction(tx("Fund", 3.0, d(2023, 3, 1))).await.unwrap();
        store.put_transaction(tx("Fund", 1.0, d(2023, 1, 1))).await.unwrap();
        store.put_transaction(tx("Fund", 2.0, d(2023, 2, 1))).await.unwrap();

        let dates: Vec<NaiveDate> = store
            .transactions()
            .await
            .unwrap()
            .iter()
            .map(|t| t.date)
            .collect();
        assert_eq!(dates, vec![d(2023, 1, 1), d(2023, 2, 1), d(2023, 3, 1)]);
    }

    #[tokio::test]
    async fn listing_breaks_date_ties_by_created_at() {
        let store = MemoryStore::new();
        let mut late = tx("Fund", 2.0, d(2023, 1, 1));
        late.created_at = Some(Utc.with_ymd_and_hms(2023, 1, 1, 18, 0, 0).unwrap());
        let mut early = tx("Fund", 1.0, d(2023, 1, 1));
        early.created_at = Some(Utc.with_ymd_and_hms(2023, 1, 1, 9, 0, 0).unwrap());

        store.put_transaction(late).await.unwrap();
        store.put_transaction(early).await.unwrap();

        let values: Vec<f64> = store
            .transactions()
            .await
            .unwrap()
            .iter()
            .map(|t| t.value)
            .collect();
        assert_eq!(values, vec![1.0, 2.0]);
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let store = MemoryStore::new();
        let t = tx("Fund", 100.0, d(2023, 1, 1));
        store.put_transaction(t.clone()).await.unwrap();
        store.delete_transaction(t.id).await.unwrap();
        assert!(store.transactions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_of_unknown_id_is_a_no_op() {
        let store = MemoryStore::new();
        store.put_transaction(tx("Fund", 100.0, d(2023, 1, 1))).await.unwrap();
        store.delete_transaction(Uuid::new_v4()).await.unwrap();
        assert_eq!(store.transactions().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn bulk_put_upserts_every_record() {
        let store = MemoryStore::new();
        let a = tx("Fund", 100.0, d(2023, 1, 1));
        let mut b = tx("Fund", 200.0, d(2023, 2, 1));
        store.put_transaction(b.clone()).await.unwrap();

        b.value = 999.0;
        store.bulk_put_transactions(vec![a, b]).await.unwrap();

        let all = store.transactions().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].value, 999.0);
    }

    #[tokio::test]
    async fn clear_drops_everything() {
        let store = MemoryStore::new();
        store.put_transaction(tx("Fund", 1.0, d(2023, 1, 1))).await.unwrap();
        store.put_transaction(tx("Cash", 2.0, d(2023, 1, 2))).await.unwrap();
        store.clear_transactions().await.unwrap();
        assert!(store.transactions().await.unwrap().is_empty());
    }
}

// ── Dividends ───────────────────────────────────────────────────────

mod dividends {
    use super::*;

    #[tokio::test]
    async fn put_get_delete_roundtrip() {
        let store = MemoryStore::new();
        let dividend = Dividend::new("Fund", d(2023, 3, 15), 12.5, "USD");
        store.put_dividend(dividend.clone()).await.unwrap();

        assert_eq!(
            store.dividend_by_id(dividend.id).await.unwrap(),
            Some(dividend.clone())
        );

        store.delete_dividend(dividend.id).await.unwrap();
        assert!(store.dividends().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn listing_is_date_ordered() {
        let store = MemoryStore::new();
        store
            .put_dividend(Dividend::new("Fund", d(2023, 6, 1), 3.0, "USD"))
            .await
            .unwrap();
        store
            .put_dividend(Dividend::new("Fund", d(2023, 1, 1), 1.0, "USD"))
            .await
            .unwrap();

        let dates: Vec<NaiveDate> = store
            .dividends()
            .await
            .unwrap()
            .iter()
            .map(|div| div.date)
            .collect();
        assert_eq!(dates, vec![d(2023, 1, 1), d(2023, 6, 1)]);
    }

    #[tokio::test]
    async fn bulk_put_and_clear() {
        let store = MemoryStore::new();
        store
            .bulk_put_dividends(vec![
                Dividend::new("Fund", d(2023, 1, 1), 1.0, "USD"),
                Dividend::new("Tech", d(2023, 2, 1), 2.0, "USD"),
            ])
            .await
            .unwrap();
        assert_eq!(store.dividends().await.unwrap().len(), 2);

        store.clear_dividends().await.unwrap();
        assert!(store.dividends().await.unwrap().is_empty());
    }
}

// ── Settings ────────────────────────────────────────────────────────

mod settings {
    use super::*;

    #[tokio::test]
    async fn absent_until_first_put() {
        let store = MemoryStore::new();
        assert_eq!(store.settings().await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_then_get_roundtrip() {
        let store = MemoryStore::new();
        let mut settings = Settings::default();
        settings.main_currency = "EUR".to_string();
        settings.rates.insert("USD".to_string(), 1.0);

        store.put_settings(settings.clone()).await.unwrap();
        assert_eq!(store.settings().await.unwrap(), Some(settings));
    }

    #[tokio::test]
    async fn put_replaces_the_singleton() {
        let store = MemoryStore::new();
        store.put_settings(Settings::default()).await.unwrap();

        let mut updated = Settings::default();
        updated.main_currency = "PLN".to_string();
        store.put_settings(updated.clone()).await.unwrap();

        assert_eq!(
            store.settings().await.unwrap().map(|s| s.main_currency),
            Some("PLN".to_string())
        );
    }
}
