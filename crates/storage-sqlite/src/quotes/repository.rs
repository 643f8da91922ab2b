use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use super::model::QuoteDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::quotes;
use wisebuy_core::errors::{Error, Result};
use wisebuy_core::quotes::{Quote, QuoteRepositoryTrait};

/// Repository for saved buy quotes
pub struct QuoteRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl QuoteRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl QuoteRepositoryTrait for QuoteRepository {
    async fn create(&self, quote: Quote) -> Result<Quote> {
        let row = QuoteDB::try_from(&quote)?;

        self.writer
            .exec(move |conn| {
                diesel::insert_into(quotes::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(quote)
            })
            .await
    }

    fn list_by_store(&self, store_id: &str) -> Result<Vec<Quote>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = quotes::table
            .select(QuoteDB::as_select())
            .filter(quotes::store_id.eq(store_id))
            .order(quotes::created_at.desc())
            .load::<QuoteDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(Quote::from).collect())
    }

    fn get_by_id(&self, quote_id: &str) -> Result<Quote> {
        let mut conn = get_connection(&self.pool)?;

        quotes::table
            .select(QuoteDB::as_select())
            .find(quote_id)
            .first::<QuoteDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(Quote::from)
            .ok_or_else(|| Error::NotFound(format!("Quote {} not found", quote_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use crate::stores::StoreRepository;
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;
    use tempfile::tempdir;
    use wisebuy_core::metals::MetalType;
    use wisebuy_core::quotes::{CustomerInfo, MeleeGroup, QuoteItemDraft, QuoteStatus};
    use wisebuy_core::stores::{NewStore, StoreRepositoryTrait};

    struct Fixture {
        quotes: QuoteRepository,
        store_id: String,
        _dir: tempfile::TempDir,
    }

    async fn setup() -> Fixture {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let pool = create_pool(db_path.to_str().unwrap()).unwrap();
        run_migrations(&pool).unwrap();
        let writer = spawn_writer((*pool).clone());

        let store = StoreRepository::new(pool.clone(), writer.clone())
            .create(NewStore {
                name: "Shop".to_string(),
                address: String::new(),
                phone: String::new(),
                website: None,
                admin_email: "owner@shop.example".to_string(),
                admin_name: "Owner".to_string(),
                admin_password_hash: "hash".to_string(),
                metal_markup: None,
                pricing_basis: None,
                discount_percent: None,
            })
            .await
            .unwrap();

        Fixture {
            quotes: QuoteRepository::new(pool, writer),
            store_id: store.id,
            _dir: dir,
        }
    }

    fn quote(id: &str, store_id: &str, minutes_ago: i64) -> Quote {
        let mut draft = QuoteItemDraft::new("14K chain");
        draft.set_metal(MetalType::Xau, Some("Yellow".to_string()), "14K (58.3%)");
        draft.set_weight(dec!(10));
        draft.set_metal_price(dec!(52.5));
        let melee = MeleeGroup::new(
            "Round".to_string(),
            "G".to_string(),
            "SI1".to_string(),
            20,
            dec!(0.5),
            dec!(8),
        )
        .unwrap();
        draft.add_melee_group(melee).unwrap();
        let item = draft.finalize().unwrap();

        Quote {
            id: id.to_string(),
            store_id: store_id.to_string(),
            customer: CustomerInfo {
                name: "Jordan Seller".to_string(),
                phone: Some("555-0199".to_string()),
                email: None,
                address: None,
            },
            total_value: item.total_value,
            items: vec![item],
            status: QuoteStatus::Completed,
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_quote() {
        let f = setup().await;
        f.quotes.create(quote("q1", &f.store_id, 0)).await.unwrap();

        let loaded = f.quotes.get_by_id("q1").unwrap();
        assert_eq!(loaded.store_id, f.store_id);
        assert_eq!(loaded.customer.name, "Jordan Seller");
        assert_eq!(loaded.items.len(), 1);
        assert_eq!(loaded.items[0].metal_value, dec!(525));
        assert_eq!(loaded.items[0].melee_groups[0].value, dec!(400));
        assert_eq!(loaded.total_value, dec!(925));
    }

    #[tokio::test]
    async fn test_list_by_store_is_newest_first() {
        let f = setup().await;
        f.quotes.create(quote("old", &f.store_id, 30)).await.unwrap();
        f.quotes.create(quote("new", &f.store_id, 1)).await.unwrap();

        let ids: Vec<String> = f
            .quotes
            .list_by_store(&f.store_id)
            .unwrap()
            .into_iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(ids, vec!["new".to_string(), "old".to_string()]);
        assert!(f.quotes.list_by_store("other-store").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_quote_and_unknown_store() {
        let f = setup().await;
        assert!(matches!(f.quotes.get_by_id("nope"), Err(Error::NotFound(_))));
        // quotes reference their store
        assert!(f.quotes.create(quote("q1", "no-such-store", 0)).await.is_err());
    }
}
