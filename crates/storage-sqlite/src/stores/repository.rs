use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use super::model::StoreDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::stores;
use crate::schema::stores::dsl::*;
use crate::utils::{format_decimal, format_timestamp};
use wisebuy_core::errors::{Error, Result};
use wisebuy_core::stores::{
    NewStore, PricingSettingsUpdate, Store, StoreRepositoryTrait, StoreStatus,
};

/// Repository for managing stores in the database
pub struct StoreRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl StoreRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn store_not_found(store_id: &str) -> Error {
    Error::NotFound(format!("Store {} not found", store_id))
}

/// Loads a store row inside a writer job.
fn load_store(conn: &mut SqliteConnection, store_id: &str) -> Result<StoreDB> {
    stores
        .select(StoreDB::as_select())
        .find(store_id)
        .first::<StoreDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| store_not_found(store_id))
}

#[async_trait]
impl StoreRepositoryTrait for StoreRepository {
    async fn create(&self, new_store: NewStore) -> Result<Store> {
        let store_db: StoreDB = new_store.into();

        self.writer
            .exec(move |conn| {
                diesel::insert_into(stores::table)
                    .values(&store_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(store_db.into())
            })
            .await
    }

    fn get_by_id(&self, store_id: &str) -> Result<Store> {
        let mut conn = get_connection(&self.pool)?;
        load_store(&mut conn, store_id).map(Store::from)
    }

    fn find_by_admin_email(&self, email: &str) -> Result<Option<Store>> {
        let mut conn = get_connection(&self.pool)?;

        let store = stores
            .select(StoreDB::as_select())
            .filter(admin_email.eq(email))
            .first::<StoreDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        Ok(store.map(Store::from))
    }

    fn list(&self) -> Result<Vec<Store>> {
        let mut conn = get_connection(&self.pool)?;

        let results = stores
            .select(StoreDB::as_select())
            .order(created_at.desc())
            .load::<StoreDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Store::from).collect())
    }

    async fn update_status(&self, store_id: &str, new_status: StoreStatus) -> Result<Store> {
        let store_id = store_id.to_string();

        self.writer
            .exec(move |conn| {
                let mut store_db = load_store(conn, &store_id)?;
                store_db.status = new_status.as_str().to_string();
                store_db.updated_at = format_timestamp(chrono::Utc::now());

                diesel::update(stores.find(&store_id))
                    .set((status.eq(&store_db.status), updated_at.eq(&store_db.updated_at)))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(store_db.into())
            })
            .await
    }

    async fn update_pricing_settings(
        &self,
        store_id: &str,
        update: &PricingSettingsUpdate,
    ) -> Result<Store> {
        let store_id = store_id.to_string();
        let update = update.clone();

        self.writer
            .exec(move |conn| {
                let mut store_db = load_store(conn, &store_id)?;
                store_db.pricing_basis = update.pricing_basis.as_str().to_string();
                store_db.discount_percent = format_decimal(update.discount_percent);
                store_db.updated_at = format_timestamp(chrono::Utc::now());

                diesel::update(stores.find(&store_id))
                    .set(&store_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(store_db.into())
            })
            .await
    }
}
