//! Entity data accessor: the five fixed statements of one table, run against an injected store.

use crate::error::StoreError;
use crate::model::{Payload, Resource};
use crate::sql::{delete, insert, select_by_id, select_list, update};
use crate::store::Store;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

pub struct EntityAccessor<R: Resource> {
    store: Arc<dyn Store>,
    _resource: PhantomData<R>,
}

impl<R: Resource> EntityAccessor<R> {
    pub fn new(store: Arc<dyn Store>) -> Self {
        EntityAccessor {
            store,
            _resource: PhantomData,
        }
    }

    /// Every row with the reference display name joined in. An empty table is an empty list.
    pub async fn list(&self) -> Result<Vec<Value>, StoreError> {
        self.store.fetch_all(&select_list(R::TABLE)).await
    }

    /// Zero or one row.
    pub async fn get(&self, id: i64) -> Result<Option<Value>, StoreError> {
        let rows = self.store.fetch_all(&select_by_id(R::TABLE, id)).await?;
        Ok(rows.into_iter().next())
    }

    /// Insert; the identifier is assigned by the store. Returns the affected-row count.
    pub async fn insert(&self, body: &R::Create) -> Result<u64, StoreError> {
        self.store.execute(&insert(R::TABLE, &body.assignments())).await
    }

    /// Returns the affected-row count; 0 means no row has this id.
    pub async fn update(&self, id: i64, body: &R::Update) -> Result<u64, StoreError> {
        self.store.execute(&update(R::TABLE, id, &body.assignments())).await
    }

    /// Returns the affected-row count; 0 means no row has this id.
    pub async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        self.store.execute(&delete(R::TABLE, id)).await
    }
}
