//! Shared application state for all routes.

use crate::model::Resource;
use crate::service::EntityAccessor;
use crate::store::Store;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        AppState { store }
    }

    pub fn accessor<R: Resource>(&self) -> EntityAccessor<R> {
        EntityAccessor::new(self.store.clone())
    }
}
