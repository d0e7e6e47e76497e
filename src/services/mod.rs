//! Business logic services

pub mod auth;
pub mod cart;
pub mod catalog;

use std::sync::Arc;

use crate::{error::AppResult, repository::Storage};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub cart: cart::CartService,
    pub catalog: catalog::CatalogService,
    storage: Arc<dyn Storage>,
}

impl Services {
    /// Create all services over the given storage
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            auth: auth::AuthService::new(storage.clone()),
            cart: cart::CartService::new(storage.clone()),
            catalog: catalog::CatalogService::new(storage.clone()),
            storage,
        }
    }

    /// Check storage connectivity
    pub async fn ping(&self) -> AppResult<()> {
        self.storage.ping().await
    }
}
