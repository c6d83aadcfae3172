//! Business logic services

pub mod lending;

use std::sync::Arc;

use crate::{config::LendingConfig, repository::CatalogStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub lending: lending::LendingService,
}

impl Services {
    /// Create all services on top of the given catalog store
    pub fn new(store: Arc<dyn CatalogStore>, lending_config: LendingConfig) -> Self {
        Self {
            lending: lending::LendingService::new(store, lending_config),
        }
    }
}
