//! Application state management

use std::sync::Arc;

use crate::{config::Config, repository::ProductRepository};

/// Application state shared across handlers
///
/// Generic over the product store so the concrete repository is fixed once
/// at startup.
pub struct AppState<R> {
    config: Arc<Config>,
    repository: Arc<R>,
}

// Manual impl: cloning only bumps the `Arc`s, `R` itself need not be `Clone`
impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ProductRepository> AppState<R> {
    /// Create a new AppState with the given configuration and store
    pub fn new(config: Config, repository: R) -> Self {
        Self {
            config: Arc::new(config),
            repository: Arc::new(repository),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the product store
    pub fn repository(&self) -> &R {
        &self.repository
    }
}
