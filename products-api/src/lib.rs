//! # products-api
//!
//! Product catalogue REST service. Requests pass a declarative validation
//! gate before reaching the handlers, and every response is one of
//! `{ data }`, `{ errors: [...] }` or `{ error }`.
//!
//! ## Features
//!
//! - **Validation gate**: every rule bound to a route runs, failures are
//!   reported together in declaration order
//! - **Pluggable persistence**: in-memory store, or PostgreSQL with the
//!   `database` feature
//! - **Middleware stack**: CORS, request ids, body limit, timeout, panic recovery
//! - **Health checks**: liveness and readiness checks
//! - **Graceful shutdown**: SIGTERM and SIGINT
//!
//! ## Example
//!
//! ```rust,no_run
//! use products_api::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let state = AppState::new(config.clone(), InMemoryProductRepository::new());
//!
//!     Server::new(config).serve(app(state)).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod repository;
pub mod routes;
pub mod server;
pub mod state;
pub mod validation;

#[cfg(feature = "database")]
pub mod database;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Config, DatabaseConfig, MiddlewareConfig, ServiceConfig};
    pub use crate::error::{Error, ErrorResponse, Result};
    pub use crate::handlers::{ApiError, ApiErrorKind, ApiOperation, ItemResponse};
    pub use crate::health::{health, readiness};
    pub use crate::models::{NewProduct, Product, ProductPayload};
    pub use crate::observability::init_tracing;
    pub use crate::repository::{
        InMemoryProductRepository, ProductRepository, RepositoryError, RepositoryErrorKind,
        RepositoryOperation, RepositoryResult,
    };
    pub use crate::routes::{app, products_router};
    pub use crate::server::Server;
    pub use crate::state::AppState;
    pub use crate::validation::{ProductId, ValidationError};

    #[cfg(feature = "database")]
    pub use crate::database::create_pool;

    #[cfg(feature = "database")]
    pub use crate::repository::PgProductRepository;

    pub use axum::{
        extract::State,
        routing::{delete, get, patch, post, put},
        Json, Router,
    };

    pub use tokio;
    pub use tracing::{debug, error, info, warn};
}
