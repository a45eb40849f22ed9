//! Product repository trait
//!
//! Uses RPITIT (Return Position Impl Trait In Traits) for async methods
//! without `async_trait`. The trait is therefore not object safe; handlers are
//! generic over the repository and the concrete store is chosen at startup.

use std::future::Future;

use super::error::RepositoryError;
use crate::models::{NewProduct, Product};

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Persistence contract the request handlers rely on
///
/// Handlers always call [`find_by_id`](Self::find_by_id) before
/// [`save`](Self::save) or [`destroy`](Self::destroy). Implementations must
/// report a row that disappeared in between as
/// [`RepositoryErrorKind::NotFound`](super::RepositoryErrorKind::NotFound)
/// rather than writing a partial result.
pub trait ProductRepository: Send + Sync + 'static {
    /// Every stored product, ordered by id
    fn find_all(&self) -> impl Future<Output = RepositoryResult<Vec<Product>>> + Send;

    /// Look a product up by id
    ///
    /// Returns `Ok(None)` when no product has that id.
    fn find_by_id(
        &self,
        id: i64,
    ) -> impl Future<Output = RepositoryResult<Option<Product>>> + Send;

    /// Insert a product; the store assigns the id and timestamps
    fn create(&self, product: NewProduct) -> impl Future<Output = RepositoryResult<Product>> + Send;

    /// Write back a product previously returned by `find_by_id`
    ///
    /// Returns the stored row with a refreshed `updated_at`.
    fn save(&self, product: Product) -> impl Future<Output = RepositoryResult<Product>> + Send;

    /// Remove a product previously returned by `find_by_id`
    fn destroy(&self, product: Product) -> impl Future<Output = RepositoryResult<()>> + Send;

    /// Check that the store is reachable
    fn ping(&self) -> impl Future<Output = RepositoryResult<()>> + Send;
}
