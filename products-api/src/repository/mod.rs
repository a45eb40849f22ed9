//! Product persistence
//!
//! [`ProductRepository`] is the contract handlers depend on.
//! [`InMemoryProductRepository`] is always available; the PostgreSQL store
//! needs the `database` feature.

pub mod error;
pub mod memory;
pub mod traits;

#[cfg(feature = "database")]
pub mod postgres;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use memory::InMemoryProductRepository;
pub use traits::{ProductRepository, RepositoryResult};

#[cfg(feature = "database")]
pub use postgres::PgProductRepository;
