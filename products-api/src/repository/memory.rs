//! In-memory product store
//!
//! Used when no database is configured and as the deterministic store in
//! tests. All state sits behind one async `RwLock`, so each operation is
//! atomic with respect to the others.

use std::collections::BTreeMap;

use chrono::Utc;
use tokio::sync::RwLock;

use super::error::{RepositoryError, RepositoryOperation};
use super::traits::{ProductRepository, RepositoryResult};
use crate::models::{NewProduct, Product};

#[derive(Debug, Default)]
struct Store {
    last_id: i64,
    rows: BTreeMap<i64, Product>,
}

/// Product repository backed by a `BTreeMap`
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    store: RwLock<Store>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored products
    pub async fn len(&self) -> usize {
        self.store.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Product>> {
        Ok(self.store.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Product>> {
        Ok(self.store.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, product: NewProduct) -> RepositoryResult<Product> {
        let mut store = self.store.write().await;
        store.last_id += 1;

        let now = Utc::now();
        let created = Product {
            id: store.last_id,
            name: product.name,
            price: product.price,
            availability: product.availability,
            created_at: now,
            updated_at: now,
        };
        store.rows.insert(created.id, created.clone());

        Ok(created)
    }

    async fn save(&self, mut product: Product) -> RepositoryResult<Product> {
        let mut store = self.store.write().await;
        let Some(row) = store.rows.get_mut(&product.id) else {
            return Err(RepositoryError::not_found(RepositoryOperation::Save, product.id));
        };

        product.created_at = row.created_at;
        product.updated_at = Utc::now();
        *row = product.clone();

        Ok(product)
    }

    async fn destroy(&self, product: Product) -> RepositoryResult<()> {
        self.store
            .write()
            .await
            .rows
            .remove(&product.id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found(RepositoryOperation::Destroy, product.id))
    }

    async fn ping(&self) -> RepositoryResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepositoryErrorKind;

    fn new_product(name: &str, price: f64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price,
            availability: true,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryProductRepository::new();
        let first = repo.create(new_product("Mouse", 20.0)).await.unwrap();
        let second = repo.create(new_product("Keyboard", 45.0)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_find_all_is_ordered_by_id() {
        let repo = InMemoryProductRepository::new();
        for name in ["c", "a", "b"] {
            repo.create(new_product(name, 1.0)).await.unwrap();
        }

        let ids: Vec<i64> = repo.find_all().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let repo = InMemoryProductRepository::new();
        assert!(repo.find_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_preserves_created_at() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(new_product("Mouse", 20.0)).await.unwrap();

        let mut changed = created.clone();
        changed.price = 25.0;
        changed.created_at = Utc::now() + chrono::Duration::days(1);
        let saved = repo.save(changed).await.unwrap();

        assert_eq!(saved.price, 25.0);
        assert_eq!(saved.created_at, created.created_at);
        assert!(saved.updated_at >= created.updated_at);
        assert_eq!(repo.find_by_id(created.id).await.unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn test_save_after_destroy_is_not_found() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(new_product("Mouse", 20.0)).await.unwrap();
        repo.destroy(created.clone()).await.unwrap();

        let err = repo.save(created.clone()).await.unwrap_err();
        assert_eq!(err.kind, RepositoryErrorKind::NotFound);

        let err = repo.destroy(created).await.unwrap_err();
        assert_eq!(err.operation, RepositoryOperation::Destroy);
        assert!(repo.is_empty().await);
    }
}
