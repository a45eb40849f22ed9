//! PostgreSQL product store

use sqlx::PgPool;

use super::error::{RepositoryError, RepositoryOperation};
use super::traits::{ProductRepository, RepositoryResult};
use crate::models::{NewProduct, Product};

const COLUMNS: &str = "id, name, price, availability, created_at, updated_at";

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id BIGSERIAL PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    price DOUBLE PRECISION NOT NULL,
    availability BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

/// Product repository backed by a `products` table
#[derive(Debug, Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `products` table if it does not exist yet
    pub async fn ensure_schema(&self) -> RepositoryResult<()> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::from(e).with_operation(RepositoryOperation::Migrate))?;

        tracing::info!("Products schema is up to date");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn stamp(operation: RepositoryOperation) -> impl FnOnce(sqlx::Error) -> RepositoryError {
    move |e| RepositoryError::from(e).with_operation(operation)
}

impl ProductRepository for PgProductRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Product>> {
        sqlx::query_as::<_, Product>(&format!("SELECT {COLUMNS} FROM products ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(stamp(RepositoryOperation::FindAll))
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Product>> {
        sqlx::query_as::<_, Product>(&format!("SELECT {COLUMNS} FROM products WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| stamp(RepositoryOperation::FindById)(e).with_product(id))
    }

    async fn create(&self, product: NewProduct) -> RepositoryResult<Product> {
        sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (name, price, availability) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        ))
        .bind(&product.name)
        .bind(product.price)
        .bind(product.availability)
        .fetch_one(&self.pool)
        .await
        .map_err(stamp(RepositoryOperation::Create))
    }

    async fn save(&self, product: Product) -> RepositoryResult<Product> {
        sqlx::query_as::<_, Product>(&format!(
            "UPDATE products SET name = $2, price = $3, availability = $4, updated_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(product.availability)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| stamp(RepositoryOperation::Save)(e).with_product(product.id))?
        .ok_or_else(|| RepositoryError::not_found(RepositoryOperation::Save, product.id))
    }

    async fn destroy(&self, product: Product) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product.id)
            .execute(&self.pool)
            .await
            .map_err(|e| stamp(RepositoryOperation::Destroy)(e).with_product(product.id))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(
                RepositoryOperation::Destroy,
                product.id,
            ));
        }
        Ok(())
    }

    async fn ping(&self) -> RepositoryResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(stamp(RepositoryOperation::Ping))
    }
}
