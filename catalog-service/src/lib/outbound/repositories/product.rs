use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::product::errors::ProductError;
use crate::product::models::Price;
use crate::product::models::Product;
use crate::product::models::ProductId;
use crate::product::models::ProductName;
use crate::product::ports::ProductRepository;
use crate::user::models::UserId;

/// Postgres-backed product store.
///
/// Writes are single-row statements, so a concurrent reader sees either the
/// record before the write or after it, never a partial edit. Duplicate ids
/// are rejected by the primary key constraint.
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_row(row: PgRow) -> Result<Product, ProductError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;
    let description: String = row
        .try_get("description")
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;
    let price: f64 = row
        .try_get("price")
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;
    let owner_user_id: Uuid = row
        .try_get("owner_user_id")
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;
    let updated_at: Option<DateTime<Utc>> = row
        .try_get("updated_at")
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

    Ok(Product {
        id: ProductId::new(id)?,
        name: ProductName::new(name)?,
        description,
        price: Price::new(price)?,
        owner_user_id: UserId(owner_user_id),
        created_at,
        updated_at,
    })
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: Product) -> Result<Product, ProductError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price, owner_user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(product.id.as_str())
        .bind(product.name.as_str())
        .bind(&product.description)
        .bind(product.price.value())
        .bind(product.owner_user_id.0)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return ProductError::AlreadyExists(product.id.to_string());
                }
            }
            ProductError::DatabaseError(e.to_string())
        })?;

        Ok(product)
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, price, owner_user_id, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        row.map(map_row).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Product>, ProductError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, price, owner_user_id, created_at, updated_at
            FROM products
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(map_row).collect()
    }

    async fn update(&self, product: Product) -> Result<Product, ProductError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, description = $3, price = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(product.id.as_str())
        .bind(product.name.as_str())
        .bind(&product.description)
        .bind(product.price.value())
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ProductError::NotFound(product.id.to_string()));
        }

        Ok(product)
    }

    async fn delete(&self, id: &ProductId) -> Result<(), ProductError> {
        let result = sqlx::query(
            r#"
            DELETE FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ProductError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
