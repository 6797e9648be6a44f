//! Postgres-backed product catalog.
//!
//! Each session is a database transaction; dropping a session without calling
//! `commit` rolls it back.
//!
//! ## Table layout
//!
//! One `products` table, unique on `sku`. The `id BIGSERIAL` column records
//! first-insertion order and is left untouched by `ON CONFLICT (sku) DO UPDATE`,
//! which gives list and search a stable order.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | Database (any code) | `Database` (message + SQLSTATE) |
//! | PoolClosed / PoolTimedOut | `Database` |
//! | Decode / ColumnNotFound | `InvalidRecord` |
//! | Other | `Database` |

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, QueryBuilder, Row, Transaction};
use tracing::{debug, info, instrument};

use streamoid_core::{PageRequest, Sku};
use streamoid_products::{NewProduct, Product, SearchFilter};

use super::r#trait::{CatalogSession, CatalogStore, StoreError};

const CREATE_PRODUCTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id BIGSERIAL PRIMARY KEY,
        sku TEXT NOT NULL UNIQUE,
        name TEXT NOT NULL,
        brand TEXT NOT NULL,
        color TEXT,
        size TEXT,
        mrp NUMERIC NOT NULL,
        price NUMERIC NOT NULL,
        quantity BIGINT NOT NULL DEFAULT 0,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT products_price_within_mrp CHECK (price <= mrp),
        CONSTRAINT products_quantity_non_negative CHECK (quantity >= 0)
    )
"#;

const PRODUCT_COLUMNS: &str = "sku, name, brand, color, size, mrp, price, quantity";

/// Postgres-backed catalog store.
///
/// Uses the SQLx connection pool, which is `Send + Sync` and cheap to clone.
#[derive(Debug, Clone)]
pub struct PostgresCatalogStore {
    pool: PgPool,
}

impl PostgresCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the `products` table when it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_PRODUCTS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        info!("products table ready");
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for PostgresCatalogStore {
    async fn session(&self) -> Result<Box<dyn CatalogSession>, StoreError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin", e))?;
        Ok(Box::new(PostgresSession { tx }))
    }
}

struct PostgresSession {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl CatalogSession for PostgresSession {
    #[instrument(skip(self, product), fields(sku = %product.sku()), err)]
    async fn upsert(&mut self, product: &Product) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO products (sku, name, brand, color, size, mrp, price, quantity)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (sku)
            DO UPDATE SET
                name = EXCLUDED.name,
                brand = EXCLUDED.brand,
                color = EXCLUDED.color,
                size = EXCLUDED.size,
                mrp = EXCLUDED.mrp,
                price = EXCLUDED.price,
                quantity = EXCLUDED.quantity,
                updated_at = NOW()
            "#,
        )
        .bind(product.sku().as_str())
        .bind(product.name())
        .bind(product.brand())
        .bind(product.color())
        .bind(product.size())
        .bind(product.mrp())
        .bind(product.price())
        .bind(product.quantity())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_sqlx_error("upsert", e))?;
        Ok(())
    }

    #[instrument(skip(self, page), fields(page = page.page(), limit = page.limit()), err)]
    async fn list(&mut self, page: PageRequest) -> Result<Vec<Product>, StoreError> {
        let offset = i64::try_from(page.offset())
            .map_err(|_| StoreError::Database("page offset out of range".to_string()))?;

        let rows = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id ASC LIMIT $1 OFFSET $2"
        ))
        .bind(i64::from(page.limit()))
        .bind(offset)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| map_sqlx_error("list", e))?;

        debug!(count = rows.len(), "listed products");
        rows.iter().map(product_from_row).collect()
    }

    #[instrument(skip(self, filter), err)]
    async fn search(&mut self, filter: &SearchFilter) -> Result<Vec<Product>, StoreError> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE TRUE"));

        if let Some(brand) = filter.brand() {
            qb.push(" AND brand ILIKE ").push_bind(contains_pattern(brand));
        }
        if let Some(color) = filter.color() {
            qb.push(" AND color ILIKE ").push_bind(contains_pattern(color));
        }
        if let Some(min) = filter.min_price() {
            qb.push(" AND price >= ").push_bind(min);
        }
        if let Some(max) = filter.max_price() {
            qb.push(" AND price <= ").push_bind(max);
        }
        qb.push(" ORDER BY id ASC");

        let rows = qb
            .build()
            .fetch_all(&mut *self.tx)
            .await
            .map_err(|e| map_sqlx_error("search", e))?;

        debug!(count = rows.len(), "searched products");
        rows.iter().map(product_from_row).collect()
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.tx
            .commit()
            .await
            .map_err(|e| map_sqlx_error("commit", e))
    }
}

/// `ILIKE` pattern matching `needle` anywhere, with LIKE metacharacters in the
/// needle taken literally.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn product_from_row(row: &PgRow) -> Result<Product, StoreError> {
    let decode = |e: sqlx::Error| map_sqlx_error("decode product row", e);

    let sku: String = row.try_get("sku").map_err(decode)?;
    let sku = Sku::new(sku).map_err(|e| StoreError::InvalidRecord(e.to_string()))?;
    let mrp: Decimal = row.try_get("mrp").map_err(decode)?;
    let price: Decimal = row.try_get("price").map_err(decode)?;

    Product::new(NewProduct {
        name: row.try_get("name").map_err(decode)?,
        brand: row.try_get("brand").map_err(decode)?,
        color: row.try_get("color").map_err(decode)?,
        size: row.try_get("size").map_err(decode)?,
        quantity: row.try_get("quantity").map_err(decode)?,
        sku: sku.clone(),
        mrp,
        price,
    })
    .map_err(|v| StoreError::InvalidRecord(format!("{sku}: {v}")))
}

/// Map SQLx errors to StoreError.
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let code = db_err.code().map(|c| c.into_owned()).unwrap_or_default();
            StoreError::Database(format!(
                "database error in {operation} (code {code}): {}",
                db_err.message()
            ))
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) | sqlx::Error::ColumnNotFound(_) => {
            StoreError::InvalidRecord(format!("{operation}: {err}"))
        }
        sqlx::Error::PoolClosed => {
            StoreError::Database(format!("connection pool closed in {operation}"))
        }
        sqlx::Error::PoolTimedOut => {
            StoreError::Database(format!("timed out acquiring connection in {operation}"))
        }
        _ => StoreError::Database(format!("sqlx error in {operation}: {err}")),
    }
}
