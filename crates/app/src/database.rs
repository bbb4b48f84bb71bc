//! Database connection management

use sqlx::{PgPool, Postgres, Transaction, query_scalar};

/// Probe for the optional `products.is_available` column. Older deployments
/// predate the column; the schema is inspected once at startup instead of
/// retrying failed statements per request.
const PRODUCTS_AVAILABILITY_PROBE_SQL: &str = "SELECT EXISTS (
    SELECT 1
    FROM information_schema.columns
    WHERE table_schema = current_schema()
      AND table_name = 'products'
      AND column_name = 'is_available'
)";

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction fails.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// What the connected schema supports, resolved once when the app starts.
/// Queries are specialized against this instead of probing per request.
#[derive(Debug, Clone, Copy)]
pub struct SchemaCapabilities {
    /// Whether `products.is_available` exists. When it does not, every
    /// product is treated as available.
    pub products_availability: bool,
}

impl SchemaCapabilities {
    /// Capabilities of a fully migrated schema.
    #[must_use]
    pub const fn assume_full() -> Self {
        Self {
            products_availability: true,
        }
    }

    /// Inspect the connected database.
    ///
    /// # Errors
    ///
    /// Returns an error when the `information_schema` query fails.
    pub async fn detect(pool: &PgPool) -> Result<Self, sqlx::Error> {
        let products_availability: bool = query_scalar(PRODUCTS_AVAILABILITY_PROBE_SQL)
            .fetch_one(pool)
            .await?;

        Ok(Self {
            products_availability,
        })
    }

    /// SELECT-list expression yielding an `is_available` column either way.
    pub(crate) fn availability_column(self) -> &'static str {
        if self.products_availability {
            "is_available"
        } else {
            "TRUE AS is_available"
        }
    }

    /// WHERE-clause term for "visible to shoppers unless $3 includes hidden
    /// products". Keeps the `$3` placeholder alive when the column is absent
    /// so the bind count stays fixed.
    pub(crate) fn availability_filter(self) -> &'static str {
        if self.products_availability {
            "(is_available OR $3)"
        } else {
            "($3::boolean OR TRUE)"
        }
    }
}
