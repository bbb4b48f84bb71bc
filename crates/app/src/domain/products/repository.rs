//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::SchemaCapabilities,
    domain::{
        categories::records::CategoryUuid,
        products::{
            data::{NewProduct, ProductFilter, ProductUpdate},
            records::{Product, ProductUuid, StockLevel},
        },
    },
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const GET_PRODUCTS_BY_UUIDS_SQL: &str = include_str!("sql/get_products_by_uuids.sql");
const STOCK_LEVELS_SQL: &str = include_str!("sql/stock_levels.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

/// Queries are specialized once against the detected schema; the availability
/// placeholders resolve to the real column or a constant.
#[derive(Debug, Clone)]
pub(crate) struct PgProductsRepository {
    list_sql: String,
    get_sql: String,
    get_by_uuids_sql: String,
    stock_levels_sql: String,
    create_sql: String,
    update_sql: String,
}

fn specialize(template: &str, capabilities: SchemaCapabilities) -> String {
    template
        .replace("{availability_column}", capabilities.availability_column())
        .replace("{availability_filter}", capabilities.availability_filter())
}

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new(capabilities: SchemaCapabilities) -> Self {
        Self {
            list_sql: specialize(LIST_PRODUCTS_SQL, capabilities),
            get_sql: specialize(GET_PRODUCT_SQL, capabilities),
            get_by_uuids_sql: specialize(GET_PRODUCTS_BY_UUIDS_SQL, capabilities),
            stock_levels_sql: specialize(STOCK_LEVELS_SQL, capabilities),
            create_sql: specialize(CREATE_PRODUCT_SQL, capabilities),
            update_sql: specialize(UPDATE_PRODUCT_SQL, capabilities),
        }
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(&self.list_sql)
            .bind(filter.category.map(CategoryUuid::into_uuid))
            .bind(filter.search.as_deref())
            .bind(filter.include_unavailable)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(&self.get_sql)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_products_by_uuids(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductUuid],
    ) -> Result<Vec<Product>, sqlx::Error> {
        let uuids: Vec<Uuid> = products.iter().copied().map(ProductUuid::into_uuid).collect();

        query_as::<Postgres, Product>(&self.get_by_uuids_sql)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn stock_levels(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductUuid],
    ) -> Result<Vec<StockLevel>, sqlx::Error> {
        let uuids: Vec<Uuid> = products.iter().copied().map(ProductUuid::into_uuid).collect();

        query_as::<Postgres, StockLevel>(&self.stock_levels_sql)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &NewProduct,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(&self.create_sql)
            .bind(product.uuid.into_uuid())
            .bind(&product.name)
            .bind(product.description.as_deref())
            .bind(price_to_db(product.price)?)
            .bind(product.image_url.as_deref())
            .bind(product.category.map(CategoryUuid::into_uuid))
            .bind(stock_to_db(product.stock)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        update: &ProductUpdate,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(&self.update_sql)
            .bind(product.into_uuid())
            .bind(&update.name)
            .bind(update.description.as_deref())
            .bind(price_to_db(update.price)?)
            .bind(update.image_url.as_deref())
            .bind(update.category.map(CategoryUuid::into_uuid))
            .bind(stock_to_db(update.stock)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn price_to_db(price: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(price).map_err(|e| sqlx::Error::ColumnDecode {
        index: "price".to_string(),
        source: Box::new(e),
    })
}

fn stock_to_db(stock: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(stock).map_err(|e| sqlx::Error::ColumnDecode {
        index: "stock".to_string(),
        source: Box::new(e),
    })
}

fn price_from_db(price: i64) -> Result<u64, sqlx::Error> {
    u64::try_from(price).map_err(|e| sqlx::Error::ColumnDecode {
        index: "price".to_string(),
        source: Box::new(e),
    })
}

fn stock_from_db(stock: i32) -> Result<u32, sqlx::Error> {
    u32::try_from(stock).map_err(|e| sqlx::Error::ColumnDecode {
        index: "stock".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: price_from_db(row.try_get("price")?)?,
            image_url: row.try_get("image_url")?,
            category: row
                .try_get::<Option<Uuid>, _>("category_uuid")?
                .map(CategoryUuid::from_uuid),
            stock: stock_from_db(row.try_get("stock")?)?,
            is_available: row.try_get("is_available")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for StockLevel {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            stock: stock_from_db(row.try_get("stock")?)?,
            is_available: row.try_get("is_available")?,
        })
    }
}
