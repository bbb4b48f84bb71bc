//! Products service.

use async_trait::async_trait;
use kiosk::inventory::InventoryRecord;
use mockall::automock;

use crate::{
    database::{Db, SchemaCapabilities},
    domain::products::{
        data::{NewProduct, ProductFilter, ProductUpdate},
        errors::ProductsServiceError,
        records::{Product, ProductUuid, StockLevel},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db, capabilities: SchemaCapabilities) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(capabilities),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn get_products(
        &self,
        products: Vec<ProductUuid>,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self
            .repository
            .get_products_by_uuids(&mut tx, &products)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn stock_levels(
        &self,
        products: Vec<ProductUuid>,
    ) -> Result<Vec<InventoryRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let levels = self.repository.stock_levels(&mut tx, &products).await?;

        tx.commit().await?;

        Ok(levels.into_iter().map(into_inventory_record).collect())
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, &product).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

fn into_inventory_record(level: StockLevel) -> InventoryRecord {
    InventoryRecord {
        product_id: level.uuid.to_string(),
        stock_count: level.stock,
        is_available: level.is_available,
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves products matching the filter, newest first.
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError>;

    /// Retrieve the given products; unknown uuids are silently absent from
    /// the result.
    async fn get_products(
        &self,
        products: Vec<ProductUuid>,
    ) -> Result<Vec<Product>, ProductsServiceError>;

    /// Current stock and availability for the given products, in the shape
    /// cart reconciliation consumes.
    async fn stock_levels(
        &self,
        products: Vec<ProductUuid>,
    ) -> Result<Vec<InventoryRecord>, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Updates a product with the given UUID and update.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Deletes a product with the given UUID.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}
