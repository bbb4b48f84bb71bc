//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db, SchemaCapabilities},
    domain::{
        categories::{CategoriesService, PgCategoriesService},
        checkout::{CheckoutService, StoreSettings, StorefrontCheckoutService},
        products::{PgProductsService, ProductsService},
        testimonials::{PgTestimonialsService, TestimonialsService},
        vouchers::{PgVouchersService, VouchersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub categories: Arc<dyn CategoriesService>,
    pub vouchers: Arc<dyn VouchersService>,
    pub testimonials: Arc<dyn TestimonialsService>,
    pub checkout: Arc<dyn CheckoutService>,
}

impl AppContext {
    /// Build application context from a database URL. The schema is
    /// inspected once here; request handling never probes it again.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting to or inspecting the database fails.
    pub async fn from_database_url(
        url: &str,
        settings: StoreSettings,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let capabilities = SchemaCapabilities::detect(&pool)
            .await
            .map_err(AppInitError::Database)?;

        if !capabilities.products_availability {
            tracing::warn!(
                "products.is_available column not present; treating every product as available"
            );
        }

        let db = Db::new(pool);

        let products: Arc<dyn ProductsService> =
            Arc::new(PgProductsService::new(db.clone(), capabilities));
        let vouchers: Arc<dyn VouchersService> = Arc::new(PgVouchersService::new(db.clone()));

        let checkout = Arc::new(StorefrontCheckoutService::new(
            Arc::clone(&products),
            Arc::clone(&vouchers),
            settings,
        ));

        Ok(Self {
            products,
            categories: Arc::new(PgCategoriesService::new(db.clone())),
            vouchers,
            testimonials: Arc::new(PgTestimonialsService::new(db)),
            checkout,
        })
    }
}
