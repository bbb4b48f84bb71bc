//! Categories service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::categories::{
        data::NewCategory,
        errors::CategoriesServiceError,
        records::{Category, CategoryUuid},
        repository::PgCategoriesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCategoriesService {
    db: Db,
    repository: PgCategoriesRepository,
}

impl PgCategoriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCategoriesRepository::new(),
        }
    }
}

#[async_trait]
impl CategoriesService for PgCategoriesService {
    async fn list_categories(&self) -> Result<Vec<Category>, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<Category, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_category(&mut tx, &category).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn delete_category(&self, category: CategoryUuid) -> Result<(), CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_category(&mut tx, category).await?;

        if rows_affected == 0 {
            return Err(CategoriesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// All categories, alphabetically.
    async fn list_categories(&self) -> Result<Vec<Category>, CategoriesServiceError>;

    /// Creates a new category.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<Category, CategoriesServiceError>;

    /// Deletes a category; products referencing it fall back to
    /// uncategorized.
    async fn delete_category(&self, category: CategoryUuid) -> Result<(), CategoriesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::products::{ProductsService, data::NewProduct, records::ProductUuid},
        test::TestContext,
    };

    use super::*;

    #[tokio::test]
    async fn create_and_list_categories_sorted_by_name() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.categories
            .create_category(NewCategory {
                uuid: CategoryUuid::new(),
                name: "Robux".to_string(),
            })
            .await?;
        ctx.categories
            .create_category(NewCategory {
                uuid: CategoryUuid::new(),
                name: "Gamepass".to_string(),
            })
            .await?;

        let names: Vec<String> = ctx
            .categories
            .list_categories()
            .await?
            .into_iter()
            .map(|c| c.name)
            .collect();

        assert_eq!(names, ["Gamepass".to_string(), "Robux".to_string()]);

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_category_name_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.categories
            .create_category(NewCategory {
                uuid: CategoryUuid::new(),
                name: "Robux".to_string(),
            })
            .await?;

        let result = ctx
            .categories
            .create_category(NewCategory {
                uuid: CategoryUuid::new(),
                name: "Robux".to_string(),
            })
            .await;

        assert!(
            matches!(result, Err(CategoriesServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_category_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.categories.delete_category(CategoryUuid::new()).await;

        assert!(
            matches!(result, Err(CategoriesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn deleting_category_uncategorizes_its_products() -> TestResult {
        let ctx = TestContext::new().await;
        let category = ctx.create_category("Robux").await;

        let product = ctx
            .products
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                name: "Robux 800".to_string(),
                description: None,
                price: 100_000,
                image_url: None,
                category: Some(category),
                stock: 25,
            })
            .await?;

        ctx.categories.delete_category(category).await?;

        let product = ctx.products.get_product(product.uuid).await?;

        assert_eq!(product.category, None);

        Ok(())
    }
}
