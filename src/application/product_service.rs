//! Product service - the externally consumed operation set
//!
//! Orchestrates the repository into the operations the request-handling
//! layer calls, layering expiration enforcement and response shaping on top
//! of the raw store primitives.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::application::dto::{
    AvailabilityReport, BulkUpdateOutcome, ProductPage, ProductResponse,
};
use crate::domain::errors::ProductError;
use crate::domain::product::{
    BulkQuantityUpdate, CategoryStats, NewProduct, ProductFilter, ProductPatch,
};
use crate::domain::validation::parse_numeric_string;
use crate::infrastructure::product_repository::ProductRepository;

#[derive(Clone)]
pub struct ProductService {
    repository: ProductRepository,
}

impl ProductService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: ProductRepository::new(pool),
        }
    }

    pub fn with_repository(repository: ProductRepository) -> Self {
        Self { repository }
    }

    /// Lookup that also enforces availability: an existing but expired
    /// product fails with `Expired` even though the row is there.
    pub async fn get_product(
        &self,
        product_id: i64,
        restaurant_id: Option<i64>,
    ) -> Result<ProductResponse, ProductError> {
        let product = self.repository.get_by_id(product_id, restaurant_id).await?;

        if product.is_expired_as_of(Utc::now().date_naive()) {
            return Err(ProductError::Expired {
                product_id,
                expire_date: product.expire_date.unwrap_or_default(),
            });
        }

        Ok(product.into())
    }

    pub async fn get_products(
        &self,
        skip: i64,
        limit: i64,
        filters: Option<&ProductFilter>,
    ) -> Result<ProductPage, ProductError> {
        let (products, total_count) = self.repository.get_all(skip, limit, filters).await?;
        Ok(ProductPage {
            products: products.into_iter().map(Into::into).collect(),
            total_count,
            skip,
            limit,
        })
    }

    pub async fn get_restaurant_products(
        &self,
        restaurant_id: i64,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<ProductResponse>, ProductError> {
        let products = self
            .repository
            .get_by_restaurant(restaurant_id, skip, limit)
            .await?;
        Ok(products.into_iter().map(Into::into).collect())
    }

    pub async fn get_expiring_products(
        &self,
        days: i64,
    ) -> Result<Vec<ProductResponse>, ProductError> {
        let products = self.repository.get_expiring(days).await?;
        Ok(products.into_iter().map(Into::into).collect())
    }

    pub async fn create_product(
        &self,
        data: &NewProduct,
    ) -> Result<ProductResponse, ProductError> {
        data.validate()?;
        let product = self.repository.create(data).await?;
        Ok(product.into())
    }

    pub async fn update_product(
        &self,
        product_id: i64,
        patch: &ProductPatch,
        restaurant_id: Option<i64>,
    ) -> Result<ProductResponse, ProductError> {
        let product = self
            .repository
            .update(product_id, patch, restaurant_id)
            .await?;
        Ok(product.into())
    }

    pub async fn delete_product(
        &self,
        product_id: i64,
        restaurant_id: Option<i64>,
    ) -> Result<bool, ProductError> {
        self.repository.delete(product_id, restaurant_id).await
    }

    /// Applies a signed quantity delta; the repository guarantees the stock
    /// never goes negative.
    pub async fn update_stock(
        &self,
        product_id: i64,
        quantity_change: &str,
        restaurant_id: Option<i64>,
    ) -> Result<ProductResponse, ProductError> {
        let product = self
            .repository
            .update_quantity(product_id, quantity_change, restaurant_id)
            .await?;
        Ok(product.into())
    }

    /// Availability probe combining stock level and expiration.
    ///
    /// `available` is true only when the quantity suffices AND the product
    /// is not expired. Parse failures on either quantity degrade to
    /// `available: false` (fail-closed), never an error.
    pub async fn check_availability(
        &self,
        product_id: i64,
        required_quantity: &str,
    ) -> Result<AvailabilityReport, ProductError> {
        let product = self.repository.get_by_id(product_id, None).await?;
        let is_expired = product.is_expired_as_of(Utc::now().date_naive());

        let available = match (
            parse_numeric_string("quantity", &product.quantity),
            parse_numeric_string("quantity", required_quantity),
        ) {
            (Ok(current), Ok(required)) => current >= required && !is_expired,
            _ => {
                debug!(product_id, "quantity parse failure, reporting unavailable");
                false
            }
        };

        Ok(AvailabilityReport {
            available,
            current_quantity: product.quantity,
            required_quantity: required_quantity.to_string(),
            is_expired,
            expire_date: product.expire_date,
        })
    }

    pub async fn get_category_statistics(
        &self,
        restaurant_id: Option<i64>,
    ) -> Result<Vec<CategoryStats>, ProductError> {
        self.repository.get_category_stats(restaurant_id).await
    }

    /// Best-effort batch of stock adjustments. Each entry commits
    /// independently; failures are captured inline and never abort the rest.
    pub async fn bulk_update_quantities(
        &self,
        updates: &[BulkQuantityUpdate],
    ) -> Result<Vec<BulkUpdateOutcome>, ProductError> {
        let mut outcomes = Vec::with_capacity(updates.len());

        for update in updates {
            let result = self
                .repository
                .update_quantity(
                    update.product_id,
                    &update.quantity_change,
                    update.restaurant_id,
                )
                .await;

            outcomes.push(match result {
                Ok(product) => BulkUpdateOutcome::Updated {
                    product: product.into(),
                },
                Err(error) => BulkUpdateOutcome::Failed {
                    product_id: update.product_id,
                    error: error.to_string(),
                },
            });
        }

        Ok(outcomes)
    }
}
