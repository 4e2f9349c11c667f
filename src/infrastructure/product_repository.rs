//! Repository for product rows
//!
//! The only layer that touches the store directly. Owns lookup, filtered
//! listing, creation, update, deletion, stock mutation, the expiration scan
//! and category aggregation, and enforces restaurant scoping plus the
//! non-negative-quantity invariant.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::domain::errors::ProductError;
use crate::domain::product::{CategoryStats, NewProduct, Product, ProductFilter, ProductPatch};
use crate::domain::validation::{parse_numeric_string, DATE_FORMAT_ISO};

const PRODUCT_COLUMNS: &str = "id, price, quantity, category, expire_date, restaurant_id";

#[derive(Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Exact-match lookup. With a restaurant scope, a row owned by another
    /// restaurant is an access violation, not a missing row.
    pub async fn get_by_id(
        &self,
        product_id: i64,
        restaurant_id: Option<i64>,
    ) -> Result<Product, ProductError> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?");
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ProductError::NotFound { product_id })?;

        if let Some(restaurant_id) = restaurant_id {
            if product.restaurant_id != restaurant_id {
                return Err(ProductError::RestaurantAccess {
                    product_id,
                    restaurant_id,
                });
            }
        }

        Ok(product)
    }

    /// Filtered page of products plus the total match count ignoring
    /// pagination. No upper bound on `limit` is enforced here.
    pub async fn get_all(
        &self,
        skip: i64,
        limit: i64,
        filters: Option<&ProductFilter>,
    ) -> Result<(Vec<Product>, i64), ProductError> {
        let mut conditions: Vec<&str> = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(filters) = filters {
            if let Some(category) = &filters.category {
                conditions.push("category = ?");
                params.push(category.clone());
            }
            if let Some(restaurant_id) = filters.restaurant_id {
                conditions.push("restaurant_id = ?");
                params.push(restaurant_id.to_string());
            }
            if let Some(expire_before) = &filters.expire_before {
                conditions.push("expire_date <= ?");
                params.push(expire_before.clone());
            }
            if let Some(expire_after) = &filters.expire_after {
                conditions.push("expire_date >= ?");
                params.push(expire_after.clone());
            }
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_query = format!("SELECT COUNT(*) FROM products {where_clause}");
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count = count.bind(param);
        }
        let total = count.fetch_one(&self.pool).await?;

        let page_query = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products {where_clause} ORDER BY id ASC LIMIT ? OFFSET ?"
        );
        let mut page = sqlx::query_as::<_, Product>(&page_query);
        for param in &params {
            page = page.bind(param);
        }
        let products = page
            .bind(limit)
            .bind(skip)
            .fetch_all(&self.pool)
            .await?;

        debug!(total, returned = products.len(), "product listing");
        Ok((products, total))
    }

    /// Page of one restaurant's products. An empty page is reported as
    /// `NoneForRestaurant`; a restaurant with zero products is therefore
    /// indistinguishable from one that does not exist.
    pub async fn get_by_restaurant(
        &self,
        restaurant_id: i64,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Product>, ProductError> {
        let query = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE restaurant_id = ? ORDER BY id ASC LIMIT ? OFFSET ?"
        );
        let products = sqlx::query_as::<_, Product>(&query)
            .bind(restaurant_id)
            .bind(limit)
            .bind(skip)
            .fetch_all(&self.pool)
            .await?;

        if products.is_empty() {
            return Err(ProductError::NoneForRestaurant { restaurant_id });
        }

        Ok(products)
    }

    /// Products expiring in the inclusive window [today, today + days].
    ///
    /// The window is string-compared against the stored value, so only rows
    /// stored in `YYYY-MM-DD` form can match; `DD.MM.YYYY` rows are silently
    /// skipped by this scan.
    pub async fn get_expiring(&self, days: i64) -> Result<Vec<Product>, ProductError> {
        let today = Utc::now().date_naive();
        let target = today + Duration::days(days);

        let query = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE expire_date IS NOT NULL AND expire_date >= ? AND expire_date <= ? \
             ORDER BY expire_date ASC"
        );
        let products = sqlx::query_as::<_, Product>(&query)
            .bind(today.format(DATE_FORMAT_ISO).to_string())
            .bind(target.format(DATE_FORMAT_ISO).to_string())
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Persists a new product after re-checking the numeric fields.
    pub async fn create(&self, data: &NewProduct) -> Result<Product, ProductError> {
        parse_numeric_string("price", &data.price)?;
        parse_numeric_string("quantity", &data.quantity)?;

        let query = format!(
            "INSERT INTO products (price, quantity, category, expire_date, restaurant_id) \
             VALUES (?, ?, ?, ?, ?) RETURNING {PRODUCT_COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(&data.price)
            .bind(&data.quantity)
            .bind(&data.category)
            .bind(&data.expire_date)
            .bind(data.restaurant_id)
            .fetch_one(&self.pool)
            .await?;

        info!(product_id = product.id, restaurant_id = product.restaurant_id, "product created");
        Ok(product)
    }

    /// Applies only the fields present in `patch`, re-validating price and
    /// quantity when they are part of the update set.
    pub async fn update(
        &self,
        product_id: i64,
        patch: &ProductPatch,
        restaurant_id: Option<i64>,
    ) -> Result<Product, ProductError> {
        let current = self.get_by_id(product_id, restaurant_id).await?;
        if patch.is_empty() {
            return Ok(current);
        }

        let mut assignments: Vec<&str> = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(price) = &patch.price {
            parse_numeric_string("price", price)?;
            assignments.push("price = ?");
            params.push(price.clone());
        }
        if let Some(quantity) = &patch.quantity {
            parse_numeric_string("quantity", quantity)?;
            assignments.push("quantity = ?");
            params.push(quantity.clone());
        }
        if let Some(category) = &patch.category {
            assignments.push("category = ?");
            params.push(category.clone());
        }
        if let Some(expire_date) = &patch.expire_date {
            assignments.push("expire_date = ?");
            params.push(expire_date.clone());
        }
        if let Some(new_restaurant_id) = patch.restaurant_id {
            assignments.push("restaurant_id = ?");
            params.push(new_restaurant_id.to_string());
        }

        let query = format!(
            "UPDATE products SET {} WHERE id = ?",
            assignments.join(", ")
        );
        let mut update = sqlx::query(&query);
        for param in &params {
            update = update.bind(param);
        }
        update.bind(product_id).execute(&self.pool).await?;

        info!(product_id, "product updated");
        self.get_by_id(product_id, None).await
    }

    pub async fn delete(
        &self,
        product_id: i64,
        restaurant_id: Option<i64>,
    ) -> Result<bool, ProductError> {
        self.get_by_id(product_id, restaurant_id).await?;

        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        info!(product_id, "product deleted");
        Ok(true)
    }

    /// Applies a signed delta to the stored quantity.
    ///
    /// The read-modify-write runs inside one immediate transaction: the
    /// write lock is taken before the read, so concurrent adjustments on the
    /// same product serialize instead of racing to commit. A delta that
    /// would take the quantity below zero fails with `InsufficientQuantity`
    /// and leaves the row untouched.
    pub async fn update_quantity(
        &self,
        product_id: i64,
        quantity_change: &str,
        restaurant_id: Option<i64>,
    ) -> Result<Product, ProductError> {
        let change = parse_numeric_string("quantity", quantity_change)?;

        let mut conn = self.pool.acquire().await?;
        sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await?;

        let result =
            Self::apply_quantity_change(&mut conn, product_id, quantity_change, change, restaurant_id)
                .await;

        match result {
            Ok(product) => {
                sqlx::query("COMMIT").execute(&mut *conn).await?;
                info!(product_id, delta = quantity_change, "stock adjusted");
                Ok(product)
            }
            Err(error) => {
                sqlx::query("ROLLBACK").execute(&mut *conn).await.ok();
                Err(error)
            }
        }
    }

    async fn apply_quantity_change(
        conn: &mut SqliteConnection,
        product_id: i64,
        quantity_change: &str,
        change: Decimal,
        restaurant_id: Option<i64>,
    ) -> Result<Product, ProductError> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?");
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(product_id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or(ProductError::NotFound { product_id })?;

        if let Some(restaurant_id) = restaurant_id {
            if product.restaurant_id != restaurant_id {
                return Err(ProductError::RestaurantAccess {
                    product_id,
                    restaurant_id,
                });
            }
        }

        let current = parse_numeric_string("quantity", &product.quantity)?;
        let new_quantity = current + change;

        if new_quantity < Decimal::ZERO {
            return Err(ProductError::InsufficientQuantity {
                product_id,
                requested: quantity_change.to_string(),
                available: product.quantity,
            });
        }

        sqlx::query("UPDATE products SET quantity = ? WHERE id = ?")
            .bind(new_quantity.to_string())
            .bind(product_id)
            .execute(&mut *conn)
            .await?;

        Ok(Product {
            quantity: new_quantity.to_string(),
            ..product
        })
    }

    /// True iff the stored expiration date is strictly before today.
    /// Policy (absent or unparsable date reports not expired) lives on
    /// `Product::is_expired_as_of`.
    pub async fn check_expired(&self, product_id: i64) -> Result<bool, ProductError> {
        let product = self.get_by_id(product_id, None).await?;
        Ok(product.is_expired_as_of(Utc::now().date_naive()))
    }

    /// Count and summed quantity per category, optionally scoped to one
    /// restaurant. Quantities are summed as floats after cast and serialized
    /// back to strings, "0" when nothing summed.
    pub async fn get_category_stats(
        &self,
        restaurant_id: Option<i64>,
    ) -> Result<Vec<CategoryStats>, ProductError> {
        let where_clause = if restaurant_id.is_some() {
            "WHERE restaurant_id = ?"
        } else {
            ""
        };
        let query = format!(
            "SELECT category, COUNT(id) AS count, SUM(CAST(quantity AS REAL)) AS total_quantity \
             FROM products {where_clause} GROUP BY category ORDER BY category ASC"
        );

        let mut stats_query =
            sqlx::query_as::<_, (String, i64, Option<f64>)>(&query);
        if let Some(restaurant_id) = restaurant_id {
            stats_query = stats_query.bind(restaurant_id);
        }
        let rows = stats_query.fetch_all(&self.pool).await?;

        Ok(rows
            .into_iter()
            .map(|(category, count, total_quantity)| CategoryStats {
                category,
                count,
                total_quantity: total_quantity
                    .map_or_else(|| "0".to_string(), |total| total.to_string()),
            })
            .collect())
    }
}
