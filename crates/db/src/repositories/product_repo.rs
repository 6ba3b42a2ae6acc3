//! Repository for the `products` table, including the status
//! reconciliation pass.

use atelier_core::product::status as product_status;
use atelier_core::rental::ACTIVE_STATUSES;
use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::product::{CreateProduct, Product, UpdateProduct};
use crate::models::status::StatusId;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, sku, base_sku, parent_product_id, is_variant, \
                       status_id, quantity, rental_price_cents, category_id, color_id, size_id, \
                       created_at, updated_at";

/// Provides CRUD and reconciliation operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products
                (name, description, sku, base_sku, parent_product_id, is_variant,
                 status_id, quantity, rental_price_cents, category_id, color_id, size_id)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, FALSE),
                     COALESCE($7, 1), COALESCE($8, 1), $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.sku)
            .bind(&input.base_sku)
            .bind(input.parent_product_id)
            .bind(input.is_variant)
            .bind(input.status_id)
            .bind(input.quantity)
            .bind(input.rental_price_cents)
            .bind(input.category_id)
            .bind(input.color_id)
            .bind(input.size_id)
            .fetch_one(pool)
            .await
    }

    /// Find a product by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all products (variants included) ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products ORDER BY name, id");
        sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
    }

    /// List the size variants of a parent product.
    pub async fn list_variants(pool: &PgPool, parent_id: DbId) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products WHERE parent_product_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(parent_id)
            .fetch_all(pool)
            .await
    }

    /// List the variants of a batch of parents in one query (catalog
    /// pages).
    pub async fn list_variants_for_parents(
        pool: &PgPool,
        parent_ids: &[DbId],
    ) -> Result<Vec<Product>, sqlx::Error> {
        if parent_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM products WHERE parent_product_id = ANY($1) ORDER BY parent_product_id, id"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(parent_ids)
            .fetch_all(pool)
            .await
    }

    /// List catalog products: non-variants, optionally restricted to a
    /// category slug.
    pub async fn list_catalog(
        pool: &PgPool,
        category_slug: Option<&str>,
    ) -> Result<Vec<Product>, sqlx::Error> {
        match category_slug {
            Some(slug) => {
                let query = format!(
                    "SELECT p.{} FROM products p
                     JOIN categories c ON c.id = p.category_id
                     WHERE NOT p.is_variant AND c.slug = $1
                     ORDER BY p.name, p.id",
                    COLUMNS.replace(", ", ", p.")
                );
                sqlx::query_as::<_, Product>(&query)
                    .bind(slug)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM products WHERE NOT is_variant ORDER BY name, id"
                );
                sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
            }
        }
    }

    /// Update a product. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                sku = COALESCE($4, sku),
                base_sku = COALESCE($5, base_sku),
                parent_product_id = COALESCE($6, parent_product_id),
                is_variant = COALESCE($7, is_variant),
                status_id = COALESCE($8, status_id),
                quantity = COALESCE($9, quantity),
                rental_price_cents = COALESCE($10, rental_price_cents),
                category_id = COALESCE($11, category_id),
                color_id = COALESCE($12, color_id),
                size_id = COALESCE($13, size_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.sku)
            .bind(&input.base_sku)
            .bind(input.parent_product_id)
            .bind(input.is_variant)
            .bind(input.status_id)
            .bind(input.quantity)
            .bind(input.rental_price_cents)
            .bind(input.category_id)
            .bind(input.color_id)
            .bind(input.size_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a product by ID. Returns `true` if a row was removed.
    ///
    /// Variants cascade with their parent; rental items referencing the
    /// product block the delete (FK is `ON DELETE RESTRICT`).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Status mutation
    // -----------------------------------------------------------------------

    /// Set the status of a batch of products in one statement.
    ///
    /// Used for rental transition side effects. Rows under manual
    /// `maintenance` override are left untouched.
    pub async fn set_status_bulk(
        pool: &PgPool,
        product_ids: &[DbId],
        status_id: StatusId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE products SET status_id = $2
             WHERE id = ANY($1) AND status_id <> $3",
        )
        .bind(product_ids)
        .bind(status_id)
        .bind(product_status::MAINTENANCE)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    // -----------------------------------------------------------------------
    // Reconciliation
    // -----------------------------------------------------------------------

    /// Reconcile every product's derived status in one statement.
    ///
    /// A product should be `rented` iff at least one rental item with an
    /// active-status parent rental references it, else `available`;
    /// `maintenance` rows are never touched. Only drifted rows are
    /// written. Returns the number of corrected rows; a second run right
    /// after therefore reports 0.
    pub async fn reconcile_statuses(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(&reconcile_sql(false))
            .bind(ACTIVE_STATUSES.to_vec())
            .bind(product_status::RENTED)
            .bind(product_status::AVAILABLE)
            .bind(product_status::MAINTENANCE)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Reconcile the derived statuses of a specific set of products
    /// (those touched by a rental mutation).
    pub async fn reconcile_products(pool: &PgPool, product_ids: &[DbId]) -> Result<u64, sqlx::Error> {
        if product_ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(&reconcile_sql(true))
            .bind(ACTIVE_STATUSES.to_vec())
            .bind(product_status::RENTED)
            .bind(product_status::AVAILABLE)
            .bind(product_status::MAINTENANCE)
            .bind(product_ids)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Reconcile a single product, returning its corrected status when a
    /// write happened and `None` when the stored value was already right
    /// (or under `maintenance`).
    pub async fn reconcile_status(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<StatusId>, sqlx::Error> {
        let row: Option<(StatusId,)> = sqlx::query_as(&format!(
            "{} RETURNING p.status_id",
            reconcile_sql(true)
        ))
        .bind(ACTIVE_STATUSES.to_vec())
        .bind(product_status::RENTED)
        .bind(product_status::AVAILABLE)
        .bind(product_status::MAINTENANCE)
        .bind(vec![id])
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(status_id,)| status_id))
    }
}

/// The single-statement reconciliation pass: derive the desired status of
/// each candidate product from its active rentals, then flip only the
/// rows where the stored value drifted.
///
/// Binds: $1 active rental status ids, $2 rented, $3 available,
/// $4 maintenance, $5 (scoped only) candidate product ids.
fn reconcile_sql(scoped: bool) -> String {
    let scope = if scoped { "AND pr.id = ANY($5)" } else { "" };
    format!(
        "UPDATE products p
         SET status_id = d.desired_status_id
         FROM (
             SELECT pr.id,
                    CASE WHEN EXISTS (
                        SELECT 1
                        FROM rental_items ri
                        JOIN rentals r ON r.id = ri.rental_id
                        WHERE ri.product_id = pr.id
                          AND r.status_id = ANY($1)
                    ) THEN $2::smallint ELSE $3::smallint END AS desired_status_id
             FROM products pr
             WHERE pr.status_id <> $4 {scope}
         ) d
         WHERE p.id = d.id
           AND p.status_id <> d.desired_status_id"
    )
}
