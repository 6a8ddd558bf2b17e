use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::{PostgresPersistence, parse_json_with_fallback},
    app_error::{AppError, AppResult},
    domain::entities::catalog::{Creator, Product, Stack},
    use_cases::stacks::CatalogRepo,
};

fn row_to_creator(row: &sqlx::postgres::PgRow) -> Creator {
    let id: Uuid = row.get("id");
    Creator {
        id,
        name: row.get("name"),
        slug: row.get("slug"),
        x_handle: row.get("x_handle"),
        avatar_url: row.get("avatar_url"),
        verified: row.get("verified"),
        personal_pages: parse_json_with_fallback(
            &row.get::<serde_json::Value, _>("personal_pages"),
            "personal_pages",
            "creator",
            &id.to_string(),
        ),
        project_pages: parse_json_with_fallback(
            &row.get::<serde_json::Value, _>("project_pages"),
            "project_pages",
            "creator",
            &id.to_string(),
        ),
        bio: row.get("bio"),
        created_at: row.get("created_at"),
    }
}

fn row_to_product(row: &sqlx::postgres::PgRow) -> Product {
    let id: Uuid = row.get("id");
    Product {
        id,
        name: row.get("name"),
        slug: row.get("slug"),
        category: row.get("category"),
        icon_url: row.get("icon_url"),
        website_url: row.get("website_url"),
        affiliate_url: row.get("affiliate_url"),
        tiers: parse_json_with_fallback(
            &row.get::<serde_json::Value, _>("tiers"),
            "tiers",
            "product",
            &id.to_string(),
        ),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn row_to_stack(row: &sqlx::postgres::PgRow) -> Stack {
    let id: Uuid = row.get("id");
    Stack {
        id,
        slug: row.get("slug"),
        creator_id: row.get("creator_id"),
        title: row.get("title"),
        team_size: row.get("team_size"),
        summary: row.get("summary"),
        product_subscriptions: parse_json_with_fallback(
            &row.get::<serde_json::Value, _>("product_subscriptions"),
            "product_subscriptions",
            "stack",
            &id.to_string(),
        ),
        // fixed_total is a nullable column; NULL parses to None without a warning.
        fixed_total: parse_json_with_fallback(
            &row.get::<Option<serde_json::Value>, _>("fixed_total")
                .unwrap_or(serde_json::Value::Null),
            "fixed_total",
            "stack",
            &id.to_string(),
        ),
        usage_total_notes: row.get("usage_total_notes"),
        has_usage_component: row.get("has_usage_component"),
        published: row.get("published"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

const STACK_COLUMNS: &str = "id, slug, creator_id, title, team_size, summary, \
     product_subscriptions, fixed_total, usage_total_notes, has_usage_component, \
     published, created_at, updated_at";

#[async_trait]
impl CatalogRepo for PostgresPersistence {
    async fn list_published_stacks(&self) -> AppResult<Vec<Stack>> {
        let rows = sqlx::query(&format!(
            "SELECT {STACK_COLUMNS} FROM stacks WHERE published = TRUE ORDER BY created_at DESC",
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rows.iter().map(row_to_stack).collect())
    }

    async fn get_stack_by_slug(&self, slug: &str) -> AppResult<Option<Stack>> {
        let row = sqlx::query(&format!("SELECT {STACK_COLUMNS} FROM stacks WHERE slug = $1"))
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;
        Ok(row.as_ref().map(row_to_stack))
    }

    async fn get_creator(&self, id: Uuid) -> AppResult<Option<Creator>> {
        let row = sqlx::query(
            "SELECT id, name, slug, x_handle, avatar_url, verified, personal_pages, \
             project_pages, bio, created_at FROM creators WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row.as_ref().map(row_to_creator))
    }

    async fn get_products_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query(
            "SELECT id, name, slug, category, icon_url, website_url, affiliate_url, \
             tiers, created_at, updated_at FROM products WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rows.iter().map(row_to_product).collect())
    }
}
