use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::app_error::AppResult;
use crate::domain::entities::catalog::{Creator, PageLink, Product, Stack};
use crate::domain::entities::pricing::{Money, PriceKind, TierPricing};

// ============================================================================
// Repository Trait
// ============================================================================

#[async_trait]
pub trait CatalogRepo: Send + Sync {
    async fn list_published_stacks(&self) -> AppResult<Vec<Stack>>;
    async fn get_stack_by_slug(&self, slug: &str) -> AppResult<Option<Stack>>;
    async fn get_creator(&self, id: Uuid) -> AppResult<Option<Creator>>;
    async fn get_products_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Product>>;
}

// ============================================================================
// Read models
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackCreator {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub personal_pages: Vec<PageLink>,
    pub project_pages: Vec<PageLink>,
}

/// Creator as shown on a stack's detail page (adds verification and bio).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackCreatorDetail {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub personal_pages: Vec<PageLink>,
    pub project_pages: Vec<PageLink>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackProduct {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    pub price: TierPricing,
    pub primary_usage_label: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackProductDetail {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    pub price: TierPricing,
    pub primary_usage_label: String,
    pub price_kind: PriceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackSummary {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_size: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_total: Option<Money>,
    pub has_usage_component: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_total_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub creator: StackCreator,
    pub products: Vec<StackProduct>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackDetail {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_size: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_total: Option<Money>,
    pub has_usage_component: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_total_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub creator: StackCreatorDetail,
    pub products: Vec<StackProductDetail>,
}

// ============================================================================
// Use Cases
// ============================================================================

#[derive(Clone)]
pub struct StacksUseCases {
    repo: Arc<dyn CatalogRepo>,
}

impl StacksUseCases {
    pub fn new(repo: Arc<dyn CatalogRepo>) -> Self {
        Self { repo }
    }

    /// All published stacks with their creator and resolved products.
    /// Stacks whose creator is gone, and subscriptions whose product is
    /// gone, are skipped rather than failing the whole listing.
    #[instrument(skip(self))]
    pub async fn list_published(&self) -> AppResult<Vec<StackSummary>> {
        let stacks = self.repo.list_published_stacks().await?;

        let mut results = Vec::with_capacity(stacks.len());
        for stack in stacks {
            let Some(creator) = self.repo.get_creator(stack.creator_id).await? else {
                tracing::warn!(stack = %stack.slug, "published stack has no creator, skipping");
                continue;
            };
            let products = self.resolve_products(&stack).await?;

            results.push(StackSummary {
                id: stack.id,
                slug: stack.slug,
                title: stack.title,
                summary: stack.summary,
                team_size: stack.team_size,
                fixed_total: stack.fixed_total,
                has_usage_component: stack.has_usage_component,
                usage_total_notes: stack.usage_total_notes,
                created_at: stack.created_at,
                creator: StackCreator {
                    id: creator.id,
                    name: creator.name,
                    x_handle: creator.x_handle,
                    avatar_url: creator.avatar_url,
                    personal_pages: creator.personal_pages,
                    project_pages: creator.project_pages,
                },
                products: stack
                    .product_subscriptions
                    .iter()
                    .filter_map(|sub| {
                        let product = products.get(&sub.product_id)?;
                        Some(StackProduct {
                            id: product.id,
                            name: product.name.clone(),
                            slug: product.slug.clone(),
                            category: product.category.clone(),
                            icon_url: product.icon_url.clone(),
                            price: sub.price.clone(),
                            primary_usage_label: sub.primary_usage_label.clone(),
                        })
                    })
                    .collect(),
            });
        }

        Ok(results)
    }

    /// Single published stack by slug; unpublished stacks are invisible.
    #[instrument(skip(self))]
    pub async fn get_by_slug(&self, slug: &str) -> AppResult<Option<StackDetail>> {
        let Some(stack) = self.repo.get_stack_by_slug(slug).await? else {
            return Ok(None);
        };
        if !stack.published {
            return Ok(None);
        }
        let Some(creator) = self.repo.get_creator(stack.creator_id).await? else {
            return Ok(None);
        };
        let products = self.resolve_products(&stack).await?;

        Ok(Some(StackDetail {
            id: stack.id,
            slug: stack.slug,
            title: stack.title,
            summary: stack.summary,
            team_size: stack.team_size,
            fixed_total: stack.fixed_total,
            has_usage_component: stack.has_usage_component,
            usage_total_notes: stack.usage_total_notes,
            created_at: stack.created_at,
            creator: StackCreatorDetail {
                id: creator.id,
                name: creator.name,
                x_handle: creator.x_handle,
                avatar_url: creator.avatar_url,
                verified: creator.verified,
                bio: creator.bio,
                personal_pages: creator.personal_pages,
                project_pages: creator.project_pages,
            },
            products: stack
                .product_subscriptions
                .iter()
                .filter_map(|sub| {
                    let product = products.get(&sub.product_id)?;
                    Some(StackProductDetail {
                        id: product.id,
                        name: product.name.clone(),
                        slug: product.slug.clone(),
                        category: product.category.clone(),
                        icon_url: product.icon_url.clone(),
                        website_url: product.website_url.clone(),
                        price: sub.price.clone(),
                        primary_usage_label: sub.primary_usage_label.clone(),
                        price_kind: sub.price_kind,
                        notes: sub.notes.clone(),
                    })
                })
                .collect(),
        }))
    }

    async fn resolve_products(&self, stack: &Stack) -> AppResult<HashMap<Uuid, Product>> {
        let ids: Vec<Uuid> = stack
            .product_subscriptions
            .iter()
            .map(|sub| sub.product_id)
            .collect();
        let products = self.repo.get_products_by_ids(&ids).await?;
        Ok(products.into_iter().map(|p| (p.id, p)).collect())
    }
}
