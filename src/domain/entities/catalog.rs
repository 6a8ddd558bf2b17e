use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::pricing::{Money, PriceKind, TierPricing};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLink {
    pub name: String,
    pub url: String,
}

/// A creator who curated one or more stacks.
#[derive(Debug, Clone)]
pub struct Creator {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub x_handle: Option<String>,
    pub avatar_url: Option<String>,
    pub verified: bool,
    pub personal_pages: Vec<PageLink>,
    pub project_pages: Vec<PageLink>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One priced tier of a product, stored inside the product's JSONB column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTier {
    pub tier_id: String,
    pub name: String,
    pub pricing: TierPricing,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

/// An AI tool that can appear in stacks.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub category: String,
    pub icon_url: Option<String>,
    pub website_url: Option<String>,
    pub affiliate_url: Option<String>,
    pub tiers: Vec<ProductTier>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A stack's reference to a product, with the price the creator actually
/// pays. Stored inside the stack's JSONB column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSubscription {
    pub product_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier_id: Option<String>,
    pub primary_usage_label: String,
    pub price: TierPricing,
    pub price_kind: PriceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A curated set of AI-tool subscriptions with its total cost.
#[derive(Debug, Clone)]
pub struct Stack {
    pub id: Uuid,
    pub slug: String,
    pub creator_id: Uuid,
    pub title: String,
    pub team_size: Option<i32>,
    pub summary: String,
    pub product_subscriptions: Vec<ProductSubscription>,
    pub fixed_total: Option<Money>,
    pub usage_total_notes: Option<String>,
    pub has_usage_component: bool,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
