//! Test data factories for creating valid test fixtures.
//!
//! Each factory function creates a complete, valid object with sensible
//! defaults. Use the closure parameter to override specific fields.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::entities::{
    catalog::{Creator, Product, ProductSubscription, ProductTier, Stack},
    pricing::{BillingPeriod, Money, PriceKind, PricingType, TierPricing},
};

fn test_datetime() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
}

pub fn fixed_monthly(amount: f64) -> TierPricing {
    TierPricing {
        pricing_type: PricingType::Fixed,
        fixed: Some(Money {
            currency: "USD".to_string(),
            amount,
            period: BillingPeriod::Month,
        }),
        usage: None,
    }
}

/// Create a test creator with sensible defaults.
pub fn create_test_creator(overrides: impl FnOnce(&mut Creator)) -> Creator {
    let mut creator = Creator {
        id: Uuid::new_v4(),
        name: "Test Creator".to_string(),
        slug: "test-creator".to_string(),
        x_handle: Some("testcreator".to_string()),
        avatar_url: None,
        verified: false,
        personal_pages: vec![],
        project_pages: vec![],
        bio: None,
        created_at: test_datetime(),
    };
    overrides(&mut creator);
    creator
}

/// Create a test product with one default tier.
pub fn create_test_product(overrides: impl FnOnce(&mut Product)) -> Product {
    let mut product = Product {
        id: Uuid::new_v4(),
        name: "Test Product".to_string(),
        slug: "test-product".to_string(),
        category: "coding".to_string(),
        icon_url: None,
        website_url: None,
        affiliate_url: None,
        tiers: vec![ProductTier {
            tier_id: "pro".to_string(),
            name: "Pro".to_string(),
            pricing: fixed_monthly(20.0),
            is_default: Some(true),
            updated_at: None,
        }],
        created_at: test_datetime(),
        updated_at: test_datetime(),
    };
    overrides(&mut product);
    product
}

/// Create a published test stack with sensible defaults.
pub fn create_test_stack(creator_id: Uuid, overrides: impl FnOnce(&mut Stack)) -> Stack {
    let mut stack = Stack {
        id: Uuid::new_v4(),
        slug: "test-stack".to_string(),
        creator_id,
        title: "My AI Stack".to_string(),
        team_size: Some(1),
        summary: "The tools I actually pay for.".to_string(),
        product_subscriptions: vec![],
        fixed_total: Some(Money {
            currency: "USD".to_string(),
            amount: 20.0,
            period: BillingPeriod::Month,
        }),
        usage_total_notes: None,
        has_usage_component: false,
        published: true,
        created_at: test_datetime(),
        updated_at: test_datetime(),
    };
    overrides(&mut stack);
    stack
}

/// A regular fixed-price subscription to the given product.
pub fn test_subscription(product_id: Uuid) -> ProductSubscription {
    ProductSubscription {
        product_id,
        tier_id: Some("pro".to_string()),
        primary_usage_label: "daily driver".to_string(),
        price: fixed_monthly(20.0),
        price_kind: PriceKind::Regular,
        bundle_name: None,
        notes: None,
    }
}
