use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingPeriod {
    Month,
    Year,
    OneTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub currency: String,
    pub amount: f64,
    pub period: BillingPeriod,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsagePricing {
    pub unit: String,
    pub price_per_unit: f64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingType {
    Fixed,
    Usage,
    Mixed,
}

/// Pricing for one product tier: a fixed price, usage-based pricing, or
/// both ("mixed").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierPricing {
    pub pricing_type: PricingType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsagePricing>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceKind {
    Regular,
    Discounted,
    Bundle,
    UsageBased,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_pricing_deserializes_from_stored_json() {
        let json = serde_json::json!({
            "pricingType": "fixed",
            "fixed": { "currency": "USD", "amount": 20.0, "period": "month" }
        });
        let pricing: TierPricing = serde_json::from_value(json).unwrap();
        assert_eq!(pricing.pricing_type, PricingType::Fixed);
        assert_eq!(pricing.fixed.unwrap().period, BillingPeriod::Month);
        assert!(pricing.usage.is_none());
    }

    #[test]
    fn price_kind_uses_snake_case_wire_values() {
        let kind: PriceKind = serde_json::from_value(serde_json::json!("usage_based")).unwrap();
        assert_eq!(kind, PriceKind::UsageBased);
        assert_eq!(
            serde_json::to_value(PriceKind::Regular).unwrap(),
            serde_json::json!("regular")
        );
    }
}
