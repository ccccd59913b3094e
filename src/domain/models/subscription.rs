use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlanType {
    WhiteLabel,
    OpenMarketplace,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Monthly,
    Yearly,
}

/// Capacity ceiling: either a concrete count or the literal `"unlimited"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Count(i64),
    Unlimited,
}

impl Serialize for Limit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Limit::Count(n) => serializer.serialize_i64(*n),
            Limit::Unlimited => serializer.serialize_str("unlimited"),
        }
    }
}

impl<'de> Deserialize<'de> for Limit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Count(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Count(n) => Ok(Limit::Count(n)),
            Raw::Text(s) if s == "unlimited" => Ok(Limit::Unlimited),
            Raw::Text(other) => Err(D::Error::custom(format!("invalid capacity limit: {}", other))),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlan {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    #[serde(rename = "type")]
    pub plan_type: PlanType,
    pub price: f64,
    pub billing_cycle: BillingCycle,
    pub commission_percentage: f64,
    pub max_servicemen: Limit,
    pub max_branches: Limit,
    pub max_clients: Limit,
    #[serde(default)]
    pub custom_branding: bool,
    #[serde(default)]
    pub priority_support: bool,
    #[serde(default)]
    pub analytics_dashboard: bool,
    #[serde(default)]
    pub featured_listing: bool,
    #[serde(default)]
    pub white_label_domain: bool,
    #[serde(rename = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl SubscriptionPlan {
    /// The fixed three-tier catalog seeded at bootstrap. Existing records
    /// always win over these definitions.
    pub fn default_catalog() -> Vec<SubscriptionPlan> {
        vec![
            SubscriptionPlan {
                id: None,
                name: "Enterprise White Label".to_string(),
                plan_type: PlanType::WhiteLabel,
                price: 499.99,
                billing_cycle: BillingCycle::Monthly,
                commission_percentage: 0.0,
                max_servicemen: Limit::Count(500),
                max_branches: Limit::Count(50),
                max_clients: Limit::Count(5000),
                custom_branding: true,
                priority_support: true,
                analytics_dashboard: true,
                featured_listing: false,
                white_label_domain: true,
                created_at: Utc::now(),
            },
            SubscriptionPlan {
                id: None,
                name: "Standard Marketplace".to_string(),
                plan_type: PlanType::OpenMarketplace,
                price: 99.99,
                billing_cycle: BillingCycle::Monthly,
                commission_percentage: 10.0,
                max_servicemen: Limit::Count(100),
                max_branches: Limit::Count(10),
                max_clients: Limit::Unlimited,
                custom_branding: false,
                priority_support: false,
                analytics_dashboard: true,
                featured_listing: false,
                white_label_domain: false,
                created_at: Utc::now(),
            },
            SubscriptionPlan {
                id: None,
                name: "Free Trial".to_string(),
                plan_type: PlanType::OpenMarketplace,
                price: 0.0,
                billing_cycle: BillingCycle::Monthly,
                commission_percentage: 15.0,
                max_servicemen: Limit::Count(5),
                max_branches: Limit::Count(1),
                max_clients: Limit::Count(50),
                custom_branding: false,
                priority_support: false,
                analytics_dashboard: false,
                featured_listing: false,
                white_label_domain: false,
                created_at: Utc::now(),
            },
        ]
    }
}
