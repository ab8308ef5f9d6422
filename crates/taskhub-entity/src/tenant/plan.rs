//! Subscription plans and the quotas they grant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use taskhub_core::AppError;

/// Per-tenant caps granted by a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanLimits {
    /// Maximum number of users (the first admin included).
    pub max_users: i32,
    /// Maximum number of projects.
    pub max_projects: i32,
}

/// Subscription tier of a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "subscription_plan", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    /// Entry tier.
    #[default]
    Free,
    /// Paid tier.
    Pro,
    /// Largest tier.
    Enterprise,
}

impl SubscriptionPlan {
    /// Quotas applied when a tenant registers on this plan.
    pub fn limits(&self) -> PlanLimits {
        match self {
            Self::Free => PlanLimits {
                max_users: 5,
                max_projects: 3,
            },
            Self::Pro => PlanLimits {
                max_users: 25,
                max_projects: 15,
            },
            Self::Enterprise => PlanLimits {
                max_users: 100,
                max_projects: 50,
            },
        }
    }

    /// Return the plan as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
            Self::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionPlan {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "pro" => Ok(Self::Pro),
            "enterprise" => Ok(Self::Enterprise),
            _ => Err(AppError::validation(format!(
                "Invalid subscription plan: '{s}'. Expected one of: free, pro, enterprise"
            ))),
        }
    }
}
