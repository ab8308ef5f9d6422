//! Tenant entity model and read models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskhub_core::types::TenantId;

use super::plan::SubscriptionPlan;
use super::status::TenantStatus;

/// An organization registered on the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    /// Unique tenant identifier.
    pub id: TenantId,
    /// Display name.
    pub name: String,
    /// Unique lowercase alphanumeric login handle.
    pub subdomain: String,
    /// Lifecycle status.
    pub status: TenantStatus,
    /// Subscription tier.
    pub subscription_plan: SubscriptionPlan,
    /// User quota.
    pub max_users: i32,
    /// Project quota.
    pub max_projects: i32,
    /// When the tenant registered.
    pub created_at: DateTime<Utc>,
    /// When the tenant was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a tenant.
#[derive(Debug, Clone)]
pub struct CreateTenant {
    /// Display name.
    pub name: String,
    /// Login handle.
    pub subdomain: String,
    /// Initial status.
    pub status: TenantStatus,
    /// Subscription tier.
    pub subscription_plan: SubscriptionPlan,
    /// User quota.
    pub max_users: i32,
    /// Project quota.
    pub max_projects: i32,
}

impl CreateTenant {
    /// Build a new active tenant with the quotas of `plan`.
    pub fn with_plan(name: String, subdomain: String, plan: SubscriptionPlan) -> Self {
        let limits = plan.limits();
        Self {
            name,
            subdomain,
            status: TenantStatus::Active,
            subscription_plan: plan,
            max_users: limits.max_users,
            max_projects: limits.max_projects,
        }
    }
}

/// Partial update of a tenant. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateTenant {
    /// New display name.
    pub name: Option<String>,
    /// New status.
    pub status: Option<TenantStatus>,
    /// New plan.
    pub subscription_plan: Option<SubscriptionPlan>,
    /// New user quota.
    pub max_users: Option<i32>,
    /// New project quota.
    pub max_projects: Option<i32>,
}

impl UpdateTenant {
    /// Whether the update touches anything beyond the name.
    pub fn touches_settings(&self) -> bool {
        self.status.is_some()
            || self.subscription_plan.is_some()
            || self.max_users.is_some()
            || self.max_projects.is_some()
    }

    /// Apply the changes onto `tenant`.
    pub fn apply(self, tenant: &mut Tenant) {
        if let Some(name) = self.name {
            tenant.name = name;
        }
        if let Some(status) = self.status {
            tenant.status = status;
        }
        if let Some(plan) = self.subscription_plan {
            tenant.subscription_plan = plan;
        }
        if let Some(max_users) = self.max_users {
            tenant.max_users = max_users;
        }
        if let Some(max_projects) = self.max_projects {
            tenant.max_projects = max_projects;
        }
    }
}

/// Aggregate counts for a tenant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantStats {
    pub total_users: i64,
    pub total_projects: i64,
    pub total_tasks: i64,
}

/// A tenant with its aggregate counts (detail view).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantDetail {
    #[serde(flatten)]
    pub tenant: Tenant,
    pub stats: TenantStats,
}

/// A tenant row in the super-admin tenant list.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TenantSummary {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub tenant: Tenant,
    pub total_users: i64,
    pub total_projects: i64,
}
