//! Tenant (organization) entities.

pub mod model;
pub mod plan;
pub mod status;

pub use model::{CreateTenant, Tenant, TenantDetail, TenantStats, TenantSummary, UpdateTenant};
pub use plan::{PlanLimits, SubscriptionPlan};
pub use status::TenantStatus;
