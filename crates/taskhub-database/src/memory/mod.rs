//! Process-local in-memory store.
//!
//! One [`MemoryStore`] implements every repository trait over a shared
//! `RwLock`. Each trait method holds the lock for its whole duration, so a
//! registration, a cascade delete, or a list page and its count are
//! observed atomically. Emulates the PostgreSQL schema's unique keys and
//! foreign-key actions.

mod audit;
mod project;
mod task;
mod tenant;
mod user;


use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use taskhub_core::result::AppResult;
use taskhub_core::types::{PageRequest, PageResponse, ProjectId, TaskId, TenantId, UserId};
use taskhub_entity::audit::AuditLogEntry;
use taskhub_entity::project::Project;
use taskhub_entity::task::Task;
use taskhub_entity::tenant::Tenant;
use taskhub_entity::user::User;

use crate::repositories::HealthProbe;

#[derive(Debug, Default)]
pub(crate) struct MemoryState {
    tenants: HashMap<TenantId, Tenant>,
    users: HashMap<UserId, User>,
    projects: HashMap<ProjectId, Project>,
    tasks: HashMap<TaskId, Task>,
    audit: Vec<AuditLogEntry>,
}

impl MemoryState {
    fn count_users(&self, tenant_id: TenantId) -> i64 {
        self.users
            .values()
            .filter(|u| u.tenant_id == Some(tenant_id))
            .count() as i64
    }

    fn count_projects(&self, tenant_id: TenantId) -> i64 {
        self.projects
            .values()
            .filter(|p| p.tenant_id == tenant_id)
            .count() as i64
    }
}

/// Shared handle to the in-memory store. Clones see the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HealthProbe for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Case-insensitive substring match; an absent or blank needle matches.
fn matches_search(needle: Option<&str>, haystacks: &[&str]) -> bool {
    match needle.map(str::trim).filter(|n| !n.is_empty()) {
        None => true,
        Some(needle) => {
            let needle = needle.to_lowercase();
            haystacks
                .iter()
                .any(|h| h.to_lowercase().contains(&needle))
        }
    }
}

/// Slice one page out of already sorted rows.
fn paginate<T>(rows: Vec<T>, page: PageRequest) -> PageResponse<T> {
    let total = rows.len() as u64;
    let items = rows
        .into_iter()
        .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
        .take(page.limit as usize)
        .collect();
    PageResponse::new(items, page, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_search() {
        assert!(matches_search(None, &["anything"]));
        assert!(matches_search(Some(" "), &["anything"]));
        assert!(matches_search(Some("ACM"), &["x", "Acme Corp"]));
        assert!(!matches_search(Some("zeta"), &["Acme"]));
    }

    #[test]
    fn test_paginate() {
        let page = paginate((1..=25).collect::<Vec<_>>(), PageRequest::new(Some(3), Some(10)));
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.total_items, 25);
        assert_eq!(page.total_pages, 3);
    }
}
