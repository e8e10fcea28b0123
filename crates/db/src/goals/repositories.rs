use async_trait::async_trait;
use uuid::Uuid;

use crate::goals::models::{Goal, GoalFilter};
use callscope_common::error::CallscopeResult;

#[async_trait]
pub trait GoalRepository: Send + Sync {
    async fn create(&self, goal: Goal) -> CallscopeResult<Goal>;

    async fn get_by_id(&self, org_id: Uuid, id: Uuid) -> CallscopeResult<Option<Goal>>;

    async fn list(&self, org_id: Uuid, filter: GoalFilter) -> CallscopeResult<Vec<Goal>>;

    /// Update a draft in place. Published goals are immutable; the caller
    /// must check status first.
    async fn update_draft(&self, goal: Goal) -> CallscopeResult<Goal>;

    /// Mark a draft as published and stamp `published_at`.
    async fn publish(&self, org_id: Uuid, id: Uuid) -> CallscopeResult<Goal>;
}
