use async_trait::async_trait;
use uuid::Uuid;

use crate::quality::models::{
    AgentPerformance, ConversationReview, ParameterAnalysis, ReviewFilter,
};
use callscope_common::error::CallscopeResult;

#[async_trait]
pub trait QualityRepository: Send + Sync {
    /// Replace the parameter analysis rows for a campaign.
    /// Upserts by (org_id, campaign_id, parameter).
    async fn save_parameter_analysis(
        &self,
        rows: Vec<ParameterAnalysis>,
    ) -> CallscopeResult<Vec<ParameterAnalysis>>;

    async fn list_parameter_analysis(
        &self,
        org_id: Uuid,
        campaign_id: Uuid,
    ) -> CallscopeResult<Vec<ParameterAnalysis>>;

    /// Upsert by (org_id, campaign_id, agent_id), preserving the row id.
    async fn upsert_agent_performance(
        &self,
        row: AgentPerformance,
    ) -> CallscopeResult<AgentPerformance>;

    async fn list_agent_performance(
        &self,
        org_id: Uuid,
        campaign_id: Uuid,
    ) -> CallscopeResult<Vec<AgentPerformance>>;

    async fn save_review(&self, review: ConversationReview) -> CallscopeResult<ConversationReview>;

    async fn get_review(&self, org_id: Uuid, id: Uuid)
        -> CallscopeResult<Option<ConversationReview>>;

    async fn list_reviews(
        &self,
        org_id: Uuid,
        filter: ReviewFilter,
    ) -> CallscopeResult<Vec<ConversationReview>>;

    /// Distinct (org_id, campaign_id) pairs that have at least one review.
    /// Drives the analytics recompute loop.
    async fn list_campaigns(&self) -> CallscopeResult<Vec<(Uuid, Uuid)>>;
}
