use callscope_scoring::{ErrorTally, RuleStatus, ScoreTotals, SeverityTier, StatusDisplay};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct SubRuleResponse {
    pub rule: String,
    pub status: RuleStatus,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct ConversationParameterResponse {
    pub parameter: String,
    pub max_score: f64,
    pub score: f64,
    pub adherence_percentage: f64,
    pub tier: SeverityTier,
    pub display: StatusDisplay,
    pub explanation: String,
    pub sub_rule_analysis: Vec<SubRuleResponse>,
}

#[derive(Debug, Serialize)]
pub struct OutcomeFieldResponse {
    pub attribute_name: String,
    pub extracted_value: String,
    pub reasoning: String,
}

#[derive(Debug, Serialize)]
pub struct ConversationDetailResponse {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub agent_id: String,
    pub disposition: String,
    pub totals: ScoreTotals,
    pub error_tally: ErrorTally,
    pub penalized_score: f64,
    pub tier: SeverityTier,
    pub display: StatusDisplay,
    pub parameters: Vec<ConversationParameterResponse>,
    pub outcome: Vec<OutcomeFieldResponse>,
    pub reviewed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ConversationSummaryResponse {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub agent_id: String,
    pub disposition: String,
    pub adherence_percentage: f64,
    pub tier: SeverityTier,
    pub display: StatusDisplay,
    pub reviewed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ListConversationsResponse {
    pub data: Vec<ConversationSummaryResponse>,
    pub count: usize,
}
