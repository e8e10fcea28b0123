use callscope_scoring::{FailureType, SubRule};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// One quality parameter row for a campaign, as shown on the
/// call-quality-analytics page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterAnalysis {
    pub id: Uuid,
    pub org_id: Uuid,
    pub campaign_id: Uuid,
    pub parameter: String,
    pub max_score: f64,
    pub failure_type: FailureType,
    pub current_score: f64,
    pub adherence_percentage: f64,
    pub computed_at: DateTime<Utc>,
}

/// Per-agent aggregate for a campaign, maintained by the analytics worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentPerformance {
    pub id: Uuid,
    pub org_id: Uuid,
    pub campaign_id: Uuid,
    pub agent_id: String,
    pub total_score: f64,
    pub fatal_errors: i32,
    pub non_fatal_errors: i32,
    pub total_calls: i32,
    pub computed_at: DateTime<Utc>,
}

/// One scored parameter inside a stored conversation review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewedParameter {
    pub parameter: String,
    pub max_score: f64,
    pub score: f64,
    pub failure_type: FailureType,
    pub explanation: String,
    #[serde(default)]
    pub sub_rule_analysis: Vec<SubRule>,
}

/// One extracted outcome field for a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeField {
    pub attribute_name: String,
    pub extracted_value: String,
    pub reasoning: String,
}

/// A reviewed conversation: scorecard and outcome are stored as jsonb
/// documents keyed by parameter/field name. The disposition comes from the
/// goal-evaluation pipeline; it is stored and displayed, never computed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationReview {
    pub id: Uuid,
    pub org_id: Uuid,
    pub campaign_id: Uuid,
    pub agent_id: String,
    pub scorecard: BTreeMap<String, ReviewedParameter>,
    pub outcome: BTreeMap<String, OutcomeField>,
    pub disposition: String,
    pub reviewed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReviewFilter {
    pub campaign_id: Option<Uuid>,
    pub agent_id: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
