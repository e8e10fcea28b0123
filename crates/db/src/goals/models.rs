use callscope_scoring::FailureType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authoring side of the scorecard model: one configured parameter
/// inside a goal definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorecardParameterDef {
    pub name: String,
    pub max_score: f64,
    pub failure_type: FailureType,
    pub scoring_type: String,
    pub rules_and_explanation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Draft,
    Published,
}

/// A quality goal: a named scorecard configuration with a draft/published
/// lifecycle. Publishing freezes the version; a published goal is never
/// edited in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub org_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: GoalStatus,
    pub version: i32,
    pub scorecard_parameters: Vec<ScorecardParameterDef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GoalFilter {
    pub status: Option<GoalStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
