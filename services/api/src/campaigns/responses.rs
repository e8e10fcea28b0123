use callscope_scoring::{ColorToken, FailureType, SeverityTier, StatusDisplay};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ParameterAnalysisResponse {
    pub parameter: String,
    pub max_score: f64,
    #[serde(rename = "type")]
    pub failure_type: FailureType,
    pub current_score: f64,
    pub adherence_percentage: f64,
    pub tier: SeverityTier,
    pub display: StatusDisplay,
}

#[derive(Debug, Serialize)]
pub struct ListParametersResponse {
    pub data: Vec<ParameterAnalysisResponse>,
    pub count: usize,
}

/// Agent row carrying both independent labels: `status` comes from the
/// fatal-error count, `score_color` from the percentage tier. They often
/// disagree and are both shown.
#[derive(Debug, Serialize)]
pub struct AgentPerformanceResponse {
    pub agent_id: String,
    pub total_score: f64,
    pub fatal_errors: i32,
    pub non_fatal_errors: i32,
    pub total_calls: i32,
    pub status: &'static str,
    pub score_color: ColorToken,
}

#[derive(Debug, Serialize)]
pub struct ListAgentsResponse {
    pub data: Vec<AgentPerformanceResponse>,
    pub count: usize,
}
