use axum::extract::{Path, State};
use axum::Json;
use callscope_common::error::{CallscopeError, CallscopeResult};
use callscope_db::quality::models::{AgentPerformance, ParameterAnalysis};
use callscope_db::quality::repositories::QualityRepository;
use callscope_scoring::{
    classify_by_fatal_count, classify_by_percentage, display_for, ErrorTally,
};
use uuid::Uuid;

use crate::campaigns::responses::{
    AgentPerformanceResponse, ListAgentsResponse, ListParametersResponse,
    ParameterAnalysisResponse,
};
use crate::error::ApiError;
use crate::extractors::OrgId;
use crate::AppState;

fn to_parameter_response(row: ParameterAnalysis) -> ParameterAnalysisResponse {
    let tier = classify_by_percentage(row.adherence_percentage);
    ParameterAnalysisResponse {
        parameter: row.parameter,
        max_score: row.max_score,
        failure_type: row.failure_type,
        current_score: row.current_score,
        adherence_percentage: row.adherence_percentage,
        tier,
        display: display_for(tier),
    }
}

fn to_agent_response(row: AgentPerformance) -> CallscopeResult<AgentPerformanceResponse> {
    // Stored counts should never be negative; treat a bad row as corruption,
    // not as caller error.
    let tally = ErrorTally::try_new(row.fatal_errors as i64, row.non_fatal_errors as i64)
        .map_err(|e| CallscopeError::Internal(e.to_string()))?;

    let status = display_for(classify_by_fatal_count(tally.fatal_count)).label;
    let score_color = display_for(classify_by_percentage(row.total_score)).color;

    Ok(AgentPerformanceResponse {
        agent_id: row.agent_id,
        total_score: row.total_score,
        fatal_errors: row.fatal_errors,
        non_fatal_errors: row.non_fatal_errors,
        total_calls: row.total_calls,
        status,
        score_color,
    })
}

pub async fn list_campaign_parameters(
    State(state): State<AppState>,
    OrgId(org): OrgId,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<ListParametersResponse>, ApiError> {
    let rows = state
        .quality_repo
        .list_parameter_analysis(org, campaign_id)
        .await?;

    let data: Vec<ParameterAnalysisResponse> =
        rows.into_iter().map(to_parameter_response).collect();
    let count = data.len();
    Ok(Json(ListParametersResponse { data, count }))
}

pub async fn list_campaign_agents(
    State(state): State<AppState>,
    OrgId(org): OrgId,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<ListAgentsResponse>, ApiError> {
    let rows = state
        .quality_repo
        .list_agent_performance(org, campaign_id)
        .await?;

    let data: Vec<AgentPerformanceResponse> = rows
        .into_iter()
        .map(to_agent_response)
        .collect::<CallscopeResult<_>>()?;
    let count = data.len();
    Ok(Json(ListAgentsResponse { data, count }))
}
