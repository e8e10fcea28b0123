use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use callscope_common::error::CallscopeError;
use callscope_db::goals::models::{Goal, GoalFilter, GoalStatus, ScorecardParameterDef};
use callscope_db::goals::repositories::GoalRepository;
use std::collections::HashSet;
use uuid::Uuid;

use crate::error::ApiError;
use crate::extractors::OrgId;
use crate::goals::requests::{CreateGoalRequest, UpdateGoalRequest};
use crate::goals::responses::{GoalResponse, ListGoalsResponse};
use crate::AppState;

/// The authoring-side counterpart of scorecard validation: definitions carry
/// no achieved score yet, so only name/weight/uniqueness can be checked here.
fn validate_parameter_defs(defs: &[ScorecardParameterDef]) -> Result<(), CallscopeError> {
    let mut seen = HashSet::new();
    for def in defs {
        if def.name.trim().is_empty() {
            return Err(CallscopeError::Validation(
                "parameter name must not be empty".to_string(),
            ));
        }
        if def.max_score <= 0.0 || !def.max_score.is_finite() {
            return Err(CallscopeError::Validation(format!(
                "max_score must be positive for '{}', got {}",
                def.name, def.max_score
            )));
        }
        if !seen.insert(def.name.as_str()) {
            return Err(CallscopeError::Validation(format!(
                "duplicate parameter name: {}",
                def.name
            )));
        }
    }
    Ok(())
}

pub async fn list_goals(
    State(state): State<AppState>,
    OrgId(org): OrgId,
    Query(filter): Query<GoalFilter>,
) -> Result<Json<ListGoalsResponse>, ApiError> {
    let goals = state.goal_repo.list(org, filter).await?;
    let data: Vec<GoalResponse> = goals.into_iter().map(GoalResponse::from).collect();
    let count = data.len();
    Ok(Json(ListGoalsResponse { data, count }))
}

pub async fn get_goal(
    State(state): State<AppState>,
    OrgId(org): OrgId,
    Path(id): Path<Uuid>,
) -> Result<Json<GoalResponse>, ApiError> {
    let goal = state
        .goal_repo
        .get_by_id(org, id)
        .await?
        .ok_or_else(|| CallscopeError::NotFound(format!("goal not found: {id}")))?;

    Ok(Json(goal.into()))
}

pub async fn create_goal(
    State(state): State<AppState>,
    OrgId(org): OrgId,
    Json(body): Json<CreateGoalRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if body.name.trim().is_empty() {
        return Err(ApiError(CallscopeError::Validation(
            "name must not be empty".to_string(),
        )));
    }
    validate_parameter_defs(&body.scorecard_parameters)?;

    let now = chrono::Utc::now();
    let goal = Goal {
        id: Uuid::new_v4(),
        org_id: org,
        name: body.name,
        description: body.description,
        status: GoalStatus::Draft,
        version: 1,
        scorecard_parameters: body.scorecard_parameters,
        created_at: now,
        updated_at: now,
        published_at: None,
    };

    let created = state.goal_repo.create(goal).await?;
    Ok((StatusCode::CREATED, Json(GoalResponse::from(created))))
}

pub async fn update_goal(
    State(state): State<AppState>,
    OrgId(org): OrgId,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateGoalRequest>,
) -> Result<Json<GoalResponse>, ApiError> {
    let existing = state
        .goal_repo
        .get_by_id(org, id)
        .await?
        .ok_or_else(|| CallscopeError::NotFound(format!("goal not found: {id}")))?;

    if existing.status == GoalStatus::Published {
        return Err(ApiError(CallscopeError::Validation(format!(
            "goal {id} is published and immutable; create a new draft instead"
        ))));
    }

    let name = body.name.unwrap_or(existing.name);
    if name.trim().is_empty() {
        return Err(ApiError(CallscopeError::Validation(
            "name must not be empty".to_string(),
        )));
    }

    let scorecard_parameters = body
        .scorecard_parameters
        .unwrap_or(existing.scorecard_parameters);
    validate_parameter_defs(&scorecard_parameters)?;

    let goal = Goal {
        id,
        org_id: org,
        name,
        description: if body.description.is_some() {
            body.description
        } else {
            existing.description
        },
        status: existing.status,
        version: existing.version,
        scorecard_parameters,
        created_at: existing.created_at,
        updated_at: chrono::Utc::now(),
        published_at: existing.published_at,
    };

    let updated = state.goal_repo.update_draft(goal).await?;
    Ok(Json(updated.into()))
}

pub async fn publish_goal(
    State(state): State<AppState>,
    OrgId(org): OrgId,
    Path(id): Path<Uuid>,
) -> Result<Json<GoalResponse>, ApiError> {
    let goal = state
        .goal_repo
        .get_by_id(org, id)
        .await?
        .ok_or_else(|| CallscopeError::NotFound(format!("goal not found: {id}")))?;

    // A goal with no parameters can never score a conversation
    if goal.scorecard_parameters.is_empty() {
        return Err(ApiError(CallscopeError::Validation(
            "cannot publish a goal with no scorecard parameters".to_string(),
        )));
    }

    let published = state.goal_repo.publish(org, id).await?;
    Ok(Json(published.into()))
}
