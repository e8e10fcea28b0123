use callscope_db::goals::models::{Goal, GoalStatus, ScorecardParameterDef};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct GoalResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: GoalStatus,
    pub version: i32,
    #[serde(rename = "scorecardparameters")]
    pub scorecard_parameters: Vec<ScorecardParameterDef>,
    pub total_possible_score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl From<Goal> for GoalResponse {
    fn from(goal: Goal) -> Self {
        let total_possible_score = goal
            .scorecard_parameters
            .iter()
            .map(|p| p.max_score)
            .sum();
        Self {
            id: goal.id,
            name: goal.name,
            description: goal.description,
            status: goal.status,
            version: goal.version,
            scorecard_parameters: goal.scorecard_parameters,
            total_possible_score,
            created_at: goal.created_at,
            updated_at: goal.updated_at,
            published_at: goal.published_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListGoalsResponse {
    pub data: Vec<GoalResponse>,
    pub count: usize,
}
