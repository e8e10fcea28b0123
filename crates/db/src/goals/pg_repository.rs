use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, QueryBuilder, Row};
use uuid::Uuid;

use crate::goals::models::{Goal, GoalFilter, GoalStatus};
use crate::goals::repositories::GoalRepository;
use callscope_common::error::{CallscopeError, CallscopeResult};

#[derive(Clone)]
pub struct PgGoalRepository {
    pool: PgPool,
}

impl PgGoalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const GOAL_COLUMNS: &str = "id, org_id, name, description, status, version, \
                            scorecard_parameters, created_at, updated_at, published_at";

#[async_trait]
impl GoalRepository for PgGoalRepository {
    async fn create(&self, goal: Goal) -> CallscopeResult<Goal> {
        let params = serde_json::to_value(&goal.scorecard_parameters)
            .map_err(|e| CallscopeError::Internal(format!("parameters encode: {e}")))?;

        let row = sqlx::query(&format!(
            "insert into goals
             (id, org_id, name, description, status, version,
              scorecard_parameters, created_at, updated_at, published_at)
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             returning {GOAL_COLUMNS}"
        ))
        .bind(goal.id)
        .bind(goal.org_id)
        .bind(&goal.name)
        .bind(&goal.description)
        .bind(status_str(goal.status))
        .bind(goal.version)
        .bind(params)
        .bind(goal.created_at)
        .bind(goal.updated_at)
        .bind(goal.published_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| CallscopeError::Database(e.to_string()))?;

        map_goal_row(&row)
    }

    async fn get_by_id(&self, org_id: Uuid, id: Uuid) -> CallscopeResult<Option<Goal>> {
        let row = sqlx::query(&format!(
            "select {GOAL_COLUMNS} from goals where org_id = $1 and id = $2"
        ))
        .bind(org_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CallscopeError::Database(e.to_string()))?;

        row.as_ref().map(map_goal_row).transpose()
    }

    async fn list(&self, org_id: Uuid, filter: GoalFilter) -> CallscopeResult<Vec<Goal>> {
        let mut qb = QueryBuilder::new(format!(
            "select {GOAL_COLUMNS} from goals where org_id = "
        ));
        qb.push_bind(org_id);

        if let Some(status) = filter.status {
            qb.push(" and status = ").push_bind(status_str(status));
        }

        qb.push(" order by updated_at desc");
        qb.push(" limit ").push_bind(filter.limit.unwrap_or(50));
        qb.push(" offset ").push_bind(filter.offset.unwrap_or(0));

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| CallscopeError::Database(e.to_string()))?;

        rows.iter().map(map_goal_row).collect()
    }

    async fn update_draft(&self, goal: Goal) -> CallscopeResult<Goal> {
        let params = serde_json::to_value(&goal.scorecard_parameters)
            .map_err(|e| CallscopeError::Internal(format!("parameters encode: {e}")))?;

        let row = sqlx::query(&format!(
            "update goals
             set name = $3, description = $4, scorecard_parameters = $5, updated_at = $6
             where org_id = $1 and id = $2 and status = 'draft'
             returning {GOAL_COLUMNS}"
        ))
        .bind(goal.org_id)
        .bind(goal.id)
        .bind(&goal.name)
        .bind(&goal.description)
        .bind(params)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CallscopeError::Database(e.to_string()))?;

        match row {
            Some(r) => map_goal_row(&r),
            None => Err(self.missing_draft_error(goal.org_id, goal.id).await),
        }
    }

    async fn publish(&self, org_id: Uuid, id: Uuid) -> CallscopeResult<Goal> {
        let now = Utc::now();
        let row = sqlx::query(&format!(
            "update goals
             set status = 'published', published_at = $3, updated_at = $3
             where org_id = $1 and id = $2 and status = 'draft'
             returning {GOAL_COLUMNS}"
        ))
        .bind(org_id)
        .bind(id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CallscopeError::Database(e.to_string()))?;

        match row {
            Some(r) => map_goal_row(&r),
            None => Err(self.missing_draft_error(org_id, id).await),
        }
    }
}

impl PgGoalRepository {
    /// A draft-only update matched nothing: either the goal does not exist,
    /// or it exists but is already published.
    async fn missing_draft_error(&self, org_id: Uuid, id: Uuid) -> CallscopeError {
        match self.get_by_id(org_id, id).await {
            Ok(Some(_)) => CallscopeError::Validation(format!(
                "goal {id} is published and immutable; create a new draft instead"
            )),
            Ok(None) => CallscopeError::NotFound(format!("goal not found: {id}")),
            Err(e) => e,
        }
    }
}

fn status_str(status: GoalStatus) -> &'static str {
    match status {
        GoalStatus::Draft => "draft",
        GoalStatus::Published => "published",
    }
}

fn parse_status(s: &str) -> CallscopeResult<GoalStatus> {
    match s {
        "draft" => Ok(GoalStatus::Draft),
        "published" => Ok(GoalStatus::Published),
        other => Err(CallscopeError::Internal(format!(
            "unknown goal status in row: {other}"
        ))),
    }
}

fn map_goal_row(row: &sqlx::postgres::PgRow) -> CallscopeResult<Goal> {
    let status: String = row.get("status");
    let params: serde_json::Value = row.get("scorecard_parameters");

    Ok(Goal {
        id: row.get("id"),
        org_id: row.get("org_id"),
        name: row.get("name"),
        description: row.get("description"),
        status: parse_status(&status)?,
        version: row.get("version"),
        scorecard_parameters: serde_json::from_value(params)
            .map_err(|e| CallscopeError::Internal(format!("parameters decode: {e}")))?,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        published_at: row.get("published_at"),
    })
}
