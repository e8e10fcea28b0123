use async_trait::async_trait;
use callscope_scoring::FailureType;
use sqlx::{PgPool, QueryBuilder, Row};
use uuid::Uuid;

use crate::quality::models::{
    AgentPerformance, ConversationReview, ParameterAnalysis, ReviewFilter,
};
use crate::quality::repositories::QualityRepository;
use callscope_common::error::{CallscopeError, CallscopeResult};

#[derive(Clone)]
pub struct PgQualityRepository {
    pool: PgPool,
}

impl PgQualityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl QualityRepository for PgQualityRepository {
    async fn save_parameter_analysis(
        &self,
        rows: Vec<ParameterAnalysis>,
    ) -> CallscopeResult<Vec<ParameterAnalysis>> {
        let mut saved = Vec::with_capacity(rows.len());

        for row in rows {
            let db_row = sqlx::query(
                "insert into parameter_analysis
                 (id, org_id, campaign_id, parameter, max_score, failure_type,
                  current_score, adherence_percentage, computed_at)
                 values ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                 on conflict (org_id, campaign_id, parameter)
                 do update set
                   max_score = excluded.max_score,
                   failure_type = excluded.failure_type,
                   current_score = excluded.current_score,
                   adherence_percentage = excluded.adherence_percentage,
                   computed_at = excluded.computed_at
                 returning id, org_id, campaign_id, parameter, max_score, failure_type,
                           current_score, adherence_percentage, computed_at",
            )
            .bind(row.id)
            .bind(row.org_id)
            .bind(row.campaign_id)
            .bind(&row.parameter)
            .bind(row.max_score)
            .bind(failure_type_str(row.failure_type))
            .bind(row.current_score)
            .bind(row.adherence_percentage)
            .bind(row.computed_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| CallscopeError::Database(e.to_string()))?;

            saved.push(map_analysis_row(&db_row)?);
        }

        Ok(saved)
    }

    async fn list_parameter_analysis(
        &self,
        org_id: Uuid,
        campaign_id: Uuid,
    ) -> CallscopeResult<Vec<ParameterAnalysis>> {
        let rows = sqlx::query(
            "select id, org_id, campaign_id, parameter, max_score, failure_type,
                    current_score, adherence_percentage, computed_at
             from parameter_analysis
             where org_id = $1 and campaign_id = $2
             order by parameter",
        )
        .bind(org_id)
        .bind(campaign_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CallscopeError::Database(e.to_string()))?;

        rows.iter().map(map_analysis_row).collect()
    }

    async fn upsert_agent_performance(
        &self,
        row: AgentPerformance,
    ) -> CallscopeResult<AgentPerformance> {
        let db_row = sqlx::query(
            "insert into agent_performance
             (id, org_id, campaign_id, agent_id, total_score, fatal_errors,
              non_fatal_errors, total_calls, computed_at)
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             on conflict (org_id, campaign_id, agent_id)
             do update set
               total_score = excluded.total_score,
               fatal_errors = excluded.fatal_errors,
               non_fatal_errors = excluded.non_fatal_errors,
               total_calls = excluded.total_calls,
               computed_at = excluded.computed_at
             returning id, org_id, campaign_id, agent_id, total_score, fatal_errors,
                       non_fatal_errors, total_calls, computed_at",
        )
        .bind(row.id)
        .bind(row.org_id)
        .bind(row.campaign_id)
        .bind(&row.agent_id)
        .bind(row.total_score)
        .bind(row.fatal_errors)
        .bind(row.non_fatal_errors)
        .bind(row.total_calls)
        .bind(row.computed_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| CallscopeError::Database(e.to_string()))?;

        Ok(map_performance_row(&db_row))
    }

    async fn list_agent_performance(
        &self,
        org_id: Uuid,
        campaign_id: Uuid,
    ) -> CallscopeResult<Vec<AgentPerformance>> {
        let rows = sqlx::query(
            "select id, org_id, campaign_id, agent_id, total_score, fatal_errors,
                    non_fatal_errors, total_calls, computed_at
             from agent_performance
             where org_id = $1 and campaign_id = $2
             order by total_score desc, agent_id",
        )
        .bind(org_id)
        .bind(campaign_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CallscopeError::Database(e.to_string()))?;

        Ok(rows.iter().map(map_performance_row).collect())
    }

    async fn save_review(&self, review: ConversationReview) -> CallscopeResult<ConversationReview> {
        let scorecard = serde_json::to_value(&review.scorecard)
            .map_err(|e| CallscopeError::Internal(format!("scorecard encode: {e}")))?;
        let outcome = serde_json::to_value(&review.outcome)
            .map_err(|e| CallscopeError::Internal(format!("outcome encode: {e}")))?;

        let db_row = sqlx::query(
            "insert into conversation_reviews
             (id, org_id, campaign_id, agent_id, scorecard, outcome,
              disposition, reviewed_at, created_at)
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             returning id, org_id, campaign_id, agent_id, scorecard, outcome,
                       disposition, reviewed_at, created_at",
        )
        .bind(review.id)
        .bind(review.org_id)
        .bind(review.campaign_id)
        .bind(&review.agent_id)
        .bind(scorecard)
        .bind(outcome)
        .bind(&review.disposition)
        .bind(review.reviewed_at)
        .bind(review.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| CallscopeError::Database(e.to_string()))?;

        map_review_row(&db_row)
    }

    async fn get_review(
        &self,
        org_id: Uuid,
        id: Uuid,
    ) -> CallscopeResult<Option<ConversationReview>> {
        let row = sqlx::query(
            "select id, org_id, campaign_id, agent_id, scorecard, outcome,
                    disposition, reviewed_at, created_at
             from conversation_reviews
             where org_id = $1 and id = $2",
        )
        .bind(org_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CallscopeError::Database(e.to_string()))?;

        row.as_ref().map(map_review_row).transpose()
    }

    async fn list_reviews(
        &self,
        org_id: Uuid,
        filter: ReviewFilter,
    ) -> CallscopeResult<Vec<ConversationReview>> {
        let mut qb = QueryBuilder::new(
            "select id, org_id, campaign_id, agent_id, scorecard, outcome, \
             disposition, reviewed_at, created_at \
             from conversation_reviews where org_id = ",
        );
        qb.push_bind(org_id);

        if let Some(campaign_id) = filter.campaign_id {
            qb.push(" and campaign_id = ").push_bind(campaign_id);
        }
        if let Some(agent_id) = filter.agent_id {
            qb.push(" and agent_id = ").push_bind(agent_id);
        }

        qb.push(" order by reviewed_at desc");
        qb.push(" limit ").push_bind(filter.limit.unwrap_or(50));
        qb.push(" offset ").push_bind(filter.offset.unwrap_or(0));

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| CallscopeError::Database(e.to_string()))?;

        rows.iter().map(map_review_row).collect()
    }

    async fn list_campaigns(&self) -> CallscopeResult<Vec<(Uuid, Uuid)>> {
        let rows = sqlx::query(
            "select distinct org_id, campaign_id
             from conversation_reviews
             order by org_id, campaign_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CallscopeError::Database(e.to_string()))?;

        Ok(rows
            .iter()
            .map(|row| (row.get("org_id"), row.get("campaign_id")))
            .collect())
    }
}

fn failure_type_str(ft: FailureType) -> &'static str {
    match ft {
        FailureType::Fatal => "FATAL",
        FailureType::NonFatal => "NON_FATAL",
    }
}

fn parse_failure_type(s: &str) -> CallscopeResult<FailureType> {
    match s {
        "FATAL" => Ok(FailureType::Fatal),
        "NON_FATAL" => Ok(FailureType::NonFatal),
        other => Err(CallscopeError::Internal(format!(
            "unknown failure_type in row: {other}"
        ))),
    }
}

fn map_analysis_row(row: &sqlx::postgres::PgRow) -> CallscopeResult<ParameterAnalysis> {
    let failure_type: String = row.get("failure_type");
    Ok(ParameterAnalysis {
        id: row.get("id"),
        org_id: row.get("org_id"),
        campaign_id: row.get("campaign_id"),
        parameter: row.get("parameter"),
        max_score: row.get("max_score"),
        failure_type: parse_failure_type(&failure_type)?,
        current_score: row.get("current_score"),
        adherence_percentage: row.get("adherence_percentage"),
        computed_at: row.get("computed_at"),
    })
}

fn map_performance_row(row: &sqlx::postgres::PgRow) -> AgentPerformance {
    AgentPerformance {
        id: row.get("id"),
        org_id: row.get("org_id"),
        campaign_id: row.get("campaign_id"),
        agent_id: row.get("agent_id"),
        total_score: row.get("total_score"),
        fatal_errors: row.get("fatal_errors"),
        non_fatal_errors: row.get("non_fatal_errors"),
        total_calls: row.get("total_calls"),
        computed_at: row.get("computed_at"),
    }
}

fn map_review_row(row: &sqlx::postgres::PgRow) -> CallscopeResult<ConversationReview> {
    let scorecard: serde_json::Value = row.get("scorecard");
    let outcome: serde_json::Value = row.get("outcome");

    Ok(ConversationReview {
        id: row.get("id"),
        org_id: row.get("org_id"),
        campaign_id: row.get("campaign_id"),
        agent_id: row.get("agent_id"),
        scorecard: serde_json::from_value(scorecard)
            .map_err(|e| CallscopeError::Internal(format!("scorecard decode: {e}")))?,
        outcome: serde_json::from_value(outcome)
            .map_err(|e| CallscopeError::Internal(format!("outcome decode: {e}")))?,
        disposition: row.get("disposition"),
        reviewed_at: row.get("reviewed_at"),
        created_at: row.get("created_at"),
    })
}
