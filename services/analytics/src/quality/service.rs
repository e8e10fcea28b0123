use chrono::Utc;
use std::collections::BTreeMap;
use uuid::Uuid;

use callscope_common::error::CallscopeResult;
use callscope_db::quality::models::{AgentPerformance, ParameterAnalysis, ReviewFilter};
use callscope_db::quality::repositories::QualityRepository;
use callscope_scoring::{
    aggregate, parameter_adherence, round_one_decimal, FailureType, ScoreParameter, Scorecard,
};

const REVIEW_PAGE_SIZE: i64 = 200;

/// What one recompute pass touched, for logging.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RecomputeSummary {
    pub reviews_processed: usize,
    pub reviews_skipped: usize,
    pub parameters_updated: usize,
    pub agents_updated: usize,
}

#[derive(Default)]
struct ParamAccumulator {
    max_sum: f64,
    score_sum: f64,
    failure_type: Option<FailureType>,
}

#[derive(Default)]
struct AgentAccumulator {
    adherence_sum: f64,
    fatal_errors: i32,
    non_fatal_errors: i32,
    total_calls: i32,
}

pub struct QualityAnalyticsService<R: QualityRepository> {
    repo: R,
}

impl<R: QualityRepository> QualityAnalyticsService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Recompute every campaign that has reviews. A failing campaign is
    /// logged and skipped so one bad org cannot stall the whole pass.
    pub async fn recompute_all(&self) -> CallscopeResult<()> {
        let campaigns = self.repo.list_campaigns().await?;
        tracing::info!(count = campaigns.len(), "recomputing campaigns");

        for (org_id, campaign_id) in campaigns {
            match self.recompute_campaign(org_id, campaign_id).await {
                Ok(summary) => {
                    tracing::info!(
                        %org_id,
                        %campaign_id,
                        reviews = summary.reviews_processed,
                        skipped = summary.reviews_skipped,
                        parameters = summary.parameters_updated,
                        agents = summary.agents_updated,
                        "campaign recomputed"
                    );
                }
                Err(e) => {
                    tracing::error!(%org_id, %campaign_id, error = %e, "campaign recompute failed");
                }
            }
        }
        Ok(())
    }

    /// Rebuild the per-parameter and per-agent aggregates for one campaign
    /// from its stored conversation reviews.
    ///
    /// - parameter rows: `current_score = Σ score`, `max_score = Σ max_score`
    ///   across reviews, adherence recomputed from the sums
    /// - agent rows: `total_score` is the mean per-conversation adherence,
    ///   error counts tally failed parameters by failure type
    ///
    /// Reviews whose stored scorecard no longer validates are skipped with a
    /// warning rather than failing the campaign.
    pub async fn recompute_campaign(
        &self,
        org_id: Uuid,
        campaign_id: Uuid,
    ) -> CallscopeResult<RecomputeSummary> {
        let mut summary = RecomputeSummary::default();
        let mut params: BTreeMap<String, ParamAccumulator> = BTreeMap::new();
        let mut agents: BTreeMap<String, AgentAccumulator> = BTreeMap::new();

        let mut offset = 0;
        loop {
            let page = self
                .repo
                .list_reviews(
                    org_id,
                    ReviewFilter {
                        campaign_id: Some(campaign_id),
                        agent_id: None,
                        limit: Some(REVIEW_PAGE_SIZE),
                        offset: Some(offset),
                    },
                )
                .await?;
            let page_len = page.len();

            for review in page {
                let parameters: Vec<ScoreParameter> = review
                    .scorecard
                    .values()
                    .map(|p| ScoreParameter {
                        name: p.parameter.clone(),
                        max_score: p.max_score,
                        score: p.score,
                        failure_type: p.failure_type,
                        sub_rules: p.sub_rule_analysis.clone(),
                    })
                    .collect();

                let card = match Scorecard::new(parameters) {
                    Ok(card) => card,
                    Err(e) => {
                        tracing::warn!(review_id = %review.id, error = %e, "skipping invalid review");
                        summary.reviews_skipped += 1;
                        continue;
                    }
                };

                let totals = aggregate(&card);
                let agent = agents.entry(review.agent_id.clone()).or_default();
                agent.adherence_sum += totals.adherence_percentage;
                agent.total_calls += 1;

                for param in card.parameters() {
                    if param.is_failed() {
                        match param.failure_type {
                            FailureType::Fatal => agent.fatal_errors += 1,
                            FailureType::NonFatal => agent.non_fatal_errors += 1,
                        }
                    }

                    let acc = params.entry(param.name.clone()).or_default();
                    acc.max_sum += param.max_score;
                    acc.score_sum += param.score;
                    acc.failure_type = Some(param.failure_type);
                }

                summary.reviews_processed += 1;
            }

            if (page_len as i64) < REVIEW_PAGE_SIZE {
                break;
            }
            offset += REVIEW_PAGE_SIZE;
        }

        let now = Utc::now();

        let analysis_rows: Vec<ParameterAnalysis> = params
            .into_iter()
            .map(|(name, acc)| {
                let adherence = parameter_adherence(&ScoreParameter {
                    name: name.clone(),
                    max_score: acc.max_sum,
                    score: acc.score_sum,
                    failure_type: acc.failure_type.unwrap_or(FailureType::NonFatal),
                    sub_rules: Vec::new(),
                });
                ParameterAnalysis {
                    id: Uuid::new_v4(),
                    org_id,
                    campaign_id,
                    parameter: name,
                    max_score: acc.max_sum,
                    failure_type: acc.failure_type.unwrap_or(FailureType::NonFatal),
                    current_score: acc.score_sum,
                    adherence_percentage: adherence,
                    computed_at: now,
                }
            })
            .collect();

        if !analysis_rows.is_empty() {
            let saved = self.repo.save_parameter_analysis(analysis_rows).await?;
            summary.parameters_updated = saved.len();
        }

        for (agent_id, acc) in agents {
            let total_score = round_one_decimal(acc.adherence_sum / acc.total_calls as f64);
            self.repo
                .upsert_agent_performance(AgentPerformance {
                    id: Uuid::new_v4(),
                    org_id,
                    campaign_id,
                    agent_id,
                    total_score,
                    fatal_errors: acc.fatal_errors,
                    non_fatal_errors: acc.non_fatal_errors,
                    total_calls: acc.total_calls,
                    computed_at: now,
                })
                .await?;
            summary.agents_updated += 1;
        }

        Ok(summary)
    }
}
