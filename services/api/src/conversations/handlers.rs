use axum::extract::{Path, Query, State};
use axum::Json;
use callscope_common::error::{CallscopeError, CallscopeResult};
use callscope_db::quality::models::{ConversationReview, ReviewFilter};
use callscope_db::quality::repositories::QualityRepository;
use callscope_scoring::{
    aggregate, classify_by_percentage, display_for, parameter_adherence, round_one_decimal,
    ErrorTally, FailureType, PenaltyPolicy, ScoreParameter, Scorecard, StandardPenaltyPolicy,
};
use uuid::Uuid;

use crate::conversations::responses::{
    ConversationDetailResponse, ConversationParameterResponse, ConversationSummaryResponse,
    ListConversationsResponse, OutcomeFieldResponse, SubRuleResponse,
};
use crate::error::ApiError;
use crate::extractors::OrgId;
use crate::AppState;

/// Rebuild the domain scorecard from a stored review. Stored rows were
/// validated on the way in, so a failure here is corruption, not caller error.
fn scorecard_from_review(review: &ConversationReview) -> CallscopeResult<Scorecard> {
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

    Scorecard::new(parameters)
        .map_err(|e| CallscopeError::Internal(format!("stored scorecard invalid: {e}")))
}

/// Count failed parameters by failure type.
fn tally_failures(card: &Scorecard) -> ErrorTally {
    let mut tally = ErrorTally {
        fatal_count: 0,
        non_fatal_count: 0,
    };
    for param in card.parameters() {
        if param.is_failed() {
            match param.failure_type {
                FailureType::Fatal => tally.fatal_count += 1,
                FailureType::NonFatal => tally.non_fatal_count += 1,
            }
        }
    }
    tally
}

fn to_detail_response(review: ConversationReview) -> CallscopeResult<ConversationDetailResponse> {
    let card = scorecard_from_review(&review)?;
    let totals = aggregate(&card);
    let tier = classify_by_percentage(totals.adherence_percentage);

    let error_tally = tally_failures(&card);
    let penalized_score =
        round_one_decimal(StandardPenaltyPolicy.apply(totals.adherence_percentage, &error_tally));

    let parameters = card
        .parameters()
        .iter()
        .map(|p| {
            let pct = parameter_adherence(p);
            let param_tier = classify_by_percentage(pct);
            let stored = review.scorecard.get(&p.name).ok_or_else(|| {
                CallscopeError::Internal(format!("scorecard key mismatch for '{}'", p.name))
            })?;
            Ok(ConversationParameterResponse {
                parameter: p.name.clone(),
                max_score: p.max_score,
                score: p.score,
                adherence_percentage: pct,
                tier: param_tier,
                display: display_for(param_tier),
                explanation: stored.explanation.clone(),
                sub_rule_analysis: stored
                    .sub_rule_analysis
                    .iter()
                    .map(|r| SubRuleResponse {
                        rule: r.rule.clone(),
                        status: r.status,
                        reason: r.reason.clone(),
                    })
                    .collect(),
            })
        })
        .collect::<CallscopeResult<Vec<_>>>()?;

    let outcome = review
        .outcome
        .values()
        .map(|f| OutcomeFieldResponse {
            attribute_name: f.attribute_name.clone(),
            extracted_value: f.extracted_value.clone(),
            reasoning: f.reasoning.clone(),
        })
        .collect();

    Ok(ConversationDetailResponse {
        id: review.id,
        campaign_id: review.campaign_id,
        agent_id: review.agent_id,
        disposition: review.disposition,
        totals,
        error_tally,
        penalized_score,
        tier,
        display: display_for(tier),
        parameters,
        outcome,
        reviewed_at: review.reviewed_at,
    })
}

fn to_summary_response(
    review: ConversationReview,
) -> CallscopeResult<ConversationSummaryResponse> {
    let card = scorecard_from_review(&review)?;
    let totals = aggregate(&card);
    let tier = classify_by_percentage(totals.adherence_percentage);

    Ok(ConversationSummaryResponse {
        id: review.id,
        campaign_id: review.campaign_id,
        agent_id: review.agent_id,
        disposition: review.disposition,
        adherence_percentage: totals.adherence_percentage,
        tier,
        display: display_for(tier),
        reviewed_at: review.reviewed_at,
    })
}

pub async fn get_conversation(
    State(state): State<AppState>,
    OrgId(org): OrgId,
    Path(id): Path<Uuid>,
) -> Result<Json<ConversationDetailResponse>, ApiError> {
    let review = state
        .quality_repo
        .get_review(org, id)
        .await?
        .ok_or_else(|| CallscopeError::NotFound(format!("conversation not found: {id}")))?;

    Ok(Json(to_detail_response(review)?))
}

pub async fn list_conversations(
    State(state): State<AppState>,
    OrgId(org): OrgId,
    Query(filter): Query<ReviewFilter>,
) -> Result<Json<ListConversationsResponse>, ApiError> {
    let reviews = state.quality_repo.list_reviews(org, filter).await?;

    let data: Vec<ConversationSummaryResponse> = reviews
        .into_iter()
        .map(to_summary_response)
        .collect::<CallscopeResult<_>>()?;
    let count = data.len();
    Ok(Json(ListConversationsResponse { data, count }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use callscope_db::quality::models::{OutcomeField, ReviewedParameter};
    use callscope_scoring::{ColorToken, FailureType, RuleStatus, SeverityTier, SubRule};
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn reviewed(name: &str, max: f64, score: f64) -> ReviewedParameter {
        ReviewedParameter {
            parameter: name.to_string(),
            max_score: max,
            score,
            failure_type: FailureType::NonFatal,
            explanation: format!("{name} scored {score}"),
            sub_rule_analysis: Vec::new(),
        }
    }

    fn review_with(parameters: Vec<ReviewedParameter>) -> ConversationReview {
        let scorecard: BTreeMap<String, ReviewedParameter> = parameters
            .into_iter()
            .map(|p| (p.parameter.clone(), p))
            .collect();
        ConversationReview {
            id: Uuid::new_v4(),
            org_id: Uuid::new_v4(),
            campaign_id: Uuid::new_v4(),
            agent_id: "agent-5".to_string(),
            scorecard,
            outcome: BTreeMap::new(),
            disposition: "NEUTRAL".to_string(),
            reviewed_at: Utc::now(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn detail_recomputes_totals_from_stored_parameters() {
        let review = review_with(vec![
            reviewed("Greeting", 30.0, 27.0),
            reviewed("Technical Diagnosis", 25.0, 20.0),
            reviewed("Resolution", 20.0, 15.0),
            reviewed("Empathy", 15.0, 10.0),
            reviewed("Closing", 10.0, 5.0),
        ]);
        let detail = to_detail_response(review).expect("valid review");
        assert_eq!(detail.totals.total_possible, 100.0);
        assert_eq!(detail.totals.total_achieved, 77.0);
        assert_eq!(detail.totals.adherence_percentage, 77.0);
        assert_eq!(detail.tier, SeverityTier::NeedsImprovement);
        assert_eq!(detail.display.color, ColorToken::Error);
        assert_eq!(detail.parameters.len(), 5);
        // No failed parameters, so the penalized score equals the raw one
        assert_eq!(detail.error_tally.fatal_count, 0);
        assert_eq!(detail.penalized_score, 77.0);
    }

    #[test]
    fn fatal_failure_penalizes_detail_score() {
        let mut fatal = reviewed("Verification", 20.0, 0.0);
        fatal.failure_type = FailureType::Fatal;
        let review = review_with(vec![fatal, reviewed("Greeting", 30.0, 30.0)]);

        let detail = to_detail_response(review).expect("valid review");
        assert_eq!(detail.totals.adherence_percentage, 60.0);
        assert_eq!(detail.error_tally.fatal_count, 1);
        assert_eq!(detail.error_tally.non_fatal_count, 0);
        // One fatal error reduces the score by 30%
        assert_eq!(detail.penalized_score, 42.0);
    }

    #[test]
    fn non_fatal_failures_penalize_additively() {
        let review = review_with(vec![
            reviewed("Empathy", 10.0, 0.0),
            reviewed("Closing", 10.0, 0.0),
            reviewed("Greeting", 80.0, 80.0),
        ]);

        let detail = to_detail_response(review).expect("valid review");
        assert_eq!(detail.totals.adherence_percentage, 80.0);
        assert_eq!(detail.error_tally.non_fatal_count, 2);
        // Two non-fatal errors reduce by 20%
        assert_eq!(detail.penalized_score, 64.0);
    }

    #[test]
    fn detail_of_empty_scorecard_is_zero_not_error() {
        let review = review_with(Vec::new());
        let detail = to_detail_response(review).expect("empty card is valid");
        assert_eq!(detail.totals.total_possible, 0.0);
        assert_eq!(detail.totals.adherence_percentage, 0.0);
    }

    #[test]
    fn per_parameter_tiers_are_individual() {
        let review = review_with(vec![
            reviewed("Strong", 10.0, 9.5),
            reviewed("Weak", 10.0, 6.0),
        ]);
        let detail = to_detail_response(review).expect("valid review");
        let strong = detail
            .parameters
            .iter()
            .find(|p| p.parameter == "Strong")
            .expect("present");
        let weak = detail
            .parameters
            .iter()
            .find(|p| p.parameter == "Weak")
            .expect("present");
        assert_eq!(strong.tier, SeverityTier::Excellent);
        assert_eq!(weak.tier, SeverityTier::NeedsImprovement);
    }

    #[test]
    fn corrupt_stored_score_is_internal_error() {
        let review = review_with(vec![reviewed("Broken", 10.0, 12.0)]);
        let result = to_detail_response(review);
        assert!(matches!(result, Err(CallscopeError::Internal(_))));
    }

    #[test]
    fn detail_carries_sub_rules_and_outcome() {
        let mut p = reviewed("Diagnosis", 20.0, 14.0);
        p.sub_rule_analysis = vec![SubRule {
            rule: "Verified account".to_string(),
            status: RuleStatus::Fail,
            reason: "skipped verification".to_string(),
        }];
        let mut review = review_with(vec![p]);
        review.outcome.insert(
            "refund_issued".to_string(),
            OutcomeField {
                attribute_name: "refund_issued".to_string(),
                extracted_value: "false".to_string(),
                reasoning: "no refund discussed".to_string(),
            },
        );

        let detail = to_detail_response(review).expect("valid review");
        assert_eq!(detail.parameters[0].sub_rule_analysis.len(), 1);
        assert_eq!(
            detail.parameters[0].sub_rule_analysis[0].status,
            RuleStatus::Fail
        );
        assert_eq!(detail.outcome.len(), 1);
        assert_eq!(detail.outcome[0].attribute_name, "refund_issued");
    }

    #[test]
    fn summary_matches_detail_percentage() {
        let make = || {
            review_with(vec![
                reviewed("Greeting", 30.0, 26.1),
                reviewed("Closing", 270.0, 234.9),
            ])
        };
        let detail = to_detail_response(make()).expect("valid");
        let summary = to_summary_response(make()).expect("valid");
        // 261/300 → 87.0, same rounding on both surfaces
        assert_eq!(detail.totals.adherence_percentage, 87.0);
        assert_eq!(summary.adherence_percentage, 87.0);
        assert_eq!(summary.tier, SeverityTier::Good);
    }
}
