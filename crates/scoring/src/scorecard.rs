use callscope_common::error::{CallscopeError, CallscopeResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What kind of miss a failed parameter represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureType {
    Fatal,
    NonFatal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleStatus {
    Pass,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubRule {
    pub rule: String,
    pub status: RuleStatus,
    pub reason: String,
}

/// One named, weighted criterion evaluated during a quality review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreParameter {
    pub name: String,
    pub max_score: f64,
    pub score: f64,
    pub failure_type: FailureType,
    #[serde(default)]
    pub sub_rules: Vec<SubRule>,
}

impl ScoreParameter {
    fn validate(&self) -> CallscopeResult<()> {
        if self.name.trim().is_empty() {
            return Err(CallscopeError::Validation(
                "parameter name must not be empty".to_string(),
            ));
        }
        if self.max_score <= 0.0 || !self.max_score.is_finite() {
            return Err(CallscopeError::Validation(format!(
                "max_score must be positive for '{}', got {}",
                self.name, self.max_score
            )));
        }
        if self.score < 0.0 || self.score > self.max_score || !self.score.is_finite() {
            return Err(CallscopeError::Validation(format!(
                "score must be within [0, {}] for '{}', got {}",
                self.max_score, self.name, self.score
            )));
        }
        Ok(())
    }

    /// A parameter counts as failed when any sub-rule failed, or when it
    /// scored zero with no sub-rules (manual-only scoring).
    pub fn is_failed(&self) -> bool {
        if self.sub_rules.is_empty() {
            return self.score == 0.0;
        }
        self.sub_rules.iter().any(|r| r.status == RuleStatus::Fail)
    }
}

/// An immutable set of reviewed parameters, unique by name.
///
/// Built fresh from a backend row per conversation or goal version; edits
/// construct a new Scorecard rather than mutating in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scorecard {
    parameters: Vec<ScoreParameter>,
}

impl Scorecard {
    pub fn new(parameters: Vec<ScoreParameter>) -> CallscopeResult<Self> {
        let mut seen = HashSet::new();
        for param in &parameters {
            param.validate()?;
            if !seen.insert(param.name.as_str()) {
                return Err(CallscopeError::Validation(format!(
                    "duplicate parameter name: {}",
                    param.name
                )));
            }
        }
        Ok(Self { parameters })
    }

    pub fn parameters(&self) -> &[ScoreParameter] {
        &self.parameters
    }
}

/// Derived totals for a scorecard. Never stored, always recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreTotals {
    pub total_possible: f64,
    pub total_achieved: f64,
    pub adherence_percentage: f64,
}

/// Reduce a scorecard into totals and an adherence percentage.
///
/// - `total_possible = Σ max_score`, `total_achieved = Σ score`
/// - `adherence_percentage = 100 * achieved / possible`, rounded to one
///   decimal place; defined as 0.0 when nothing is possible (empty card)
///   rather than dividing by zero.
pub fn aggregate(card: &Scorecard) -> ScoreTotals {
    let total_possible: f64 = card.parameters.iter().map(|p| p.max_score).sum();
    let total_achieved: f64 = card.parameters.iter().map(|p| p.score).sum();

    let adherence_percentage = if total_possible > 0.0 {
        round_one_decimal(100.0 * total_achieved / total_possible)
    } else {
        0.0
    };

    ScoreTotals {
        total_possible,
        total_achieved,
        adherence_percentage,
    }
}

/// Adherence percentage for a single parameter, one-decimal rounded.
/// `max_score > 0` is guaranteed by construction.
pub fn parameter_adherence(param: &ScoreParameter) -> f64 {
    round_one_decimal(100.0 * param.score / param.max_score)
}

/// The one rounding rule for displayed percentages and scores.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(name: &str, max: f64, score: f64) -> ScoreParameter {
        ScoreParameter {
            name: name.to_string(),
            max_score: max,
            score,
            failure_type: FailureType::NonFatal,
            sub_rules: Vec::new(),
        }
    }

    #[test]
    fn empty_scorecard_aggregates_to_zero() {
        let card = Scorecard::new(Vec::new()).expect("empty card is valid");
        let totals = aggregate(&card);
        assert_eq!(totals.total_possible, 0.0);
        assert_eq!(totals.total_achieved, 0.0);
        assert_eq!(totals.adherence_percentage, 0.0);
    }

    #[test]
    fn five_parameter_card_totals() {
        let card = Scorecard::new(vec![
            param("Greeting", 30.0, 27.0),
            param("Technical Diagnosis", 25.0, 20.0),
            param("Resolution", 20.0, 15.0),
            param("Empathy", 15.0, 10.0),
            param("Closing", 10.0, 5.0),
        ])
        .expect("valid card");
        let totals = aggregate(&card);
        assert_eq!(totals.total_possible, 100.0);
        assert_eq!(totals.total_achieved, 77.0);
        assert_eq!(totals.adherence_percentage, 77.0);
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        let card = Scorecard::new(vec![param("Only", 300.0, 261.0)]).expect("valid card");
        assert_eq!(aggregate(&card).adherence_percentage, 87.0);

        let card = Scorecard::new(vec![param("Only", 3.0, 1.0)]).expect("valid card");
        // 33.333... → 33.3
        assert_eq!(aggregate(&card).adherence_percentage, 33.3);
    }

    #[test]
    fn percentage_stays_within_bounds() {
        let card = Scorecard::new(vec![param("A", 10.0, 10.0), param("B", 5.0, 0.0)])
            .expect("valid card");
        let pct = aggregate(&card).adherence_percentage;
        assert!((0.0..=100.0).contains(&pct));

        let full = Scorecard::new(vec![param("A", 10.0, 10.0)]).expect("valid card");
        assert_eq!(aggregate(&full).adherence_percentage, 100.0);
    }

    #[test]
    fn single_parameter_adherence_rounds() {
        let p = param("Diagnosis", 30.0, 27.0);
        assert_eq!(parameter_adherence(&p), 90.0);
        let p = param("Closing", 7.0, 5.0);
        // 71.428... → 71.4
        assert_eq!(parameter_adherence(&p), 71.4);
    }

    #[test]
    fn round_one_decimal_is_the_shared_rule() {
        assert_eq!(round_one_decimal(100.0 * 261.0 / 300.0), 87.0);
        // 71.428... → 71.4
        assert_eq!(round_one_decimal(500.0 / 7.0), 71.4);
        assert_eq!(round_one_decimal(42.0), 42.0);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let card = Scorecard::new(vec![param("A", 30.0, 22.5), param("B", 20.0, 17.0)])
            .expect("valid card");
        let first = aggregate(&card);
        let second = aggregate(&card);
        assert_eq!(first, second);
    }

    #[test]
    fn negative_max_score_rejected() {
        let result = Scorecard::new(vec![param("Bad", -5.0, 0.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn zero_max_score_rejected() {
        let result = Scorecard::new(vec![param("Bad", 0.0, 0.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn score_above_max_rejected() {
        let result = Scorecard::new(vec![param("Bad", 10.0, 11.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn negative_score_rejected() {
        let result = Scorecard::new(vec![param("Bad", 10.0, -1.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn duplicate_parameter_names_rejected() {
        let result = Scorecard::new(vec![param("Same", 10.0, 5.0), param("Same", 20.0, 10.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn empty_parameter_name_rejected() {
        let result = Scorecard::new(vec![param("  ", 10.0, 5.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn failed_when_any_sub_rule_fails() {
        let mut p = param("Diagnosis", 20.0, 15.0);
        p.sub_rules = vec![
            SubRule {
                rule: "Asked clarifying questions".to_string(),
                status: RuleStatus::Pass,
                reason: "covered at 00:42".to_string(),
            },
            SubRule {
                rule: "Confirmed root cause".to_string(),
                status: RuleStatus::Fail,
                reason: "never confirmed".to_string(),
            },
        ];
        assert!(p.is_failed());
    }

    #[test]
    fn manual_only_parameter_failed_at_zero() {
        let zero = param("Manual", 10.0, 0.0);
        assert!(zero.is_failed());
        let partial = param("Manual", 10.0, 3.0);
        assert!(!partial.is_failed());
    }

    #[test]
    fn failure_type_wire_format() {
        let json = serde_json::to_string(&FailureType::NonFatal).expect("serialize");
        assert_eq!(json, "\"NON_FATAL\"");
        let back: FailureType = serde_json::from_str("\"FATAL\"").expect("deserialize");
        assert_eq!(back, FailureType::Fatal);
    }

    #[test]
    fn rule_status_wire_format() {
        let json = serde_json::to_string(&RuleStatus::Fail).expect("serialize");
        assert_eq!(json, "\"Fail\"");
        let back: RuleStatus = serde_json::from_str("\"Pass\"").expect("deserialize");
        assert_eq!(back, RuleStatus::Pass);
    }
}
