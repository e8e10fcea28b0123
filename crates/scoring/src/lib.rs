pub mod penalty;
pub mod presentation;
pub mod scorecard;
pub mod severity;

pub use penalty::{PenaltyPolicy, StandardPenaltyPolicy};
pub use presentation::{display_for, ColorToken, StatusDisplay};
pub use scorecard::{
    aggregate, parameter_adherence, round_one_decimal, FailureType, RuleStatus, ScoreParameter,
    ScoreTotals, Scorecard, SubRule,
};
pub use severity::{classify_by_fatal_count, classify_by_percentage, ErrorTally, SeverityTier};
