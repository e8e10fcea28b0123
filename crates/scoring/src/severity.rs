use callscope_common::error::{CallscopeError, CallscopeResult};
use serde::{Deserialize, Serialize};

/// Discrete status tier shown across every quality page. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityTier {
    Excellent,
    Good,
    NeedsImprovement,
}

/// Fatal/non-fatal error counts accumulated across a set of conversations
/// for one agent or one campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ErrorTally {
    pub fatal_count: u32,
    pub non_fatal_count: u32,
}

impl ErrorTally {
    /// Build a tally from boundary integers (DB rows come in as i64/i32).
    /// Counts outside `u32` range, negative or too large, are invalid input.
    pub fn try_new(fatal_count: i64, non_fatal_count: i64) -> CallscopeResult<Self> {
        let out_of_range = |_| {
            CallscopeError::Validation(format!(
                "error counts must fit in u32, got fatal={fatal_count}, non_fatal={non_fatal_count}"
            ))
        };
        Ok(Self {
            fatal_count: u32::try_from(fatal_count).map_err(out_of_range)?,
            non_fatal_count: u32::try_from(non_fatal_count).map_err(out_of_range)?,
        })
    }
}

/// Percentage-based tier, used for parameter adherence, agent total score,
/// and call quality score display.
///
/// - `>= 90` Excellent
/// - `80 <= pct < 90` Good
/// - `< 80` NeedsImprovement
pub fn classify_by_percentage(percentage: f64) -> SeverityTier {
    if percentage >= 90.0 {
        SeverityTier::Excellent
    } else if percentage >= 80.0 {
        SeverityTier::Good
    } else {
        SeverityTier::NeedsImprovement
    }
}

/// Fatal-count-based agent status, independent of any percentage.
///
/// This is deliberately a separate function from [`classify_by_percentage`]:
/// the same agent can be "Excellent" by fatal count while their score colors
/// as a warning, and both labels are shown together.
pub fn classify_by_fatal_count(fatal_errors: u32) -> SeverityTier {
    match fatal_errors {
        0 => SeverityTier::Excellent,
        1 => SeverityTier::Good,
        _ => SeverityTier::NeedsImprovement,
    }
}
