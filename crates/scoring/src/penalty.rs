use crate::severity::ErrorTally;

/// Score-reduction policy for fatal/non-fatal error tallies.
///
/// The published scoring rules fix the reduction table but not how the two
/// reductions combine or what base they apply to, so the application is kept
/// behind a trait. Swap the implementation when product settles the formula;
/// callers only see `apply`.
pub trait PenaltyPolicy {
    /// Combined reduction fraction in `[0, 1]` for a tally.
    fn combined_reduction(&self, tally: &ErrorTally) -> f64;

    /// Apply the reduction to a base score.
    fn apply(&self, base_score: f64, tally: &ErrorTally) -> f64 {
        base_score * (1.0 - self.combined_reduction(tally))
    }
}

/// The documented scoring-rules table:
/// - 1 fatal error → reduce by 30%, ≥2 fatal → 75%
/// - 1 non-fatal error → reduce by 10%, ≥2 non-fatal → 20%
///
/// Fatal and non-fatal reductions are independent and both applied; this
/// implementation combines them additively and caps the total at 100%.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPenaltyPolicy;

impl StandardPenaltyPolicy {
    fn fatal_reduction(count: u32) -> f64 {
        match count {
            0 => 0.0,
            1 => 0.30,
            _ => 0.75,
        }
    }

    fn non_fatal_reduction(count: u32) -> f64 {
        match count {
            0 => 0.0,
            1 => 0.10,
            _ => 0.20,
        }
    }
}

impl PenaltyPolicy for StandardPenaltyPolicy {
    fn combined_reduction(&self, tally: &ErrorTally) -> f64 {
        let combined = Self::fatal_reduction(tally.fatal_count)
            + Self::non_fatal_reduction(tally.non_fatal_count);
        combined.min(1.0)
    }
}
