use crate::severity::SeverityTier;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorToken {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusDisplay {
    pub color: ColorToken,
    pub label: &'static str,
}

/// The one canonical tier → color/label table. Every surface that shows a
/// quality status (tables, cards, trend arrows) goes through this lookup, so
/// thresholds cannot drift between pages.
pub fn display_for(tier: SeverityTier) -> StatusDisplay {
    match tier {
        SeverityTier::Excellent => StatusDisplay {
            color: ColorToken::Success,
            label: "Excellent",
        },
        SeverityTier::Good => StatusDisplay {
            color: ColorToken::Warning,
            label: "Good",
        },
        SeverityTier::NeedsImprovement => StatusDisplay {
            color: ColorToken::Error,
            label: "Needs Improvement",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::classify_by_percentage;

    #[test]
    fn tiers_map_to_distinct_colors() {
        assert_eq!(
            display_for(SeverityTier::Excellent).color,
            ColorToken::Success
        );
        assert_eq!(display_for(SeverityTier::Good).color, ColorToken::Warning);
        assert_eq!(
            display_for(SeverityTier::NeedsImprovement).color,
            ColorToken::Error
        );
    }

    #[test]
    fn labels_match_tier_names() {
        assert_eq!(display_for(SeverityTier::Excellent).label, "Excellent");
        assert_eq!(display_for(SeverityTier::Good).label, "Good");
        assert_eq!(
            display_for(SeverityTier::NeedsImprovement).label,
            "Needs Improvement"
        );
    }

    #[test]
    fn trend_display_uses_the_same_thresholds() {
        // 85 sits inside the Good band; a trend arrow at 85 must color the
        // same as any other Good value, not get its own cutoff.
        let at_85 = display_for(classify_by_percentage(85.0));
        let at_81 = display_for(classify_by_percentage(81.0));
        assert_eq!(at_85, at_81);
    }

    #[test]
    fn color_token_wire_format() {
        let json = serde_json::to_string(&ColorToken::Success).expect("serialize");
        assert_eq!(json, "\"success\"");
    }
}
