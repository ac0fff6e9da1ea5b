//! Weekly reviews, keyed by week.

use serde::{Deserialize, Serialize};

/// One week's reflection. At most one per week key; saving again for the
/// same week replaces the earlier review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReview {
    /// Week key, `YYYY-Www`. Matches the map key this review lives under.
    #[serde(rename = "weekISO")]
    pub week_iso: String,

    #[serde(rename = "completedAtISO")]
    pub completed_at_iso: String,

    /// Wins worth remembering. Empty strings are filtered out before the
    /// review reaches storage.
    pub wins: Vec<String>,

    pub trigger_patterns: String,

    pub gratitude: String,

    pub next_week_focus: String,

    pub guardrails_reviewed: bool,
}
