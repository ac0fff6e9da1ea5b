//! Daily ritual entries, keyed by date.

use serde::{Deserialize, Serialize};

/// One day's ritual record. At most one per date; completing the ritual
/// again on the same date replaces the earlier entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyEntry {
    /// Date key, `YYYY-MM-DD`. Matches the map key this entry lives under.
    #[serde(rename = "dateISO")]
    pub date_iso: String,

    pub completed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Which verse was shown that day.
    pub verse_id: String,

    /// Which identity statement was shown that day.
    pub identity_id: String,
}
