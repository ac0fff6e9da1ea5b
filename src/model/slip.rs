//! Slip responses: immutable records of recovery after a slip.

use serde::{Deserialize, Serialize};

/// The recovery flow completed after a slip was marked. Never mutated or
/// deleted after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlipResponse {
    pub id: String,

    /// The slip this response was composed for, as read from the root
    /// state's last-slip marker at save time.
    #[serde(rename = "slipTimestampISO")]
    pub slip_timestamp_iso: String,

    pub confession_note: String,

    /// Whether the user accepted grace rather than spiraling.
    pub grace_received: bool,

    pub lesson_learned: String,

    /// A concrete commitment to repair, not a vague intention.
    pub repair_action: String,

    pub accountability_contacted: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prayer_note: Option<String>,
}

/// A slip response as dispatched by the consumer: the id is stamped by
/// the reducer at apply time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSlipResponse {
    pub slip_timestamp_iso: String,
    pub confession_note: String,
    pub grace_received: bool,
    pub lesson_learned: String,
    pub repair_action: String,
    pub accountability_contacted: bool,
    pub prayer_note: Option<String>,
}
