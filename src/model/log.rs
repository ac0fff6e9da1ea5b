//! Check-in log entries: immutable records of urges and responses.

use serde::{Deserialize, Serialize};

/// HALT self-check flags captured at check-in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HaltFlags {
    pub hungry: bool,
    pub angry: bool,
    pub lonely: bool,
    pub tired: bool,
}

/// Urge intensity on a 1–5 scale. The range is enforced on construction
/// and on deserialization, so a stored blob with an out-of-range value
/// fails validation wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct UrgeStrength(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("urge strength must be between 1 and 5, got {0}")]
pub struct UrgeStrengthError(pub u8);

impl UrgeStrength {
    pub fn new(value: u8) -> Result<Self, UrgeStrengthError> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(UrgeStrengthError(value))
        }
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for UrgeStrength {
    type Error = UrgeStrengthError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UrgeStrength> for u8 {
    fn from(value: UrgeStrength) -> Self {
        value.0
    }
}

/// What category of response the user reached for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    Move,
    Pray,
    Connect,
    Journal,
    Worship,
    Practical,
}

/// A catalog entry describing one response the user can choose.
///
/// Embedded by value into each log entry so historical logs stay stable
/// when the catalog changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseAction {
    pub id: String,
    pub label: String,
    pub kind: ResponseKind,
}

/// How the check-in ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Slip,
    Neutral,
}

/// One check-in: never mutated or deleted after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: String,

    #[serde(rename = "createdAtISO")]
    pub created_at_iso: String,

    pub halt: HaltFlags,

    pub urge_strength: UrgeStrength,

    pub trigger_note: String,

    /// Snapshot of the chosen response, not a catalog reference.
    pub chosen_response: ResponseAction,

    pub outcome: Outcome,
}

/// A log entry as dispatched by the consumer: the id and creation
/// timestamp are stamped by the reducer at apply time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLogEntry {
    pub halt: HaltFlags,
    pub urge_strength: UrgeStrength,
    pub trigger_note: String,
    pub chosen_response: ResponseAction,
    pub outcome: Outcome,
}
