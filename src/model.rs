//! Core data model: every entity persisted in the state blob.
//!
//! The wire format is stable: camelCase keys, with explicit renames where
//! an `ISO` suffix defeats the rename rule. All date and timestamp fields
//! are opaque strings; the core never parses them.

mod daily;
mod log;
mod review;
mod settings;
mod slip;

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

pub use daily::DailyEntry;
pub use log::{
    HaltFlags, LogEntry, NewLogEntry, Outcome, ResponseAction, ResponseKind, UrgeStrength,
    UrgeStrengthError,
};
pub use review::WeeklyReview;
pub use settings::{GuardrailItem, SettingsPatch, Theme, UserSettings};
pub use slip::{NewSlipResponse, SlipResponse};

/// The root application state: one per installation, always fully present
/// and schema-valid in memory. Every transition produces a new whole value;
/// nothing in here is mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub settings: UserSettings,

    /// Daily ritual entries keyed by date (`YYYY-MM-DD`).
    pub daily: BTreeMap<String, DailyEntry>,

    /// Check-in log, newest first.
    pub logs: Vec<LogEntry>,

    /// When the most recent slip was marked. Independent of
    /// `slip_responses`: a slip can be marked before its response exists.
    #[serde(rename = "lastSlipAtISO", default, skip_serializing_if = "Option::is_none")]
    pub last_slip_at_iso: Option<String>,

    /// Weekly reviews keyed by week (`YYYY-Www`).
    pub weekly_reviews: BTreeMap<String, WeeklyReview>,

    /// Slip responses, newest first.
    pub slip_responses: Vec<SlipResponse>,
}

/// The hardcoded fresh-install state. Also the fallback whenever the
/// stored blob is missing or fails validation.
#[must_use]
pub fn default_state() -> AppState {
    AppState {
        settings: UserSettings::default(),
        daily: BTreeMap::new(),
        logs: Vec::new(),
        last_slip_at_iso: None,
        weekly_reviews: BTreeMap::new(),
        slip_responses: Vec::new(),
    }
}

/// Why a candidate state was rejected.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The value does not deserialize into the schema. Covers missing
    /// required fields, closed-enum violations, and out-of-range urge
    /// strengths (rejected by [`UrgeStrength`]'s `try_from`).
    #[error("state blob does not match the schema: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("duplicate guardrail id {0:?}")]
    DuplicateGuardrailId(String),
}

/// Validate an untrusted deserialized value into an [`AppState`].
///
/// Wholesale: if any field anywhere in the tree fails, the entire candidate
/// is rejected and the caller falls back to [`default_state`]. This is the
/// only validation entry point; it returns a `Result` and never panics on
/// bad input.
pub fn validate(value: serde_json::Value) -> Result<AppState, SchemaError> {
    let state: AppState = serde_json::from_value(value)?;

    let mut ids = HashSet::new();
    for guardrail in &state.settings.guardrails {
        if !ids.insert(guardrail.id.as_str()) {
            return Err(SchemaError::DuplicateGuardrailId(guardrail.id.clone()));
        }
    }

    Ok(state)
}
