//! User settings: identity, guardrails, theme, and boundary preferences.

use serde::{Deserialize, Serialize};

/// One guardrail: a practical boundary the user committed to.
///
/// Ids are unique within the list; toggling one entry leaves the others
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardrailItem {
    pub id: String,
    pub title: String,
    pub enabled: bool,
}

/// Display theme preference. `System` defers to the environment at
/// presentation time and is resolved outside the persisted model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    System,
    Light,
    Dark,
}

/// User-editable settings.
///
/// Boundary preference fields carry serde defaults so a blob written before
/// a field existed still validates as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Accountability partner, contacted during slip recovery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accountability_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accountability_phone: Option<String>,

    pub guardrails: Vec<GuardrailItem>,

    pub theme: Theme,

    /// Week key of the most recently completed weekly review.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_weekly_review_week: Option<String>,

    #[serde(default = "default_screen_time_cap")]
    pub screen_time_cap_minutes: u32,

    #[serde(default = "default_on")]
    pub no_screens_in_bedroom: bool,

    #[serde(default = "default_on")]
    pub no_screens_at_meals: bool,

    /// When to dock the phone for the night, as an opaque `HH:MM` string.
    #[serde(default = "default_dock_reminder")]
    pub dock_reminder_time: String,

    #[serde(default)]
    pub hsp_quiet_mode: bool,

    #[serde(default)]
    pub hsp_recharge_reminder: bool,

    #[serde(default)]
    pub hsp_small_group_mode: bool,
}

fn default_screen_time_cap() -> u32 {
    120
}

fn default_on() -> bool {
    true
}

fn default_dock_reminder() -> String {
    "20:00".to_string()
}

impl Default for UserSettings {
    /// The fresh-install settings: four starter guardrails, system theme,
    /// conservative boundary defaults.
    fn default() -> Self {
        Self {
            display_name: None,
            accountability_name: None,
            accountability_phone: None,
            guardrails: vec![
                guardrail("1", "No phone in bathroom", true),
                guardrail("2", "Charge phone outside bedroom", true),
                guardrail("3", "Content filters active", true),
                guardrail("4", "Open door policy", false),
            ],
            theme: Theme::System,
            last_weekly_review_week: None,
            screen_time_cap_minutes: default_screen_time_cap(),
            no_screens_in_bedroom: true,
            no_screens_at_meals: true,
            dock_reminder_time: default_dock_reminder(),
            hsp_quiet_mode: false,
            hsp_recharge_reminder: false,
            hsp_small_group_mode: false,
        }
    }
}

fn guardrail(id: &str, title: &str, enabled: bool) -> GuardrailItem {
    GuardrailItem {
        id: id.to_string(),
        title: title.to_string(),
        enabled,
    }
}

/// A partial settings update. `None` fields keep their prior values.
///
/// Optional settings (display name, accountability contact) can be set but
/// not cleared through a patch; no transition needs to clear them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub display_name: Option<String>,
    pub accountability_name: Option<String>,
    pub accountability_phone: Option<String>,
    pub guardrails: Option<Vec<GuardrailItem>>,
    pub theme: Option<Theme>,
    pub last_weekly_review_week: Option<String>,
    pub screen_time_cap_minutes: Option<u32>,
    pub no_screens_in_bedroom: Option<bool>,
    pub no_screens_at_meals: Option<bool>,
    pub dock_reminder_time: Option<String>,
    pub hsp_quiet_mode: Option<bool>,
    pub hsp_recharge_reminder: Option<bool>,
    pub hsp_small_group_mode: Option<bool>,
}

impl UserSettings {
    /// Shallow-merge a patch into these settings.
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(v) = patch.display_name {
            self.display_name = Some(v);
        }
        if let Some(v) = patch.accountability_name {
            self.accountability_name = Some(v);
        }
        if let Some(v) = patch.accountability_phone {
            self.accountability_phone = Some(v);
        }
        if let Some(v) = patch.guardrails {
            self.guardrails = v;
        }
        if let Some(v) = patch.theme {
            self.theme = v;
        }
        if let Some(v) = patch.last_weekly_review_week {
            self.last_weekly_review_week = Some(v);
        }
        if let Some(v) = patch.screen_time_cap_minutes {
            self.screen_time_cap_minutes = v;
        }
        if let Some(v) = patch.no_screens_in_bedroom {
            self.no_screens_in_bedroom = v;
        }
        if let Some(v) = patch.no_screens_at_meals {
            self.no_screens_at_meals = v;
        }
        if let Some(v) = patch.dock_reminder_time {
            self.dock_reminder_time = v;
        }
        if let Some(v) = patch.hsp_quiet_mode {
            self.hsp_quiet_mode = v;
        }
        if let Some(v) = patch.hsp_recharge_reminder {
            self.hsp_recharge_reminder = v;
        }
        if let Some(v) = patch.hsp_small_group_mode {
            self.hsp_small_group_mode = v;
        }
    }
}
