//! Output formatting for CLI display.

use jiff::Timestamp;

use crate::model::{AppState, LogEntry, Outcome, ResponseKind, UserSettings};

pub(super) fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Win => "win",
        Outcome::Slip => "slip",
        Outcome::Neutral => "neutral",
    }
}

pub(super) fn kind_label(kind: ResponseKind) -> &'static str {
    match kind {
        ResponseKind::Move => "move",
        ResponseKind::Pray => "pray",
        ResponseKind::Connect => "connect",
        ResponseKind::Journal => "journal",
        ResponseKind::Worship => "worship",
        ResponseKind::Practical => "practical",
    }
}

/// Whole days elapsed since the given ISO timestamp. `None` when the
/// timestamp does not parse — timestamps are opaque strings in the model,
/// so the display layer parses defensively.
pub(super) fn days_since(iso: &str, now: Timestamp) -> Option<i64> {
    let then: Timestamp = iso.parse().ok()?;
    Some((now.as_second() - then.as_second()).max(0) / 86_400)
}

/// The `status` summary: streaks and counts derived from state, never
/// stored.
pub(super) fn format_status(state: &AppState, today_key: &str, week_key: &str) -> String {
    let mut out = String::new();

    if let Some(name) = &state.settings.display_name {
        out.push_str(&format!("Hello, {name}.\n"));
    }

    let wins = count_outcome(state, Outcome::Win);
    let slips = count_outcome(state, Outcome::Slip);
    out.push_str(&format!(
        "Check-ins: {} ({wins} wins, {slips} slips)\n",
        state.logs.len()
    ));

    match state.last_slip_at_iso.as_deref() {
        None => out.push_str("No slips marked.\n"),
        Some(iso) => match days_since(iso, Timestamp::now()) {
            Some(days) => out.push_str(&format!("Days since last slip: {days}\n")),
            None => out.push_str(&format!("Last slip: {iso}\n")),
        },
    }

    let daily_done = state.daily.get(today_key).is_some_and(|e| e.completed);
    out.push_str(&format!(
        "Daily ritual today: {}\n",
        if daily_done { "done" } else { "not yet" }
    ));

    let reviewed = state.weekly_reviews.contains_key(week_key);
    out.push_str(&format!(
        "Weekly review ({week_key}): {}\n",
        if reviewed { "done" } else { "not yet" }
    ));

    let enabled = state.settings.guardrails.iter().filter(|g| g.enabled).count();
    out.push_str(&format!(
        "Guardrails: {enabled} of {} enabled",
        state.settings.guardrails.len()
    ));

    out
}

pub(super) fn format_log_entry(entry: &LogEntry) -> String {
    let mut halt = Vec::new();
    if entry.halt.hungry {
        halt.push("hungry");
    }
    if entry.halt.angry {
        halt.push("angry");
    }
    if entry.halt.lonely {
        halt.push("lonely");
    }
    if entry.halt.tired {
        halt.push("tired");
    }
    let halt = if halt.is_empty() {
        String::new()
    } else {
        format!("  [{}]", halt.join(", "))
    };

    let note = if entry.trigger_note.is_empty() {
        String::new()
    } else {
        format!("  \"{}\"", entry.trigger_note)
    };

    format!(
        "{}  [{}] urge {}/5  {}{halt}{note}",
        entry.created_at_iso,
        outcome_label(entry.outcome),
        entry.urge_strength.get(),
        entry.chosen_response.label,
    )
}

pub(super) fn format_settings(settings: &UserSettings) -> String {
    let mut out = String::new();

    let unset = "(unset)".to_string();
    out.push_str(&format!(
        "Display name: {}\n",
        settings.display_name.as_ref().unwrap_or(&unset)
    ));
    out.push_str(&format!(
        "Accountability: {} / {}\n",
        settings.accountability_name.as_ref().unwrap_or(&unset),
        settings.accountability_phone.as_ref().unwrap_or(&unset),
    ));
    out.push_str("Guardrails:\n");
    for g in &settings.guardrails {
        let mark = if g.enabled { "x" } else { " " };
        out.push_str(&format!("  [{mark}] {}  {}\n", g.id, g.title));
    }
    out.push_str(&format!(
        "Screen time cap: {} min\n",
        settings.screen_time_cap_minutes
    ));
    out.push_str(&format!(
        "No screens in bedroom: {}, at meals: {}\n",
        yes_no(settings.no_screens_in_bedroom),
        yes_no(settings.no_screens_at_meals),
    ));
    out.push_str(&format!("Dock reminder: {}\n", settings.dock_reminder_time));
    out.push_str(&format!(
        "HSP: quiet {}, recharge reminder {}, small group {}\n",
        on_off(settings.hsp_quiet_mode),
        on_off(settings.hsp_recharge_reminder),
        on_off(settings.hsp_small_group_mode),
    ));
    out.push_str(&format!(
        "Last weekly review: {}",
        settings
            .last_weekly_review_week
            .as_deref()
            .unwrap_or("(never)")
    ));

    out
}

fn count_outcome(state: &AppState, outcome: Outcome) -> usize {
    state.logs.iter().filter(|l| l.outcome == outcome).count()
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::{HaltFlags, ResponseAction, UrgeStrength, default_state};

    #[test]
    fn days_since_whole_days() {
        let now: Timestamp = "2025-01-11T00:00:00Z".parse().unwrap();
        assert_eq!(days_since("2025-01-01T00:00:00Z", now), Some(10));
        assert_eq!(days_since("2025-01-10T12:00:00Z", now), Some(0));
        assert_eq!(days_since("not a timestamp", now), None);
    }

    #[test]
    fn log_entry_line_includes_flags_and_note() {
        let entry = LogEntry {
            id: "a".into(),
            created_at_iso: "2025-01-15T12:00:00Z".into(),
            halt: HaltFlags {
                hungry: true,
                angry: false,
                lonely: false,
                tired: true,
            },
            urge_strength: UrgeStrength::new(4).unwrap(),
            trigger_note: "late night scrolling".into(),
            chosen_response: ResponseAction {
                id: "1".into(),
                label: "Walk outside for 10 mins".into(),
                kind: ResponseKind::Move,
            },
            outcome: Outcome::Win,
        };

        let line = format_log_entry(&entry);
        assert!(line.contains("[win] urge 4/5"));
        assert!(line.contains("Walk outside for 10 mins"));
        assert!(line.contains("[hungry, tired]"));
        assert!(line.contains("late night scrolling"));
    }

    #[test]
    fn status_reflects_fresh_install() {
        let state = default_state();
        let status = format_status(&state, "2025-01-15", "2025-W03");

        assert!(status.contains("Check-ins: 0 (0 wins, 0 slips)"));
        assert!(status.contains("No slips marked."));
        assert!(status.contains("Daily ritual today: not yet"));
        assert!(status.contains("Weekly review (2025-W03): not yet"));
        assert!(status.contains("Guardrails: 3 of 4 enabled"));
    }
}
