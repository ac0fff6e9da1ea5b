//! The reducer: the sole mutation path for application state.
//!
//! `reduce` is a pure function from (state, action) to the next state. It
//! performs no I/O; its only external inputs — the current time and a
//! fresh unique id, needed when appending immutable records — come in
//! through the [`Stamper`] trait so tests can inject fixed values.

use jiff::Timestamp;
use uuid::Uuid;

use crate::model::{
    AppState, DailyEntry, LogEntry, NewLogEntry, NewSlipResponse, SettingsPatch, SlipResponse,
    WeeklyReview,
};

/// Every transition the state can undergo. Closed set, dispatched
/// internally; payload shape is the dispatcher's responsibility.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Shallow-merge the given fields into settings.
    UpdateSettings(SettingsPatch),

    /// Upsert the day's ritual entry; a second completion on the same
    /// date replaces the first.
    CompleteDaily(DailyEntry),

    /// Stamp and prepend a check-in to the log.
    AddLogEntry(NewLogEntry),

    /// Record when the most recent slip happened. Touches nothing else;
    /// the recovery response is a separate, later dispatch.
    MarkSlip { timestamp_iso: String },

    /// Upsert the week's review and advance the last-reviewed-week marker.
    SaveReview(WeeklyReview),

    /// Stamp and prepend a slip response.
    SaveSlipResponse(NewSlipResponse),

    /// Wipe the durable store and start over from the default state.
    /// Handled by the lifecycle host; an identity transition here.
    Reset,
}

/// The reducer's two external inputs: wall-clock time and id generation.
pub trait Stamper {
    /// The current instant as an ISO-8601 string.
    fn now_iso(&self) -> String;

    /// A fresh unique id.
    fn new_id(&self) -> String;
}

/// Production stamper: system clock and UUID v4.
pub struct SystemStamper;

impl Stamper for SystemStamper {
    fn now_iso(&self) -> String {
        Timestamp::now().to_string()
    }

    fn new_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Computes the next state. Pure: the input state is never modified, and
/// the same (state, action, stamps) always yields the same output.
#[must_use]
pub fn reduce(state: &AppState, action: Action, stamper: &dyn Stamper) -> AppState {
    let mut next = state.clone();

    match action {
        Action::UpdateSettings(patch) => {
            next.settings.apply(patch);
        }

        Action::CompleteDaily(entry) => {
            next.daily.insert(entry.date_iso.clone(), entry);
        }

        Action::AddLogEntry(new) => {
            let entry = LogEntry {
                id: stamper.new_id(),
                created_at_iso: stamper.now_iso(),
                halt: new.halt,
                urge_strength: new.urge_strength,
                trigger_note: new.trigger_note,
                chosen_response: new.chosen_response,
                outcome: new.outcome,
            };
            next.logs.insert(0, entry);
        }

        Action::MarkSlip { timestamp_iso } => {
            next.last_slip_at_iso = Some(timestamp_iso);
        }

        Action::SaveReview(mut review) => {
            review.wins.retain(|w| !w.trim().is_empty());
            next.settings.last_weekly_review_week = Some(review.week_iso.clone());
            next.weekly_reviews.insert(review.week_iso.clone(), review);
        }

        Action::SaveSlipResponse(new) => {
            let response = SlipResponse {
                id: stamper.new_id(),
                slip_timestamp_iso: new.slip_timestamp_iso,
                confession_note: new.confession_note,
                grace_received: new.grace_received,
                lesson_learned: new.lesson_learned,
                repair_action: new.repair_action,
                accountability_contacted: new.accountability_contacted,
                prayer_note: new.prayer_note,
            };
            next.slip_responses.insert(0, response);
        }

        Action::Reset => {}
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;

    use crate::model::{
        HaltFlags, Outcome, ResponseAction, ResponseKind, Theme, UrgeStrength, default_state,
    };

    /// Deterministic stamper: a fixed timestamp, sequential ids.
    struct FixedStamper {
        next_id: Cell<u32>,
    }

    impl FixedStamper {
        fn new() -> Self {
            Self {
                next_id: Cell::new(1),
            }
        }
    }

    impl Stamper for FixedStamper {
        fn now_iso(&self) -> String {
            "2025-01-15T12:00:00Z".to_string()
        }

        fn new_id(&self) -> String {
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            format!("id-{id}")
        }
    }

    fn new_log(urge: u8, outcome: Outcome) -> NewLogEntry {
        NewLogEntry {
            halt: HaltFlags::default(),
            urge_strength: UrgeStrength::new(urge).unwrap(),
            trigger_note: "test".into(),
            chosen_response: ResponseAction {
                id: "1".into(),
                label: "Walk outside for 10 mins".into(),
                kind: ResponseKind::Move,
            },
            outcome,
        }
    }

    fn review(week: &str, wins: &[&str]) -> WeeklyReview {
        WeeklyReview {
            week_iso: week.into(),
            completed_at_iso: "2025-01-15T12:00:00Z".into(),
            wins: wins.iter().map(|w| (*w).to_string()).collect(),
            trigger_patterns: "late nights".into(),
            gratitude: "good week".into(),
            next_week_focus: "sleep".into(),
            guardrails_reviewed: true,
        }
    }

    #[test]
    fn update_settings_merges_only_given_fields() {
        let stamper = FixedStamper::new();
        let state = default_state();

        let next = reduce(
            &state,
            Action::UpdateSettings(SettingsPatch {
                theme: Some(Theme::Dark),
                ..SettingsPatch::default()
            }),
            &stamper,
        );

        assert_eq!(next.settings.theme, Theme::Dark);
        assert_eq!(next.settings.guardrails, state.settings.guardrails);
        assert_eq!(next.settings.display_name, state.settings.display_name);
        // Untouched parts of the tree are preserved.
        assert_eq!(next.logs, state.logs);
        assert_eq!(next.daily, state.daily);
    }

    #[test]
    fn reduce_does_not_mutate_its_input() {
        let stamper = FixedStamper::new();
        let state = default_state();
        let snapshot = state.clone();

        let _ = reduce(&state, Action::AddLogEntry(new_log(3, Outcome::Win)), &stamper);

        assert_eq!(state, snapshot);
    }

    #[test]
    fn complete_daily_upserts_by_date() {
        let stamper = FixedStamper::new();
        let state = default_state();

        let first = DailyEntry {
            date_iso: "2025-01-15".into(),
            completed: true,
            notes: Some("first".into()),
            verse_id: "1".into(),
            identity_id: "1".into(),
        };
        let second = DailyEntry {
            notes: Some("second".into()),
            verse_id: "2".into(),
            ..first.clone()
        };

        let state = reduce(&state, Action::CompleteDaily(first), &stamper);
        let state = reduce(&state, Action::CompleteDaily(second.clone()), &stamper);

        assert_eq!(state.daily.len(), 1);
        assert_eq!(state.daily["2025-01-15"], second);
    }

    #[test]
    fn add_log_entry_stamps_and_prepends() {
        let stamper = FixedStamper::new();
        let state = default_state();

        let state = reduce(&state, Action::AddLogEntry(new_log(3, Outcome::Win)), &stamper);
        let state = reduce(&state, Action::AddLogEntry(new_log(5, Outcome::Slip)), &stamper);
        let state = reduce(
            &state,
            Action::AddLogEntry(new_log(1, Outcome::Neutral)),
            &stamper,
        );

        // Newest first, length equals the number of dispatches.
        assert_eq!(state.logs.len(), 3);
        assert_eq!(state.logs[0].outcome, Outcome::Neutral);
        assert_eq!(state.logs[1].outcome, Outcome::Slip);
        assert_eq!(state.logs[2].outcome, Outcome::Win);

        // Ids are unique, timestamps stamped from the injected clock.
        assert_eq!(state.logs[2].id, "id-1");
        assert_eq!(state.logs[0].id, "id-3");
        assert!(state.logs.iter().all(|l| l.created_at_iso == "2025-01-15T12:00:00Z"));
    }

    #[test]
    fn win_log_scenario() {
        let stamper = FixedStamper::new();
        let state = reduce(
            &default_state(),
            Action::AddLogEntry(new_log(3, Outcome::Win)),
            &stamper,
        );

        assert_eq!(state.logs.len(), 1);
        assert_eq!(state.logs[0].outcome, Outcome::Win);
        assert!(!state.logs[0].id.is_empty());
        assert_eq!(state.logs[0].trigger_note, "test");
        assert_eq!(state.logs[0].chosen_response.id, "1");
    }

    #[test]
    fn mark_slip_sets_only_the_marker() {
        let stamper = FixedStamper::new();
        let state = default_state();

        let next = reduce(
            &state,
            Action::MarkSlip {
                timestamp_iso: "2025-01-01T00:00:00Z".into(),
            },
            &stamper,
        );

        assert_eq!(next.last_slip_at_iso.as_deref(), Some("2025-01-01T00:00:00Z"));
        assert_eq!(next.logs, state.logs);
        assert_eq!(next.slip_responses, state.slip_responses);
    }

    #[test]
    fn slip_then_response_scenario() {
        let stamper = FixedStamper::new();
        let state = reduce(
            &default_state(),
            Action::MarkSlip {
                timestamp_iso: "2025-01-01T00:00:00Z".into(),
            },
            &stamper,
        );

        // The consumer reads last_slip_at_iso back at save time.
        let slip_at = state.last_slip_at_iso.clone().unwrap();
        let state = reduce(
            &state,
            Action::SaveSlipResponse(NewSlipResponse {
                slip_timestamp_iso: slip_at,
                confession_note: "told the truth".into(),
                grace_received: true,
                lesson_learned: "late browsing".into(),
                repair_action: "call tomorrow".into(),
                accountability_contacted: true,
                prayer_note: None,
            }),
            &stamper,
        );

        assert_eq!(state.last_slip_at_iso.as_deref(), Some("2025-01-01T00:00:00Z"));
        assert_eq!(state.slip_responses.len(), 1);
        assert!(state.slip_responses[0].grace_received);
        assert_eq!(
            state.slip_responses[0].slip_timestamp_iso,
            "2025-01-01T00:00:00Z"
        );
        assert!(!state.slip_responses[0].id.is_empty());
    }

    #[test]
    fn slip_responses_are_prepended() {
        let stamper = FixedStamper::new();
        let response = |note: &str| {
            Action::SaveSlipResponse(NewSlipResponse {
                slip_timestamp_iso: "2025-01-01T00:00:00Z".into(),
                confession_note: note.into(),
                grace_received: false,
                lesson_learned: String::new(),
                repair_action: String::new(),
                accountability_contacted: false,
                prayer_note: None,
            })
        };

        let state = reduce(&default_state(), response("first"), &stamper);
        let state = reduce(&state, response("second"), &stamper);

        assert_eq!(state.slip_responses.len(), 2);
        assert_eq!(state.slip_responses[0].confession_note, "second");
        assert_eq!(state.slip_responses[1].confession_note, "first");
        assert_ne!(state.slip_responses[0].id, state.slip_responses[1].id);
    }

    #[test]
    fn save_review_upserts_by_week_and_marks_settings() {
        let stamper = FixedStamper::new();

        let state = reduce(
            &default_state(),
            Action::SaveReview(review("2025-W03", &["slept well"])),
            &stamper,
        );
        let state = reduce(
            &state,
            Action::SaveReview(review("2025-W03", &["slept well", "ran twice"])),
            &stamper,
        );

        assert_eq!(state.weekly_reviews.len(), 1);
        assert_eq!(state.weekly_reviews["2025-W03"].wins.len(), 2);
        assert_eq!(
            state.settings.last_weekly_review_week.as_deref(),
            Some("2025-W03")
        );
    }

    #[test]
    fn save_review_filters_empty_wins() {
        let stamper = FixedStamper::new();

        let state = reduce(
            &default_state(),
            Action::SaveReview(review("2025-W03", &["slept well", "", "  ", "ran twice"])),
            &stamper,
        );

        assert_eq!(
            state.weekly_reviews["2025-W03"].wins,
            vec!["slept well".to_string(), "ran twice".to_string()]
        );
    }

    #[test]
    fn reset_is_identity_at_the_reducer() {
        let stamper = FixedStamper::new();
        let state = reduce(
            &default_state(),
            Action::AddLogEntry(new_log(2, Outcome::Win)),
            &stamper,
        );

        // The host intercepts Reset; through the pure reducer it is a no-op.
        let next = reduce(&state, Action::Reset, &stamper);
        assert_eq!(next, state);
    }
}
