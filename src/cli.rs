//! CLI interface for Pureheart.
//!
//! The presentation layer: each subcommand reads the current state and
//! dispatches actions against the host. Nothing here touches storage or
//! mutates state directly — the host and reducer are the only path.

mod format;

use clap::{Parser, Subcommand, ValueEnum};
use jiff::{Timestamp, Zoned};

use crate::content;
use crate::host::{ResolvedTheme, StateHost};
use crate::model::{
    DailyEntry, HaltFlags, NewLogEntry, NewSlipResponse, Outcome, SettingsPatch, Theme,
    UrgeStrength, WeeklyReview,
};
use crate::reducer::Action;

use format::{format_log_entry, format_settings, format_status, kind_label, outcome_label};

/// Pureheart — a private recovery tracker. All data stays on this machine.
#[derive(Debug, Parser)]
#[command(name = "pureheart")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Where things stand: counts, streaks, today's ritual.
    Status,

    /// Complete today's ritual with the day's verse and identity statement.
    ///
    /// Completing it again on the same day replaces the earlier entry.
    Daily {
        /// Free-form notes from the time spent.
        #[arg(long)]
        notes: Option<String>,
    },

    /// Record check-ins or list recent ones.
    Log {
        #[command(subcommand)]
        command: LogCommand,
    },

    /// The two-step slip flow: mark the moment now, respond when ready.
    Slip {
        #[command(subcommand)]
        command: SlipCommand,
    },

    /// Save this week's review.
    Review {
        /// A win worth remembering. Repeat for several.
        #[arg(long = "win")]
        wins: Vec<String>,

        /// Trigger patterns noticed this week.
        #[arg(long, default_value = "")]
        triggers: String,

        #[arg(long, default_value = "")]
        gratitude: String,

        /// What next week is about.
        #[arg(long, default_value = "")]
        focus: String,

        /// Confirm the guardrails were looked over.
        #[arg(long)]
        guardrails_reviewed: bool,
    },

    /// Show or change settings.
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },

    /// List the response-action catalog.
    Actions,

    /// Wipe all local data and start over from defaults.
    Reset {
        /// Skip the confirmation.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum LogCommand {
    /// Record a check-in.
    Add {
        /// Urge intensity, 1 to 5.
        #[arg(long)]
        urge: u8,

        #[arg(long)]
        hungry: bool,

        #[arg(long)]
        angry: bool,

        #[arg(long)]
        lonely: bool,

        #[arg(long)]
        tired: bool,

        /// What triggered the urge.
        #[arg(long, default_value = "")]
        note: String,

        /// Catalog id of the response taken (see `pureheart actions`).
        #[arg(long)]
        response: String,

        /// How it ended.
        #[arg(long, value_enum)]
        outcome: OutcomeArg,
    },

    /// Show recent check-ins, newest first.
    List {
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
}

#[derive(Debug, Subcommand)]
pub enum SlipCommand {
    /// Mark that a slip just happened. Nothing else is recorded yet.
    Mark,

    /// Work through the recovery response for the last marked slip.
    Respond {
        #[arg(long, default_value = "")]
        confession: String,

        /// Accept grace instead of spiraling.
        #[arg(long)]
        grace: bool,

        #[arg(long, default_value = "")]
        lesson: String,

        /// One concrete repair commitment.
        #[arg(long, default_value = "")]
        repair: String,

        /// The accountability partner has been contacted.
        #[arg(long)]
        contacted: bool,

        #[arg(long)]
        prayer: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Show all settings.
    Show,

    /// Change one or more settings. Omitted options keep their values.
    Set {
        #[arg(long)]
        display_name: Option<String>,

        #[arg(long)]
        accountability_name: Option<String>,

        #[arg(long)]
        accountability_phone: Option<String>,

        #[arg(long, value_enum)]
        theme: Option<ThemeArg>,

        /// Daily screen-time cap in minutes.
        #[arg(long)]
        screen_time_cap: Option<u32>,

        #[arg(long)]
        no_screens_in_bedroom: Option<bool>,

        #[arg(long)]
        no_screens_at_meals: Option<bool>,

        /// When to dock the phone for the night, `HH:MM`.
        #[arg(long)]
        dock_reminder: Option<String>,

        #[arg(long)]
        hsp_quiet_mode: Option<bool>,

        #[arg(long)]
        hsp_recharge_reminder: Option<bool>,

        #[arg(long)]
        hsp_small_group_mode: Option<bool>,
    },

    /// Toggle one guardrail by id.
    Guardrail { id: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    System,
    Light,
    Dark,
}

impl ThemeArg {
    fn to_domain(self) -> Theme {
        match self {
            Self::System => Theme::System,
            Self::Light => Theme::Light,
            Self::Dark => Theme::Dark,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutcomeArg {
    Win,
    Slip,
    Neutral,
}

impl OutcomeArg {
    fn to_domain(self) -> Outcome {
        match self {
            Self::Win => Outcome::Win,
            Self::Slip => Outcome::Slip,
            Self::Neutral => Outcome::Neutral,
        }
    }
}

/// Executes one parsed command against the host.
pub fn run(cli: Cli, host: &mut StateHost) -> Result<(), String> {
    match cli.command {
        Command::Status => cmd_status(host),
        Command::Daily { notes } => cmd_daily(host, notes),
        Command::Log { command } => match command {
            LogCommand::Add {
                urge,
                hungry,
                angry,
                lonely,
                tired,
                note,
                response,
                outcome,
            } => cmd_log_add(
                host,
                urge,
                HaltFlags {
                    hungry,
                    angry,
                    lonely,
                    tired,
                },
                note,
                &response,
                outcome.to_domain(),
            ),
            LogCommand::List { limit } => cmd_log_list(host, limit),
        },
        Command::Slip { command } => match command {
            SlipCommand::Mark => cmd_slip_mark(host),
            SlipCommand::Respond {
                confession,
                grace,
                lesson,
                repair,
                contacted,
                prayer,
            } => cmd_slip_respond(host, confession, grace, lesson, repair, contacted, prayer),
        },
        Command::Review {
            wins,
            triggers,
            gratitude,
            focus,
            guardrails_reviewed,
        } => cmd_review(host, wins, triggers, gratitude, focus, guardrails_reviewed),
        Command::Settings { command } => match command {
            SettingsCommand::Show => cmd_settings_show(host),
            SettingsCommand::Set {
                display_name,
                accountability_name,
                accountability_phone,
                theme,
                screen_time_cap,
                no_screens_in_bedroom,
                no_screens_at_meals,
                dock_reminder,
                hsp_quiet_mode,
                hsp_recharge_reminder,
                hsp_small_group_mode,
            } => cmd_settings_set(
                host,
                SettingsPatch {
                    display_name,
                    accountability_name,
                    accountability_phone,
                    theme: theme.map(ThemeArg::to_domain),
                    screen_time_cap_minutes: screen_time_cap,
                    no_screens_in_bedroom,
                    no_screens_at_meals,
                    dock_reminder_time: dock_reminder,
                    hsp_quiet_mode,
                    hsp_recharge_reminder,
                    hsp_small_group_mode,
                    ..SettingsPatch::default()
                },
            ),
            SettingsCommand::Guardrail { id } => cmd_guardrail_toggle(host, &id),
        },
        Command::Actions => cmd_actions(),
        Command::Reset { yes } => cmd_reset(host, yes),
    }
}

fn cmd_status(host: &StateHost) -> Result<(), String> {
    println!(
        "{}",
        format_status(host.state(), &today_key(), &current_week_key())
    );
    Ok(())
}

fn cmd_daily(host: &mut StateHost, notes: Option<String>) -> Result<(), String> {
    let today = Zoned::now().date();
    let (verse, identity) = content::daily_rotation(u8::try_from(today.day()).unwrap_or(1));

    host.dispatch(Action::CompleteDaily(DailyEntry {
        date_iso: today.to_string(),
        completed: true,
        notes,
        verse_id: verse.id.to_string(),
        identity_id: identity.id.to_string(),
    }));

    println!("{} — {}", verse.text, verse.reference);
    println!("{}", identity.text);
    println!("Daily ritual recorded for {today}.");
    Ok(())
}

fn cmd_log_add(
    host: &mut StateHost,
    urge: u8,
    halt: HaltFlags,
    note: String,
    response_id: &str,
    outcome: Outcome,
) -> Result<(), String> {
    let urge_strength = UrgeStrength::new(urge).map_err(|e| e.to_string())?;
    let chosen_response = content::response_action(response_id).ok_or_else(|| {
        format!("unknown response action id '{response_id}' — run `pureheart actions` to list them")
    })?;

    host.dispatch(Action::AddLogEntry(NewLogEntry {
        halt,
        urge_strength,
        trigger_note: note,
        chosen_response,
        outcome,
    }));

    println!("Check-in recorded ({}).", outcome_label(outcome));
    Ok(())
}

fn cmd_log_list(host: &StateHost, limit: usize) -> Result<(), String> {
    let logs = &host.state().logs;
    if logs.is_empty() {
        println!("No check-ins yet.");
        return Ok(());
    }
    for entry in logs.iter().take(limit) {
        println!("{}", format_log_entry(entry));
    }
    Ok(())
}

fn cmd_slip_mark(host: &mut StateHost) -> Result<(), String> {
    host.dispatch(Action::MarkSlip {
        timestamp_iso: Timestamp::now().to_string(),
    });

    println!("Slip marked. No shame — respond when you're ready:");
    println!("  pureheart slip respond --confession \"...\" --grace");
    Ok(())
}

fn cmd_slip_respond(
    host: &mut StateHost,
    confession: String,
    grace: bool,
    lesson: String,
    repair: String,
    contacted: bool,
    prayer: Option<String>,
) -> Result<(), String> {
    // Correlated with the slip only through the marker read here; if two
    // slips were marked since the last response, this records the later one.
    let slip_timestamp_iso = host
        .state()
        .last_slip_at_iso
        .clone()
        .unwrap_or_else(|| Timestamp::now().to_string());

    host.dispatch(Action::SaveSlipResponse(NewSlipResponse {
        slip_timestamp_iso,
        confession_note: confession,
        grace_received: grace,
        lesson_learned: lesson,
        repair_action: repair,
        accountability_contacted: contacted,
        prayer_note: prayer,
    }));

    println!("Response recorded. Tomorrow is a new day.");
    Ok(())
}

fn cmd_review(
    host: &mut StateHost,
    wins: Vec<String>,
    triggers: String,
    gratitude: String,
    focus: String,
    guardrails_reviewed: bool,
) -> Result<(), String> {
    let week_iso = current_week_key();

    host.dispatch(Action::SaveReview(WeeklyReview {
        week_iso: week_iso.clone(),
        completed_at_iso: Timestamp::now().to_string(),
        wins,
        trigger_patterns: triggers,
        gratitude,
        next_week_focus: focus,
        guardrails_reviewed,
    }));

    println!("Review saved for {week_iso}.");
    Ok(())
}

fn cmd_settings_show(host: &StateHost) -> Result<(), String> {
    println!("{}", format_settings(&host.state().settings));
    let resolved = match host.resolved_theme() {
        ResolvedTheme::Light => "light",
        ResolvedTheme::Dark => "dark",
    };
    println!("Theme resolves to: {resolved}");
    Ok(())
}

fn cmd_settings_set(host: &mut StateHost, patch: SettingsPatch) -> Result<(), String> {
    if patch == SettingsPatch::default() {
        return Err("nothing to change — pass at least one option".to_string());
    }
    host.dispatch(Action::UpdateSettings(patch));
    println!("Settings updated.");
    Ok(())
}

fn cmd_guardrail_toggle(host: &mut StateHost, id: &str) -> Result<(), String> {
    let mut guardrails = host.state().settings.guardrails.clone();
    let Some(target) = guardrails.iter_mut().find(|g| g.id == id) else {
        let known: Vec<&str> = host
            .state()
            .settings
            .guardrails
            .iter()
            .map(|g| g.id.as_str())
            .collect();
        return Err(format!(
            "no guardrail with id '{id}' — known ids: {}",
            known.join(", ")
        ));
    };
    target.enabled = !target.enabled;
    let (title, enabled) = (target.title.clone(), target.enabled);

    host.dispatch(Action::UpdateSettings(SettingsPatch {
        guardrails: Some(guardrails),
        ..SettingsPatch::default()
    }));

    println!(
        "Guardrail '{title}' {}.",
        if enabled { "enabled" } else { "disabled" }
    );
    Ok(())
}

fn cmd_actions() -> Result<(), String> {
    for action in content::response_actions() {
        println!("{}  [{}]  {}", action.id, kind_label(action.kind), action.label);
    }
    Ok(())
}

fn cmd_reset(host: &mut StateHost, yes: bool) -> Result<(), String> {
    if !yes {
        return Err("this wipes all local data — pass --yes to confirm".to_string());
    }
    host.dispatch(Action::Reset);
    println!("All local data cleared. Starting fresh.");
    Ok(())
}

/// Today's date key, `YYYY-MM-DD`.
fn today_key() -> String {
    Zoned::now().date().to_string()
}

/// This week's key, `YYYY-Www` (ISO week date).
fn current_week_key() -> String {
    let week = Zoned::now().date().iso_week_date();
    format!("{}-W{:02}", week.year(), week.week())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_check_in() {
        let cli = Cli::try_parse_from([
            "pureheart", "log", "add", "--urge", "3", "--hungry", "--tired", "--note",
            "long day", "--response", "1", "--outcome", "win",
        ])
        .unwrap();

        match cli.command {
            Command::Log {
                command:
                    LogCommand::Add {
                        urge,
                        hungry,
                        angry,
                        tired,
                        ref note,
                        ref response,
                        ..
                    },
            } => {
                assert_eq!(urge, 3);
                assert!(hungry);
                assert!(!angry);
                assert!(tired);
                assert_eq!(note, "long day");
                assert_eq!(response, "1");
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn review_collects_repeated_wins() {
        let cli = Cli::try_parse_from([
            "pureheart",
            "review",
            "--win",
            "slept well",
            "--win",
            "ran twice",
            "--gratitude",
            "good week",
        ])
        .unwrap();

        match cli.command {
            Command::Review { wins, gratitude, .. } => {
                assert_eq!(wins, vec!["slept well".to_string(), "ran twice".to_string()]);
                assert_eq!(gratitude, "good week");
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn week_key_shape() {
        let key = current_week_key();
        assert!(key.contains("-W"));
        let (_, week) = key.split_once("-W").unwrap();
        assert_eq!(week.len(), 2);
    }
}
