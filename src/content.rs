//! Static content catalogs: response actions, verses, identity statements.
//!
//! External collaborators to the state core. The catalogs are ordered and
//! their ids are stable; the reducer never looks anything up here — chosen
//! response actions are embedded into log entries by value.

use crate::model::{ResponseAction, ResponseKind};

/// A verse shown during the daily ritual.
#[derive(Debug, Clone, Copy)]
pub struct Verse {
    pub id: &'static str,
    pub text: &'static str,
    pub reference: &'static str,
}

/// An identity statement shown during the daily ritual.
#[derive(Debug, Clone, Copy)]
pub struct IdentityStatement {
    pub id: &'static str,
    pub text: &'static str,
}

const RESPONSE_ACTIONS: &[(&str, &str, ResponseKind)] = &[
    ("1", "Walk outside for 10 mins", ResponseKind::Move),
    ("2", "Splash face with cold water", ResponseKind::Practical),
    ("3", "Text my ally", ResponseKind::Connect),
    ("4", "Pray Psalm 51", ResponseKind::Pray),
    ("5", "Do 20 push-ups", ResponseKind::Move),
    ("6", "Listen to worship music", ResponseKind::Worship),
    ("7", "Write in journal", ResponseKind::Journal),
    ("8", "Read Philippians 4:8", ResponseKind::Pray),
];

pub const VERSES: &[Verse] = &[
    Verse {
        id: "1",
        text: "Walk by the Spirit, and you will not gratify the desires of the flesh.",
        reference: "Galatians 5:16",
    },
    Verse {
        id: "2",
        text: "Submit yourselves to God. Resist the devil, and he will flee from you.",
        reference: "James 4:7",
    },
    Verse {
        id: "3",
        text: "No temptation has overtaken you except what is common to mankind.",
        reference: "1 Corinthians 10:13",
    },
    Verse {
        id: "4",
        text: "Create in me a pure heart, O God, and renew a steadfast spirit within me.",
        reference: "Psalm 51:10",
    },
    Verse {
        id: "5",
        text: "Flee from sexual immorality... your bodies are temples of the Holy Spirit.",
        reference: "1 Corinthians 6:18-19",
    },
    Verse {
        id: "6",
        text: "Therefore, there is now no condemnation for those who are in Christ Jesus.",
        reference: "Romans 8:1",
    },
    Verse {
        id: "7",
        text: "I can do all this through him who gives me strength.",
        reference: "Philippians 4:13",
    },
    Verse {
        id: "8",
        text: "Set your minds on things above, not on earthly things.",
        reference: "Colossians 3:2",
    },
    Verse {
        id: "9",
        text: "The Lord is faithful, and he will strengthen you and protect you from the evil one.",
        reference: "2 Thessalonians 3:3",
    },
    Verse {
        id: "10",
        text: "You, dear children, are from God... because the one who is in you is greater than the one who is in the world.",
        reference: "1 John 4:4",
    },
];

pub const IDENTITY_STATEMENTS: &[IdentityStatement] = &[
    IdentityStatement {
        id: "1",
        text: "I am a beloved child of God, not defined by my worst moment.",
    },
    IdentityStatement {
        id: "2",
        text: "I am a new creation; the old has gone, the new is here.",
    },
    IdentityStatement {
        id: "3",
        text: "I am not a slave to my urges; I have a way out.",
    },
    IdentityStatement {
        id: "4",
        text: "I am being renewed day by day, even when I cannot feel it.",
    },
    IdentityStatement {
        id: "5",
        text: "I am fully known and still fully loved.",
    },
    IdentityStatement {
        id: "6",
        text: "I am a temple of the Holy Spirit, worth protecting.",
    },
    IdentityStatement {
        id: "7",
        text: "I am free — and I fight from victory, not for it.",
    },
    IdentityStatement {
        id: "8",
        text: "I am walking in the light, one honest day at a time.",
    },
];

/// The full response-action catalog, in display order.
#[must_use]
pub fn response_actions() -> Vec<ResponseAction> {
    RESPONSE_ACTIONS
        .iter()
        .map(|&(id, label, kind)| ResponseAction {
            id: id.to_string(),
            label: label.to_string(),
            kind,
        })
        .collect()
}

/// Looks up one response action by catalog id, returning an owned copy
/// suitable for embedding into a log entry.
#[must_use]
pub fn response_action(id: &str) -> Option<ResponseAction> {
    RESPONSE_ACTIONS
        .iter()
        .find(|(candidate, _, _)| *candidate == id)
        .map(|&(id, label, kind)| ResponseAction {
            id: id.to_string(),
            label: label.to_string(),
            kind,
        })
}

/// Deterministic daily rotation: day 1 of the month shows the first verse
/// and statement, wrapping when the catalogs run out.
#[must_use]
pub fn daily_rotation(day_of_month: u8) -> (&'static Verse, &'static IdentityStatement) {
    let day = usize::from(day_of_month.max(1)) - 1;
    (
        &VERSES[day % VERSES.len()],
        &IDENTITY_STATEMENTS[day % IDENTITY_STATEMENTS.len()],
    )
}
