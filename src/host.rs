//! The state lifecycle host: owns the live state for the process lifetime.
//!
//! One `StateHost` per process, constructed in `main` and handed to the
//! presentation layer — never a global. Lifecycle: initialize from
//! `StateStore::load()`, apply dispatches, flush on teardown.
//!
//! Persistence is debounced: every dispatch schedules a write, and a burst
//! of dispatches inside the quiet period coalesces into a single write of
//! the final state. A dedicated writer thread owns the timer; a new
//! revision arriving before the timer fires supersedes the pending one and
//! restarts the quiet period.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::model::{AppState, Theme};
use crate::reducer::{Action, Stamper, reduce};
use crate::storage::StateStore;

/// Default quiet period between the last dispatch and the persistence
/// write.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Owns the live [`AppState`] and the debounced persistence pipeline.
pub struct StateHost {
    state: AppState,
    store: StateStore,
    stamper: Box<dyn Stamper>,
    writer: DebouncedWriter,
}

impl StateHost {
    /// Initializes the host from the store's load routine. Corrupt or
    /// missing blobs have already been replaced with the default state by
    /// the time this returns.
    #[must_use]
    pub fn new(store: StateStore, stamper: Box<dyn Stamper>, debounce: Duration) -> Self {
        let state = store.load().into_state();
        let writer = DebouncedWriter::spawn(store.clone(), debounce);
        Self {
            state,
            store,
            stamper,
            writer,
        }
    }

    /// Read-only snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Applies an action and schedules a debounced persistence write.
    ///
    /// `Reset` is intercepted here rather than reduced: it clears the
    /// durable slot and re-initializes from the load routine, which finds
    /// nothing and returns the default state.
    ///
    /// Known ordering gap, deliberately left in place: `MarkSlip` and
    /// `SaveSlipResponse` are independent dispatches correlated only by the
    /// consumer re-reading `last_slip_at_iso` at response-save time. If two
    /// slips are marked before a response is saved, the response records
    /// the later mark.
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Reset => {
                self.store.clear();
                self.state = self.store.load().into_state();
            }
            action => {
                self.state = reduce(&self.state, action, self.stamper.as_ref());
            }
        }
        self.writer.schedule(self.state.clone());
    }

    /// Resolves the effective display theme. Presentation-only: `System`
    /// is resolved from the terminal environment and never persisted.
    #[must_use]
    pub fn resolved_theme(&self) -> ResolvedTheme {
        match self.state.settings.theme {
            Theme::Light => ResolvedTheme::Light,
            Theme::Dark => ResolvedTheme::Dark,
            Theme::System => system_theme(),
        }
    }
}

/// The effective theme after resolving the `System` preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedTheme {
    Light,
    Dark,
}

/// Best-effort terminal background probe. `COLORFGBG` is `<fg>;<bg>`;
/// low background numbers mean a dark terminal. Dark when unknown.
fn system_theme() -> ResolvedTheme {
    let Ok(var) = std::env::var("COLORFGBG") else {
        return ResolvedTheme::Dark;
    };
    match var.rsplit(';').next().and_then(|bg| bg.parse::<u8>().ok()) {
        Some(bg) if bg >= 8 => ResolvedTheme::Light,
        _ => ResolvedTheme::Dark,
    }
}

/// The writer thread's half of the debounce: receives state revisions and
/// writes the latest one once a quiet period passes without a newer one.
///
/// Dropping the writer closes the channel; a still-pending revision is
/// flushed before the thread exits, so teardown never loses the final
/// state.
struct DebouncedWriter {
    tx: Option<mpsc::Sender<AppState>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl DebouncedWriter {
    fn spawn(store: StateStore, quiet: Duration) -> Self {
        let (tx, rx) = mpsc::channel::<AppState>();

        let handle = thread::spawn(move || {
            // Outer recv blocks until some revision arrives; the inner loop
            // then absorbs newer revisions until the channel stays quiet.
            while let Ok(mut latest) = rx.recv() {
                loop {
                    match rx.recv_timeout(quiet) {
                        Ok(newer) => latest = newer,
                        Err(RecvTimeoutError::Timeout) => {
                            debug!("quiet period elapsed, persisting state");
                            store.save(&latest);
                            break;
                        }
                        Err(RecvTimeoutError::Disconnected) => {
                            debug!("host torn down, flushing pending state");
                            store.save(&latest);
                            return;
                        }
                    }
                }
            }
        });

        Self {
            tx: Some(tx),
            handle: Some(handle),
        }
    }

    fn schedule(&self, state: AppState) {
        if let Some(tx) = &self.tx {
            // The writer thread only exits once the channel closes, so a
            // send can only fail after Drop has begun.
            let _ = tx.send(state);
        }
    }
}

impl Drop for DebouncedWriter {
    fn drop(&mut self) {
        // Close the channel first so the thread sees the disconnect and
        // flushes, then wait for it.
        drop(self.tx.take());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
