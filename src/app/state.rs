//! Application State: zentrale Datenhaltung.

mod app_state;

pub use app_state::AppState;

use crate::core::ClickRejection;
use std::time::{Duration, Instant};

/// Verzögerung des "Tour complete!"-Hinweises nach dem letzten Klick.
pub const COMPLETION_NOTICE_DELAY: Duration = Duration::from_millis(100);

/// UI-bezogener Zustand
#[derive(Debug, Default)]
pub struct UiState {
    /// Temporäre Statusnachricht (z.B. "Tour incomplete!")
    pub status_message: Option<String>,
    /// Grund des zuletzt verworfenen Klicks
    pub last_rejection: Option<ClickRejection>,
    /// Zeitpunkt, ab dem "Tour complete!" angezeigt wird
    pub completion_notice_at: Option<Instant>,
}

impl UiState {
    /// Erstellt einen neuen UI-State.
    pub fn new() -> Self {
        Self::default()
    }

    /// Plant den Vollständigkeits-Hinweis.
    pub fn schedule_completion_notice(&mut self, now: Instant) {
        self.completion_notice_at = Some(now + COMPLETION_NOTICE_DELAY);
    }

    /// Ob der geplante Hinweis zum Zeitpunkt `now` fällig ist.
    pub fn completion_notice_due(&self, now: Instant) -> bool {
        self.completion_notice_at.is_some_and(|at| now >= at)
    }
}
