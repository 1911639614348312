use crate::app::session::ProblemSession;
use crate::app::CommandLog;
use crate::core::{Prompt, ScriptedPrompt, TourBuilder};
use crate::net::ApiRequest;
use crate::shared::AppOptions;
use std::collections::VecDeque;

use super::UiState;

/// Hauptzustand der Anwendung
pub struct AppState {
    /// Tour-Aufbau des aktuellen Problems
    pub tour: TourBuilder,
    /// Problemfolge und Sitzungszustand
    pub session: ProblemSession,
    /// UI-State
    pub ui: UiState,
    /// Laufzeit-Optionen (Regeln, Farben, Größen)
    pub options: AppOptions,
    /// Noch nicht gesendete API-Requests
    pub outbox: VecDeque<ApiRequest>,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Bestätigungs- und Hinweisdialoge des Hosts
    pub prompt: Box<dyn Prompt>,
    /// Signalisiert dem Host (eframe), die Anwendung kontrolliert zu beenden
    pub should_exit: bool,
}

impl AppState {
    /// Erstellt einen neuen, leeren App-State mit Standardoptionen.
    ///
    /// Ohne Host beantwortet der Prompt jede Rückfrage mit "Nein".
    pub fn new() -> Self {
        Self::with_options(AppOptions::default())
    }

    /// Erstellt einen App-State aus geladenen Optionen.
    pub fn with_options(options: AppOptions) -> Self {
        Self {
            tour: TourBuilder::new(options.tour_rules()),
            session: ProblemSession::new(options.tour_encoding, options.submit_failure_policy),
            ui: UiState::new(),
            options,
            outbox: VecDeque::new(),
            command_log: CommandLog::new(),
            prompt: Box::new(ScriptedPrompt::always(false)),
            should_exit: false,
        }
    }

    /// Ersetzt den Prompt (z.B. native Dialoge im Host).
    pub fn with_prompt(mut self, prompt: Box<dyn Prompt>) -> Self {
        self.prompt = prompt;
        self
    }

    /// Gibt die Anzahl der Städte zurück (für UI-Anzeige)
    pub fn city_count(&self) -> usize {
        self.tour.cities().len()
    }

    /// Ob Undo möglich ist.
    pub fn can_undo(&self) -> bool {
        self.tour.picked() > 0
    }

    /// Ob der Submit-Button aktiv sein soll.
    pub fn can_submit(&self) -> bool {
        self.tour.can_submit()
    }

    /// Ob ein Request gesendet, aber noch nicht beantwortet wurde.
    pub fn request_in_flight(&self) -> bool {
        use crate::app::session::SessionPhase;
        matches!(
            self.session.phase(),
            SessionPhase::Loading | SessionPhase::Submitting
        )
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
