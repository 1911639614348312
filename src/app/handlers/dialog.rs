//! Handler für Hinweise und Anwendungssteuerung.

use crate::app::AppState;
use crate::core::TourVariant;

/// Hinweis nach dem letzten Klick einer Tour.
pub const TOUR_COMPLETE: &str = "Tour complete!";
/// Hinweis bei Einreichung einer unvollständigen Tour.
pub const TOUR_INCOMPLETE: &str = "Tour incomplete!";
/// Hinweis bei Ende der Problemfolge.
pub const NO_MORE_PROBLEMS: &str = "No more problems!";
/// Rückfrage beim Schließen mit offenen Problemen.
pub const LEAVE_PROMPT: &str = "There are problems left. Leave anyway?";

/// Zeigt den verzögerten Vollständigkeits-Hinweis, falls die Tour noch vollständig ist.
pub fn show_completion_notice(state: &mut AppState) {
    state.ui.completion_notice_at = None;
    if state.tour.is_complete() {
        state.prompt.notify(TOUR_COMPLETE);
    }
}

/// Schließt die Anwendung; die Colored-Variante fragt vorher nach, solange Probleme offen sind.
pub fn guarded_close(state: &mut AppState) {
    let guarded = state.options.variant == TourVariant::Colored && !state.session.may_discard();
    if !guarded || state.prompt.confirm(LEAVE_PROMPT) {
        state.should_exit = true;
    } else {
        log::debug!("Schließen abgebrochen");
    }
}
