//! Handler für Klicks, Undo und Verwerfen der Tour.

use crate::app::AppState;
use crate::core::{CanvasMapping, TourVariant};
use glam::Vec2;
use std::time::Instant;

/// Wählt die nächste Stadt zum Klickpunkt.
pub fn pick_city(state: &mut AppState, physical: Vec2, canvas: CanvasMapping) {
    let outcome = state
        .tour
        .handle_click(physical, &canvas, state.prompt.as_mut());
    state.ui.last_rejection = outcome.rejection;

    if let Some(rejection) = outcome.rejection {
        log::debug!("Klick bei {:?} verworfen: {:?}", physical, rejection);
    } else {
        state.ui.status_message = None;
    }

    if outcome.completed {
        log::info!(
            "Tour vollständig ({} Städte, Länge {:.1})",
            state.tour.picked(),
            state.tour.tour_length()
        );
        state.ui.schedule_completion_notice(Instant::now());
    }

    state.session.sync_tour(&state.tour);
}

/// Entfernt den letzten Tour-Schritt.
pub fn undo(state: &mut AppState) {
    if state.tour.undo() {
        state.ui.completion_notice_at = None;
        log::debug!("Undo: {} Städte übrig", state.tour.picked());
    }
    state.session.sync_tour(&state.tour);
}

/// Verwirft die Tour. Nur die Colored-Variante fragt nach; eine leere Tour nie.
pub fn clear(state: &mut AppState) {
    if state.tour.picked() == 0 {
        return;
    }
    let cleared = match state.tour.rules().variant {
        TourVariant::Colored => state.tour.reset(state.prompt.as_mut()),
        TourVariant::Classic => {
            state.tour.restart();
            true
        }
    };
    if cleared {
        state.ui.completion_notice_at = None;
        log::info!("Tour verworfen");
    }
    state.session.sync_tour(&state.tour);
}
