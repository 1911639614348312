//! Handler für Laden und Einreichen der Probleme.

use super::dialog::{NO_MORE_PROBLEMS, TOUR_INCOMPLETE};
use crate::app::session::SessionError;
use crate::app::AppState;
use crate::net::{HttpResponse, TransportError};

/// Startet die Sitzung und stellt den ersten Fetch in die Outbox.
pub fn start(state: &mut AppState) {
    match state.session.start() {
        Ok(request) => state.outbox.push_back(request),
        Err(e) => log::warn!("Sitzung nicht gestartet: {}", e),
    }
}

/// Reicht die Tour ein oder meldet, warum das nicht geht.
pub fn submit(state: &mut AppState) {
    match state.session.submit_tour(&mut state.tour) {
        Ok(request) => {
            state.ui.completion_notice_at = None;
            state.ui.status_message = None;
            state.outbox.push_back(request);
        }
        Err(SessionError::IncompleteTour { picked, required }) => {
            log::debug!("Einreichung abgelehnt: {} von {} Städten", picked, required);
            state.ui.status_message = Some(TOUR_INCOMPLETE.to_string());
            state.prompt.notify(TOUR_INCOMPLETE);
        }
        Err(e @ SessionError::InvalidProblem { .. }) => {
            log::warn!("Einreichung abgelehnt: {}", e);
            state.ui.status_message = Some(e.to_string());
        }
        Err(e) => log::debug!("Einreichung nicht möglich: {}", e),
    }
}

/// Übernimmt eine Problem-Antwort in den Tour-Builder.
pub fn apply_problem_response(
    state: &mut AppState,
    result: Result<HttpResponse, TransportError>,
) {
    match state.session.on_problem_response(result, &mut state.tour) {
        Ok(()) => state.ui.status_message = None,
        Err(SessionError::ProblemsExhausted) => {
            state.ui.status_message = Some(NO_MORE_PROBLEMS.to_string());
            state.prompt.notify(NO_MORE_PROBLEMS);
        }
        Err(e @ SessionError::InvalidProblem { .. }) => {
            log::warn!("Problem {}: {}", state.session.display_number(), e);
            state.ui.status_message = Some(e.to_string());
        }
        Err(e) => log::warn!("Problem-Antwort ignoriert: {}", e),
    }
    state.ui.completion_notice_at = None;
    state.session.sync_tour(&state.tour);
}

/// Verarbeitet eine Submit-Antwort und stellt den nächsten Fetch in die Outbox.
pub fn apply_submit_response(
    state: &mut AppState,
    result: Result<HttpResponse, TransportError>,
) {
    match state.session.on_submit_response(result) {
        Ok(request) => state.outbox.push_back(request),
        Err(e) => log::warn!("Submit-Antwort ignoriert: {}", e),
    }
}
