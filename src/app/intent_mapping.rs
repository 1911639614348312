//! Mapping von UI-Intents auf mutierende App-Commands.

use super::{AppCommand, AppIntent, AppState};

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    match intent {
        AppIntent::SessionStartRequested => vec![AppCommand::StartSession],
        AppIntent::CanvasClicked { physical, canvas } => {
            vec![AppCommand::PickCity { physical, canvas }]
        }
        AppIntent::UndoRequested => {
            if state.can_undo() {
                vec![AppCommand::UndoLastStep]
            } else {
                vec![]
            }
        }
        AppIntent::ClearRequested => vec![AppCommand::ClearTour],
        AppIntent::SubmitRequested => vec![AppCommand::SubmitTour],
        AppIntent::ProblemResponseReceived { result } => {
            vec![AppCommand::ApplyProblemResponse { result }]
        }
        AppIntent::SubmitResponseReceived { result } => {
            vec![AppCommand::ApplySubmitResponse { result }]
        }
        AppIntent::CompletionNoticeDue => vec![AppCommand::ShowCompletionNotice],
        AppIntent::CloseRequested => vec![AppCommand::GuardedClose],
    }
}
