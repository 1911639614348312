//! Application Controller für zentrale Event-Verarbeitung.

use super::render_scene;
use super::{AppCommand, AppIntent, AppState};
use crate::net::{ApiReply, NetworkWorker, Transport};
use crate::shared::RenderScene;

/// Orchestriert UI-Events und Use-Cases auf den AppState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(command.clone());
        use super::handlers;

        match command {
            // === Tour ===
            AppCommand::PickCity { physical, canvas } => {
                handlers::tour::pick_city(state, physical, canvas)
            }
            AppCommand::UndoLastStep => handlers::tour::undo(state),
            AppCommand::ClearTour => handlers::tour::clear(state),

            // === Sitzung ===
            AppCommand::StartSession => handlers::session::start(state),
            AppCommand::SubmitTour => handlers::session::submit(state),
            AppCommand::ApplyProblemResponse { result } => {
                handlers::session::apply_problem_response(state, result)
            }
            AppCommand::ApplySubmitResponse { result } => {
                handlers::session::apply_submit_response(state, result)
            }

            // === Dialoge & Anwendungssteuerung ===
            AppCommand::ShowCompletionNotice => handlers::dialog::show_completion_notice(state),
            AppCommand::GuardedClose => handlers::dialog::guarded_close(state),
        }

        Ok(())
    }

    /// Übergibt alle ausstehenden Requests an den Netzwerk-Worker.
    pub fn flush_outbox(
        &mut self,
        state: &mut AppState,
        worker: &NetworkWorker,
    ) -> anyhow::Result<()> {
        while let Some(request) = state.outbox.pop_front() {
            worker.send(request)?;
        }
        Ok(())
    }

    /// Verarbeitet alle fertigen Antworten des Workers. Gibt die Anzahl zurück.
    pub fn poll_worker(
        &mut self,
        state: &mut AppState,
        worker: &NetworkWorker,
    ) -> anyhow::Result<usize> {
        let mut handled = 0;
        while let Some(reply) = worker.try_recv() {
            self.handle_intent(state, AppIntent::from(reply))?;
            handled += 1;
        }
        Ok(handled)
    }

    /// Arbeitet die Outbox synchron über `transport` ab, inklusive Folge-Requests.
    ///
    /// Für Headless-Betrieb und Tests. Gibt die Anzahl gesendeter Requests zurück.
    pub fn pump_blocking(
        &mut self,
        state: &mut AppState,
        transport: &mut dyn Transport,
    ) -> anyhow::Result<usize> {
        let mut sent = 0;
        while let Some(request) = state.outbox.pop_front() {
            let result = transport.request(&request.to_http());
            sent += 1;
            self.handle_intent(state, AppIntent::from(ApiReply { request, result }))?;
        }
        Ok(sent)
    }

    /// Baut die Render-Szene aus dem aktuellen AppState.
    pub fn build_render_scene(&self, state: &AppState) -> RenderScene {
        render_scene::build(state)
    }
}
