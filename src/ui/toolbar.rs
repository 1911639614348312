//! Toolbar mit Clear, Undo und Submit.

use crate::app::{AppIntent, AppState};

/// Rendert die Toolbar und gibt erzeugte Events zurück.
pub fn render_toolbar(ctx: &egui::Context, state: &AppState) -> Vec<AppIntent> {
    let mut events = Vec::new();
    let busy = state.request_in_flight();

    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui
                .add_enabled(state.can_undo() && !busy, egui::Button::new("Clear"))
                .clicked()
            {
                events.push(AppIntent::ClearRequested);
            }

            if ui
                .add_enabled(state.can_undo() && !busy, egui::Button::new("Undo"))
                .on_hover_text("Letzten Schritt entfernen (Ctrl+Z)")
                .clicked()
            {
                events.push(AppIntent::UndoRequested);
            }

            ui.separator();

            // Submit bleibt klickbar, damit eine unvollständige Tour gemeldet wird
            let submit = egui::Button::new("Submit").selected(state.can_submit());
            if ui.add_enabled(!busy, submit).clicked() {
                events.push(AppIntent::SubmitRequested);
            }
        });
    });

    if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Z)) {
        events.push(AppIntent::UndoRequested);
    }

    events
}
