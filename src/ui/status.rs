//! Status-Bar am unteren Bildschirmrand.

use crate::app::AppState;

/// Rendert die Status-Bar
pub fn render_status_bar(ctx: &egui::Context, state: &AppState) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if state.session.state().exhausted {
                ui.label("All problems done");
            } else {
                ui.label(format!("Problem {}", state.session.display_number()));
            }

            ui.separator();

            if state.city_count() > 0 {
                ui.label(format!(
                    "Tour: {} / {} | Length: {:.1}",
                    state.tour.picked(),
                    state.tour.completion_threshold(),
                    state.tour.tour_length()
                ));
            } else {
                ui.label("No cities loaded");
            }

            ui.separator();

            ui.label(format!("Status: {}", state.session.phase().label()));

            // Statusnachricht (z.B. "Tour incomplete!")
            if let Some(ref msg) = state.ui.status_message {
                ui.separator();
                ui.label(egui::RichText::new(format!("⚠ {}", msg)).color(egui::Color32::YELLOW));
            }
        });
    });
}
