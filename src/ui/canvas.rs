//! Zeichenfläche: Klick-Erfassung und Rendering.

use crate::app::{AppController, AppIntent, AppState};
use crate::core::CanvasMapping;
use crate::render::Renderer;
use glam::Vec2;

/// Rendert die Zeichenfläche zentriert und gibt Klick-Events zurück.
///
/// Die Fläche ist `logical_size × canvas_scale` Punkte groß; Klicks werden mit
/// dem Mapping des aktuellen Frames übergeben.
pub fn render_canvas(
    ctx: &egui::Context,
    state: &AppState,
    controller: &AppController,
    renderer: &Renderer,
) -> Vec<AppIntent> {
    let mut events = Vec::new();
    let logical = state.tour.logical_size();
    let scale = state.options.effective_canvas_scale();

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::both().show(ui, |ui| {
            let size = egui::vec2(logical.x * scale, logical.y * scale);
            let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
            let canvas = CanvasMapping::new(
                Vec2::new(rect.min.x, rect.min.y),
                logical,
                Vec2::new(rect.width(), rect.height()),
            );

            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    events.push(AppIntent::CanvasClicked {
                        physical: Vec2::new(pos.x, pos.y),
                        canvas,
                    });
                }
            }

            let scene = controller.build_render_scene(state);
            renderer.paint(&ui.painter_at(rect), &scene, &canvas);

            if !scene.has_cities() {
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    state.session.phase().label(),
                    egui::FontId::proportional(20.0),
                    egui::Color32::GRAY,
                );
            }
        });
    });

    events
}
