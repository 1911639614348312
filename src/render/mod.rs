//! Zeichnen der Szene mit dem egui-Painter.
//!
//! Alle Größen der Szene sind logisch; das `CanvasMapping` skaliert sie auf die
//! physische Zeichenfläche.

mod types;

pub use crate::shared::RenderScene;
pub use types::{color32, pos2, rgb32};

use crate::core::CanvasMapping;

/// Renderer für Städte und Tour-Kanten.
#[derive(Debug, Default, Clone, Copy)]
pub struct Renderer;

impl Renderer {
    /// Erstellt einen neuen Renderer
    pub fn new() -> Self {
        Self
    }

    /// Baut die Shapes eines Frames: Hintergrund, Kanten, Städte.
    pub fn shapes(&self, scene: &RenderScene, canvas: &CanvasMapping) -> Vec<egui::Shape> {
        let options = &scene.options;
        let to_screen = |p: glam::Vec2| pos2(canvas.logical_to_physical(p));
        // Linienstärken und Radien skalieren mit der horizontalen Achse
        let scale = canvas.logical_per_physical().x.recip();

        let mut shapes = Vec::with_capacity(scene.cities.len() + scene.tour_points.len() + 1);

        let rect = egui::Rect::from_min_max(
            to_screen(glam::Vec2::ZERO),
            to_screen(scene.logical_size),
        );
        shapes.push(egui::Shape::rect_filled(
            rect,
            0.0,
            color32(options.background_color),
        ));

        let stroke = egui::Stroke::new(options.edge_width * scale, color32(options.edge_color));
        for (a, b) in scene.edges() {
            shapes.push(egui::Shape::line_segment([to_screen(a), to_screen(b)], stroke));
        }

        let radius = options.city_radius * scale;
        for city in &scene.cities {
            let fill = if city.current {
                color32(options.city_color_current)
            } else {
                city.rgb
                    .map(rgb32)
                    .unwrap_or_else(|| color32(options.city_color_default))
            };
            shapes.push(egui::Shape::circle_filled(
                to_screen(city.position),
                radius,
                fill,
            ));
        }

        shapes
    }

    /// Zeichnet die Szene.
    pub fn paint(&self, painter: &egui::Painter, scene: &RenderScene, canvas: &CanvasMapping) {
        painter.extend(self.shapes(scene, canvas));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{AppOptions, SceneCity};
    use glam::Vec2;

    fn scene(close_loop: bool) -> RenderScene {
        let city = |x: f32, y: f32| SceneCity {
            position: Vec2::new(x, y),
            rgb: None,
            current: false,
        };
        RenderScene {
            logical_size: Vec2::new(100.0, 100.0),
            cities: vec![city(0.0, 0.0), city(10.0, 0.0), city(10.0, 10.0)],
            tour_points: vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)],
            close_loop,
            options: AppOptions::default(),
        }
    }

    #[test]
    fn shape_count_includes_closing_edge_only_when_closed() {
        let canvas = CanvasMapping::scaled(Vec2::ZERO, Vec2::new(100.0, 100.0), 2.0);
        // Hintergrund + 2 Kanten + 3 Städte
        assert_eq!(Renderer::new().shapes(&scene(false), &canvas).len(), 6);
        assert_eq!(Renderer::new().shapes(&scene(true), &canvas).len(), 7);
    }

    #[test]
    fn cities_are_scaled_to_physical_space() {
        let canvas = CanvasMapping::scaled(Vec2::new(5.0, 5.0), Vec2::new(100.0, 100.0), 2.0);
        let shapes = Renderer::new().shapes(&scene(false), &canvas);
        let egui::Shape::Circle(circle) = &shapes[5] else {
            panic!("Stadt sollte als Kreis gezeichnet werden");
        };
        assert_eq!(circle.center, egui::pos2(25.0, 25.0));
        assert_eq!(circle.radius, 10.0);
    }
}
