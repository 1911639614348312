//! Render-Szene als expliziter Übergabevertrag zwischen App und Renderer.
//!
//! Lebt im shared-Modul, da `app` sie baut und `render` sie konsumiert.

use super::options::AppOptions;
use glam::Vec2;

/// Eine Stadt, wie sie gezeichnet wird.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneCity {
    /// Position in logischen Koordinaten
    pub position: Vec2,
    /// Farbe aus dem Farb-Token (None = Standardfarbe)
    pub rgb: Option<[u8; 3]>,
    /// Hervorgehoben (aktuelle Stadt)
    pub current: bool,
}

/// Read-only Daten für einen Render-Frame.
#[derive(Debug, Clone)]
pub struct RenderScene {
    /// Logische Canvas-Größe [Breite, Höhe]
    pub logical_size: Vec2,
    /// Alle Städte des aktuellen Problems
    pub cities: Vec<SceneCity>,
    /// Tour-Positionen in Reihenfolge
    pub tour_points: Vec<Vec2>,
    /// Ob die Rückkante zum Start gezeichnet wird
    pub close_loop: bool,
    /// Laufzeit-Optionen für Farben, Größen, Breiten
    pub options: AppOptions,
}

impl RenderScene {
    /// Gibt zurück, ob Städte zum Zeichnen vorhanden sind.
    pub fn has_cities(&self) -> bool {
        !self.cities.is_empty()
    }

    /// Kanten der Tour als Punktpaare, inklusive Rückkante falls aktiv.
    pub fn edges(&self) -> Vec<(Vec2, Vec2)> {
        let mut edges: Vec<(Vec2, Vec2)> = self
            .tour_points
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .collect();
        if self.close_loop && self.tour_points.len() > 2 {
            if let (Some(&last), Some(&first)) = (self.tour_points.last(), self.tour_points.first())
            {
                edges.push((last, first));
            }
        }
        edges
    }
}
