//! Abbildung zwischen physischer Zeichenfläche und logischem Canvas.

use glam::Vec2;

/// Logische Standardgröße, falls das Problem keine Abmessungen liefert.
pub const DEFAULT_LOGICAL_SIZE: Vec2 = Vec2::new(500.0, 500.0);

/// Koordinaten-Mapping einer Zeichenfläche.
///
/// Die logische Größe ist die deklarierte Canvas-Größe des Problems, die physische
/// Größe die tatsächlich gerenderte Fläche (z.B. mit Geräte-Skalierung 2).
/// Beide Achsen werden unabhängig skaliert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasMapping {
    /// Ursprung der Zeichenfläche in physischen Koordinaten (linke obere Ecke)
    pub origin: Vec2,
    /// Deklarierte logische Größe [Breite, Höhe]
    pub logical_size: Vec2,
    /// Physische Größe [Breite, Höhe]
    pub physical_size: Vec2,
}

impl CanvasMapping {
    /// Erstellt ein Mapping.
    pub fn new(origin: Vec2, logical_size: Vec2, physical_size: Vec2) -> Self {
        Self {
            origin,
            logical_size,
            physical_size,
        }
    }

    /// Mapping ohne Skalierung (logisch == physisch, Ursprung 0).
    pub fn identity(logical_size: Vec2) -> Self {
        Self::new(Vec2::ZERO, logical_size, logical_size)
    }

    /// Mapping mit gleichmäßigem Faktor `scale` (physisch = logisch × scale).
    pub fn scaled(origin: Vec2, logical_size: Vec2, scale: f32) -> Self {
        Self::new(origin, logical_size, logical_size * scale)
    }

    /// Skalierungsfaktor logisch/physisch je Achse.
    ///
    /// Eine nicht-positive physische Achse wird mit Faktor 1 abgebildet.
    pub fn logical_per_physical(&self) -> Vec2 {
        let axis = |logical: f32, physical: f32| {
            if physical > 0.0 {
                logical / physical
            } else {
                1.0
            }
        };
        Vec2::new(
            axis(self.logical_size.x, self.physical_size.x),
            axis(self.logical_size.y, self.physical_size.y),
        )
    }

    /// Rechnet einen physischen Klickpunkt in logische Koordinaten um.
    pub fn physical_to_logical(&self, click: Vec2) -> Vec2 {
        (click - self.origin) * self.logical_per_physical()
    }

    /// Rechnet einen logischen Punkt in physische Koordinaten um (für den Renderer).
    pub fn logical_to_physical(&self, logical: Vec2) -> Vec2 {
        logical / self.logical_per_physical() + self.origin
    }
}

/// Freie Funktion in der Form der Fachbeschreibung.
pub fn physical_to_logical(
    click: Vec2,
    physical_origin: Vec2,
    logical_size: Vec2,
    physical_size: Vec2,
) -> Vec2 {
    CanvasMapping::new(physical_origin, logical_size, physical_size).physical_to_logical(click)
}

impl Default for CanvasMapping {
    fn default() -> Self {
        Self::identity(DEFAULT_LOGICAL_SIZE)
    }
}
