//! Ein geladenes Problem: Städte plus logische Canvas-Größe.

use super::canvas::DEFAULT_LOGICAL_SIZE;
use super::City;
use glam::Vec2;

/// Ein Problem, wie es vom Backend geliefert wird.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    /// Städte in Index-Reihenfolge
    pub cities: Vec<City>,
    /// Deklarierte logische Canvas-Größe
    pub logical_size: Vec2,
}

impl Problem {
    /// Erstellt ein Problem mit Standard-Canvas (500 × 500).
    pub fn new(cities: Vec<City>) -> Self {
        Self {
            cities,
            logical_size: DEFAULT_LOGICAL_SIZE,
        }
    }

    /// Erstellt ein Problem aus rohen Koordinaten.
    pub fn from_points(points: &[[f32; 2]]) -> Self {
        Self::new(City::from_points(points))
    }

    /// Setzt die logische Canvas-Größe.
    pub fn with_logical_size(mut self, size: Vec2) -> Self {
        self.logical_size = size;
        self
    }

    /// Anzahl Städte.
    pub fn city_count(&self) -> usize {
        self.cities.len()
    }
}
