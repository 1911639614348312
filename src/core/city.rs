//! Städte eines Problems und ihr opakes Farb-Token.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Standard-Palette für ganzzahlige Farb-Tokens.
pub const COLOR_PALETTE: [&str; 2] = ["#00f", "#f90"];

/// Opakes Farb-Token aus dem Problem-Payload.
///
/// Für die Tour-Logik bedeutungslos, nur der Renderer wertet es aus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorToken(pub serde_json::Value);

impl ColorToken {
    /// Interpretiert das Token als RGB-Farbe.
    ///
    /// Strings werden als `#rgb`/`#rrggbb` gelesen, Ganzzahlen indizieren `COLOR_PALETTE`.
    pub fn to_rgb(&self) -> Option<[u8; 3]> {
        match &self.0 {
            serde_json::Value::String(s) => parse_hex_color(s),
            serde_json::Value::Number(n) => {
                let index = usize::try_from(n.as_u64()?).ok()?;
                COLOR_PALETTE.get(index).and_then(|s| parse_hex_color(s))
            }
            _ => None,
        }
    }
}

/// Parst `#rgb` oder `#rrggbb`.
pub fn parse_hex_color(s: &str) -> Option<[u8; 3]> {
    let hex = s.strip_prefix('#')?;
    let digit = |c: char| c.to_digit(16).map(|d| d as u8);
    let chars: Vec<char> = hex.chars().collect();
    match chars.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (slot, c) in rgb.iter_mut().zip(&chars) {
                let d = digit(*c)?;
                *slot = d * 16 + d;
            }
            Some(rgb)
        }
        6 => {
            let mut rgb = [0u8; 3];
            for (slot, pair) in rgb.iter_mut().zip(chars.chunks(2)) {
                *slot = digit(pair[0])? * 16 + digit(pair[1])?;
            }
            Some(rgb)
        }
        _ => None,
    }
}

/// Eine Stadt: stabiler Index, logische Position, optionale Farbe.
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    /// Index innerhalb der Städteliste des Problems
    pub index: usize,
    /// Position in logischen Canvas-Koordinaten
    pub position: Vec2,
    /// Darstellungsfarbe (nur Colored-Variante)
    pub color: Option<ColorToken>,
    /// Koordinaten exakt wie vom Server geliefert
    pub source: Option<[f64; 2]>,
}

impl City {
    /// Erstellt eine Stadt ohne Farbe.
    pub fn new(index: usize, position: Vec2) -> Self {
        Self {
            index,
            position,
            color: None,
            source: None,
        }
    }

    /// Hinterlegt die Server-Koordinaten für die Einreichung.
    pub fn with_source(mut self, source: [f64; 2]) -> Self {
        self.source = Some(source);
        self
    }

    /// Koordinaten für das Wire-Format: Server-Werte, sonst die logische Position.
    pub fn wire_position(&self) -> [f64; 2] {
        self.source
            .unwrap_or([f64::from(self.position.x), f64::from(self.position.y)])
    }

    /// Setzt das Farb-Token.
    pub fn with_color(mut self, color: ColorToken) -> Self {
        self.color = Some(color);
        self
    }

    /// Baut eine indizierte Städteliste aus rohen Koordinaten.
    pub fn from_points(points: &[[f32; 2]]) -> Vec<City> {
        points
            .iter()
            .enumerate()
            .map(|(i, p)| City::new(i, Vec2::from_array(*p)))
            .collect()
    }
}
