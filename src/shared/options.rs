//! Zentrale Konfiguration für den TSP Tour Collector.
//!
//! `AppOptions` enthält alle beim Start einlesbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use crate::core::{
    CompletionRule, SubmitFailurePolicy, TimestampUndo, TourEncoding, TourRules, TourVariant,
};
use serde::{Deserialize, Serialize};

// ── Backend ─────────────────────────────────────────────────────────

/// Standard-Server-URL des Backends.
pub const SERVER_URL: &str = "http://127.0.0.1:5000";

// ── Canvas ──────────────────────────────────────────────────────────

/// Geräte-Skalierung der Zeichenfläche (physisch = logisch × Faktor).
pub const CANVAS_SCALE: f32 = 2.0;
/// Radius einer Stadt in logischen Einheiten.
pub const CITY_RADIUS: f32 = 5.0;
/// Linienstärke der Tour-Kanten in logischen Einheiten.
pub const EDGE_WIDTH: f32 = 2.0;

// ── Farben ──────────────────────────────────────────────────────────

/// Stadtfarbe ohne Farb-Token (RGBA: Rot).
pub const CITY_COLOR_DEFAULT: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
/// Farbe der hervorgehobenen aktuellen Stadt (RGBA: Blau).
pub const CITY_COLOR_CURRENT: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
/// Farbe der Tour-Kanten (RGBA: Schwarz).
pub const EDGE_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
/// Hintergrund der Zeichenfläche (RGBA: Weiß).
pub const BACKGROUND_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle beim Start eingelesenen Optionen.
/// Wird als `tsp_tour_collector.toml` neben der Binary gespeichert.
/// Fehlende Felder fallen auf die Standardwerte zurück.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppOptions {
    // ── Backend ─────────────────────────────────────────────────
    /// Basis-URL des Backends
    pub server_url: String,
    /// Was nach einer fehlgeschlagenen Einreichung passiert
    pub submit_failure_policy: SubmitFailurePolicy,
    /// Format der eingereichten Colored-Tour
    pub tour_encoding: TourEncoding,

    // ── Tour-Regeln ─────────────────────────────────────────────
    /// Frontend-Variante
    pub variant: TourVariant,
    /// Pick-Radius in logischen Einheiten; fehlt = Standard der Variante, ≤ 0 = unbegrenzt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pick_radius: Option<f32>,
    /// Vollständigkeitsregel
    pub completion_rule: CompletionRule,
    /// Zeitstempel-Behandlung bei Undo
    pub timestamp_undo: TimestampUndo,

    // ── Darstellung ─────────────────────────────────────────────
    /// Geräte-Skalierung der Zeichenfläche
    pub canvas_scale: f32,
    /// Stadtradius in logischen Einheiten
    pub city_radius: f32,
    /// Kantenbreite in logischen Einheiten
    pub edge_width: f32,
    /// Stadtfarbe ohne Farb-Token
    pub city_color_default: [f32; 4],
    /// Farbe der hervorgehobenen Stadt
    pub city_color_current: [f32; 4],
    /// Kantenfarbe
    pub edge_color: [f32; 4],
    /// Hintergrundfarbe
    pub background_color: [f32; 4],
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            server_url: SERVER_URL.to_string(),
            submit_failure_policy: SubmitFailurePolicy::default(),
            tour_encoding: TourEncoding::default(),

            variant: TourVariant::default(),
            pick_radius: None,
            completion_rule: CompletionRule::default(),
            timestamp_undo: TimestampUndo::default(),

            canvas_scale: CANVAS_SCALE,
            city_radius: CITY_RADIUS,
            edge_width: EDGE_WIDTH,
            city_color_default: CITY_COLOR_DEFAULT,
            city_color_current: CITY_COLOR_CURRENT,
            edge_color: EDGE_COLOR,
            background_color: BACKGROUND_COLOR,
        }
    }
}

impl AppOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("tsp-tour-collector"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("tsp_tour_collector.toml")
    }

    /// Tour-Regeln aus Variante, Pick-Radius und Policies.
    pub fn tour_rules(&self) -> TourRules {
        if self.variant == TourVariant::Classic
            && self.completion_rule == CompletionRule::LastCityImplicit
        {
            log::warn!("completion_rule = last_city_implicit gilt nicht für classic, nutze all_cities");
        }
        let rules = TourRules::for_variant(self.variant)
            .with_completion(self.completion_rule)
            .with_timestamp_undo(self.timestamp_undo);
        match self.pick_radius {
            Some(radius) if radius > 0.0 => rules.with_pick_radius(Some(radius)),
            Some(_) => rules.with_pick_radius(None),
            None => rules,
        }
    }

    /// Canvas-Skalierung, nicht-positive Werte werden als 1 behandelt.
    pub fn effective_canvas_scale(&self) -> f32 {
        if self.canvas_scale > 0.0 {
            self.canvas_scale
        } else {
            1.0
        }
    }
}
