//! Varianten-Regeln und Policies für Tour-Aufbau und Einreichung.
//!
//! Die beiden Frontend-Varianten unterscheiden sich in Pick-Radius,
//! Duplikat-Behandlung, Zeitstempeln und Mindestanzahl an Städten.

use serde::{Deserialize, Serialize};

/// Frontend-Variante.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TourVariant {
    /// Farbige Städte, Pick-Radius, Zeitstempel, Undo
    #[default]
    Colored,
    /// Einfache Variante: nächste Stadt ohne Radius, Duplikat-Klick = Reselect
    Classic,
}

/// Wann eine Tour als vollständig gilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionRule {
    /// Alle Städte müssen angeklickt werden; die Rückkante zum Start ist implizit.
    #[default]
    AllCities,
    /// Die letzte verbleibende Stadt ist implizit (Schwelle n − 1, mindestens 1).
    LastCityImplicit,
}

impl CompletionRule {
    /// Anzahl gewählter Städte, bei der die Tour vollständig ist.
    pub fn threshold(self, city_count: usize) -> usize {
        match self {
            CompletionRule::AllCities => city_count,
            CompletionRule::LastCityImplicit => city_count.saturating_sub(1).max(1).min(city_count),
        }
    }
}

/// Zeitstempel-Behandlung bei Undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampUndo {
    /// Zeitstempel bleiben parallel zur Tour (einer pro Schritt)
    #[default]
    Paired,
    /// Ursprüngliches Verhalten: nur entfernen, solange mehr als ein Schritt übrig ist
    Legacy,
}

/// Format der eingereichten Colored-Tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TourEncoding {
    /// Städte als `[x, y, color]`-Tupel (ursprüngliches Wire-Format)
    #[default]
    Cities,
    /// Nur Städte-Indizes
    Indices,
}

/// Verhalten nach einer fehlgeschlagenen Tour-Einreichung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitFailurePolicy {
    /// Problem-Index wird unabhängig vom Ergebnis erhöht
    #[default]
    Advance,
    /// Bei Fehler bleibt der Index, dasselbe Problem wird erneut geladen
    StayOnFailure,
}

/// Regelwerk eines `TourBuilder`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TourRules {
    /// Frontend-Variante
    pub variant: TourVariant,
    /// Maximale Klick-Distanz in logischen Einheiten (`None` = unbegrenzt)
    pub pick_radius: Option<f32>,
    /// Vollständigkeitsregel
    pub completion: CompletionRule,
    /// Zeitstempel-Behandlung bei Undo
    pub timestamp_undo: TimestampUndo,
}

impl TourRules {
    /// Standard-Pick-Radius der Colored-Variante.
    pub const COLORED_PICK_RADIUS: f32 = 16.0;
    /// Mindestanzahl Städte für eine einreichbare Classic-Tour.
    pub const CLASSIC_MIN_CITIES: usize = 4;

    /// Regeln der Colored-Variante.
    pub fn colored() -> Self {
        Self {
            variant: TourVariant::Colored,
            pick_radius: Some(Self::COLORED_PICK_RADIUS),
            completion: CompletionRule::AllCities,
            timestamp_undo: TimestampUndo::Paired,
        }
    }

    /// Regeln der Classic-Variante.
    pub fn classic() -> Self {
        Self {
            variant: TourVariant::Classic,
            pick_radius: None,
            completion: CompletionRule::AllCities,
            timestamp_undo: TimestampUndo::Paired,
        }
    }

    /// Standardregeln einer Variante.
    pub fn for_variant(variant: TourVariant) -> Self {
        match variant {
            TourVariant::Colored => Self::colored(),
            TourVariant::Classic => Self::classic(),
        }
    }

    /// Setzt den Pick-Radius.
    pub fn with_pick_radius(mut self, radius: Option<f32>) -> Self {
        self.pick_radius = radius;
        self
    }

    /// Setzt die Vollständigkeitsregel.
    pub fn with_completion(mut self, completion: CompletionRule) -> Self {
        self.completion = completion;
        self
    }

    /// Setzt die Zeitstempel-Behandlung bei Undo.
    pub fn with_timestamp_undo(mut self, timestamp_undo: TimestampUndo) -> Self {
        self.timestamp_undo = timestamp_undo;
        self
    }

    /// Mindestanzahl Städte, ab der eine Tour eingereicht werden darf.
    pub fn min_cities(&self) -> usize {
        match self.variant {
            TourVariant::Colored => 1,
            TourVariant::Classic => Self::CLASSIC_MIN_CITIES,
        }
    }

    /// Ob bereits gewählte Städte bei der Nearest-Suche übersprungen werden.
    pub fn skips_visited(&self) -> bool {
        self.variant == TourVariant::Colored
    }

    /// Ob pro Klick ein Zeitstempel aufgezeichnet wird.
    pub fn records_timestamps(&self) -> bool {
        self.variant == TourVariant::Colored
    }

    /// Ob die Tour exakt alle Städte enthalten muss, um eingereicht zu werden.
    pub fn requires_full_permutation(&self) -> bool {
        self.variant == TourVariant::Classic
    }

    /// Wirksame Vollständigkeitsregel.
    ///
    /// Classic wird nur als volle Permutation eingereicht und schließt deshalb
    /// immer bei allen Städten ab, unabhängig von `completion`.
    pub fn effective_completion(&self) -> CompletionRule {
        if self.requires_full_permutation() {
            CompletionRule::AllCities
        } else {
            self.completion
        }
    }
}

impl Default for TourRules {
    fn default() -> Self {
        Self::colored()
    }
}
