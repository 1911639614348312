//! Tour-Aufbau als Zustandsautomat: Klicks → geordnete, duplikatfreie Permutation.

use super::canvas::{CanvasMapping, DEFAULT_LOGICAL_SIZE};
use super::geometry::{closed_tour_length, distance};
use super::prompt::{Clock, Prompt, SystemClock};
use super::rules::{TimestampUndo, TourRules};
use super::{City, Problem};
use glam::Vec2;
use indexmap::IndexSet;
use std::sync::Arc;

/// Frage vor dem Verwerfen einer bestehenden Tour.
pub const CLEAR_TOUR_PROMPT: &str = "Clear existing tour?";

/// Zustand des Tour-Aufbaus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TourState {
    /// Noch keine Stadt gewählt
    #[default]
    Empty,
    /// Mindestens eine Stadt gewählt, Tour unvollständig
    Building,
    /// Classic-Variante: zuletzt gewählte Stadt ist hervorgehoben, nächste Kante startet dort
    PartialSelection {
        /// Index der hervorgehobenen Stadt
        current: usize,
    },
    /// Tour hat die Vollständigkeitsschwelle erreicht
    Complete,
}

/// Grund, aus dem ein Klick verworfen wurde.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickRejection {
    /// Vollständige Tour, Verwerfen wurde abgelehnt
    ResetDeclined,
    /// Tour ist vollständig (direkter Pick ohne Bestätigung)
    TourComplete,
    /// Keine wählbare Stadt (leere Städteliste oder alle gewählt)
    NoEligibleCity,
    /// Nächste Stadt ist bereits Teil der Tour (Classic: Reselect)
    DuplicateSelection {
        /// Bereits gewählte Stadt
        city: usize,
    },
    /// Nächste wählbare Stadt liegt außerhalb des Pick-Radius
    UnreachableSelection {
        /// Nächste wählbare Stadt
        city: usize,
        /// Distanz zum Klick in logischen Einheiten
        distance: f32,
    },
}

/// Ergebnis eines Klicks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickOutcome {
    /// Ob die Tour verändert wurde
    pub accepted: bool,
    /// Zustand nach dem Klick
    pub new_state: TourState,
    /// Ablehnungsgrund (nur bei `accepted == false`)
    pub rejection: Option<ClickRejection>,
    /// Angehängte Stadt
    pub city: Option<usize>,
    /// Ob dieser Klick die Tour vervollständigt hat
    pub completed: bool,
}

impl ClickOutcome {
    fn rejected(state: TourState, rejection: ClickRejection) -> Self {
        Self {
            accepted: false,
            new_state: state,
            rejection: Some(rejection),
            city: None,
            completed: false,
        }
    }
}

/// Fehler beim Laden eines Problems.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TourError {
    /// Zu wenige Städte für eine gültige Tour
    #[error("invalid problem: {found} cities, at least {required} required")]
    InvalidProblem {
        /// Gelieferte Anzahl
        found: usize,
        /// Benötigte Anzahl
        required: usize,
    },
}

/// Zustandsautomat für den Tour-Aufbau des aktuellen Problems.
///
/// Besitzt Städte, Tour und Zeitstempel exklusiv; bei jedem neuen Problem werden
/// alle drei ersetzt, nie gemischt.
pub struct TourBuilder {
    rules: TourRules,
    cities: Vec<City>,
    logical_size: Vec2,
    tour: IndexSet<usize>,
    timestamps: Vec<i64>,
    state: TourState,
    submittable: bool,
    clock: Arc<dyn Clock>,
}

impl TourBuilder {
    /// Erstellt einen leeren Builder mit Systemuhr.
    pub fn new(rules: TourRules) -> Self {
        Self::with_clock(rules, Arc::new(SystemClock))
    }

    /// Erstellt einen leeren Builder mit eigener Zeitquelle.
    pub fn with_clock(rules: TourRules, clock: Arc<dyn Clock>) -> Self {
        Self {
            rules,
            cities: Vec::new(),
            logical_size: DEFAULT_LOGICAL_SIZE,
            tour: IndexSet::new(),
            timestamps: Vec::new(),
            state: TourState::Empty,
            submittable: false,
            clock,
        }
    }

    /// Lädt ein neues Problem und verwirft Tour und Zeitstempel.
    ///
    /// Eine leere Städteliste lässt den Builder leer. Unterhalb der Mindestanzahl
    /// bleiben die Städte geladen und anklickbar, die Tour ist aber nicht einreichbar.
    pub fn load(&mut self, problem: Problem) -> Result<(), TourError> {
        self.clear();
        let required = self.rules.min_cities().max(1);

        if problem.cities.is_empty() {
            return Err(TourError::InvalidProblem { found: 0, required });
        }

        self.cities = problem
            .cities
            .into_iter()
            .enumerate()
            .map(|(index, city)| City { index, ..city })
            .collect();
        self.logical_size = problem.logical_size;

        let found = self.cities.len();
        if found < required {
            log::warn!(
                "Problem mit {} Städten geladen, Einreichen erst ab {} möglich",
                found,
                required
            );
            return Err(TourError::InvalidProblem { found, required });
        }

        self.submittable = true;
        log::debug!("Problem geladen: {} Städte", found);
        Ok(())
    }

    /// Verarbeitet einen Klick in physischen Koordinaten.
    ///
    /// Bei vollständiger Tour wird vorher das Verwerfen bestätigt; bei Zustimmung
    /// startet eine neue Tour mit diesem Klick.
    pub fn handle_click(
        &mut self,
        physical: Vec2,
        canvas: &CanvasMapping,
        prompt: &mut dyn Prompt,
    ) -> ClickOutcome {
        if self.state == TourState::Complete {
            if !prompt.confirm(CLEAR_TOUR_PROMPT) {
                return ClickOutcome::rejected(self.state, ClickRejection::ResetDeclined);
            }
            self.clear_tour();
        }

        let logical = canvas.physical_to_logical(physical);
        self.pick(logical)
    }

    /// Wählt die nächste Stadt zum logischen Punkt (Schritte nach der Koordinaten-Umrechnung).
    pub fn pick(&mut self, logical: Vec2) -> ClickOutcome {
        if self.state == TourState::Complete {
            return ClickOutcome::rejected(self.state, ClickRejection::TourComplete);
        }

        let Some((city, dist)) = self.nearest_eligible(logical) else {
            return ClickOutcome::rejected(self.state, ClickRejection::NoEligibleCity);
        };

        if let Some(radius) = self.rules.pick_radius {
            if dist > radius {
                return ClickOutcome::rejected(
                    self.state,
                    ClickRejection::UnreachableSelection {
                        city,
                        distance: dist,
                    },
                );
            }
        }

        if self.tour.contains(&city) {
            return ClickOutcome::rejected(self.state, ClickRejection::DuplicateSelection { city });
        }

        self.tour.insert(city);
        if self.rules.records_timestamps() {
            self.timestamps.push(self.clock.now_millis());
        }

        let completed = self.tour.len() >= self.completion_threshold();
        self.state = if completed {
            TourState::Complete
        } else {
            self.building_state(city)
        };

        ClickOutcome {
            accepted: true,
            new_state: self.state,
            rejection: None,
            city: Some(city),
            completed,
        }
    }

    /// Nächste wählbare Stadt zum Punkt samt Distanz.
    ///
    /// Scan in aufsteigender Index-Reihenfolge mit striktem `<`: bei Gleichstand
    /// gewinnt der kleinste Index.
    pub fn nearest_eligible(&self, logical: Vec2) -> Option<(usize, f32)> {
        let mut min = f32::INFINITY;
        let mut best = None;
        for city in &self.cities {
            if self.rules.skips_visited() && self.tour.contains(&city.index) {
                continue;
            }
            let dist = distance(logical, city.position);
            if dist < min {
                min = dist;
                best = Some(city.index);
            }
        }
        best.map(|index| (index, min))
    }

    /// Entfernt den letzten Tour-Schritt. Gibt `false` zurück, wenn die Tour leer war.
    pub fn undo(&mut self) -> bool {
        if self.tour.pop().is_none() {
            return false;
        }

        match self.rules.timestamp_undo {
            TimestampUndo::Paired => self.timestamps.truncate(self.tour.len()),
            TimestampUndo::Legacy => {
                if self.tour.len() > 1 {
                    self.timestamps.pop();
                }
            }
        }

        self.state = match self.tour.last() {
            None => TourState::Empty,
            Some(&last) => self.building_state(last),
        };
        true
    }

    /// Verwirft die Tour nach Bestätigung. Gibt `true` zurück, wenn verworfen wurde.
    pub fn reset(&mut self, prompt: &mut dyn Prompt) -> bool {
        if !prompt.confirm(CLEAR_TOUR_PROMPT) {
            return false;
        }
        self.clear_tour();
        true
    }

    /// Verwirft Tour und Zeitstempel ohne Rückfrage; die Städte bleiben geladen.
    pub fn restart(&mut self) {
        self.clear_tour();
    }

    /// Leert Städte, Tour und Zeitstempel ohne Rückfrage (Problemwechsel).
    pub fn clear(&mut self) {
        self.cities.clear();
        self.logical_size = DEFAULT_LOGICAL_SIZE;
        self.submittable = false;
        self.clear_tour();
    }

    fn clear_tour(&mut self) {
        self.tour.clear();
        self.timestamps.clear();
        self.state = TourState::Empty;
    }

    fn building_state(&self, last: usize) -> TourState {
        if self.rules.skips_visited() {
            TourState::Building
        } else {
            TourState::PartialSelection { current: last }
        }
    }

    /// Aktueller Zustand.
    pub fn state(&self) -> TourState {
        self.state
    }

    /// Regelwerk.
    pub fn rules(&self) -> &TourRules {
        &self.rules
    }

    /// Geladene Städte.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Logische Canvas-Größe des aktuellen Problems.
    pub fn logical_size(&self) -> Vec2 {
        self.logical_size
    }

    /// Gewählte Städte in Reihenfolge.
    pub fn tour(&self) -> Vec<usize> {
        self.tour.iter().copied().collect()
    }

    /// Anzahl gewählter Städte.
    pub fn picked(&self) -> usize {
        self.tour.len()
    }

    /// Ob die Stadt bereits gewählt ist.
    pub fn contains(&self, city: usize) -> bool {
        self.tour.contains(&city)
    }

    /// Aufgezeichnete Zeitstempel.
    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    /// Ob die Tour vollständig ist.
    pub fn is_complete(&self) -> bool {
        self.state == TourState::Complete
    }

    /// Vollständigkeitsschwelle für die aktuelle Städteanzahl.
    pub fn completion_threshold(&self) -> usize {
        self.rules.effective_completion().threshold(self.cities.len())
    }

    /// Ob das geladene Problem die Mindestanzahl an Städten erfüllt.
    pub fn is_submittable_problem(&self) -> bool {
        self.submittable
    }

    /// Ob die Tour in diesem Zustand eingereicht werden darf.
    pub fn can_submit(&self) -> bool {
        self.submittable
            && self.is_complete()
            && (!self.rules.requires_full_permutation() || self.tour.len() == self.cities.len())
    }

    /// Hervorgehobene Stadt der Classic-Variante.
    pub fn highlighted(&self) -> Option<usize> {
        match self.state {
            TourState::PartialSelection { current } => Some(current),
            _ => None,
        }
    }

    /// Länge der geschlossenen Tour in logischen Einheiten.
    pub fn tour_length(&self) -> f32 {
        let points: Vec<Vec2> = self
            .tour
            .iter()
            .filter_map(|&i| self.cities.get(i).map(|c| c.position))
            .collect();
        closed_tour_length(&points)
    }
}

impl Default for TourBuilder {
    fn default() -> Self {
        Self::new(TourRules::default())
    }
}
