//! Problem-Sitzung: Fortschritt durch die servergeführte Problemfolge.
//!
//! Es ist höchstens ein Request gleichzeitig unterwegs; die Phase erzwingt das.

use crate::core::{SubmitFailurePolicy, TourBuilder, TourEncoding, TourError};
use crate::net::{ApiRequest, HttpResponse, ProblemPayload, TourSubmission, TransportError};

/// Phase der Sitzung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Noch nicht gestartet
    #[default]
    Idle,
    /// Problem wird geladen
    Loading,
    /// Problem geladen, Tour wird gebaut
    Ready,
    /// Tour wird eingereicht
    Submitting,
    /// Keine weiteren Probleme (terminal)
    Exhausted,
}

impl SessionPhase {
    /// Anzeigename für die Status-Bar.
    pub fn label(self) -> &'static str {
        match self {
            SessionPhase::Idle => "Idle",
            SessionPhase::Loading => "Loading",
            SessionPhase::Ready => "Ready",
            SessionPhase::Submitting => "Submitting",
            SessionPhase::Exhausted => "Done",
        }
    }
}

/// Sichtbarer Sitzungszustand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionState {
    /// Aktuelle Tour ist vollständig
    pub tour_complete: bool,
    /// Backend hat keine weiteren Probleme
    pub exhausted: bool,
}

/// Fehler der Sitzungssteuerung.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Backend liefert keine weiteren Probleme
    #[error("no more problems")]
    ProblemsExhausted,
    /// Tour hat die Vollständigkeitsschwelle nicht erreicht
    #[error("tour incomplete: {picked} of {required} cities")]
    IncompleteTour {
        /// Gewählte Städte
        picked: usize,
        /// Benötigte Städte
        required: usize,
    },
    /// Problem hat zu wenige Städte für eine Einreichung
    #[error("invalid problem: {found} cities, at least {required} required")]
    InvalidProblem {
        /// Gelieferte Anzahl
        found: usize,
        /// Benötigte Anzahl
        required: usize,
    },
    /// Es ist bereits ein Request unterwegs
    #[error("a request is already in flight")]
    RequestInFlight,
    /// Operation in der aktuellen Phase nicht möglich
    #[error("session not ready")]
    NotReady,
}

impl From<TourError> for SessionError {
    fn from(err: TourError) -> Self {
        match err {
            TourError::InvalidProblem { found, required } => {
                SessionError::InvalidProblem { found, required }
            }
        }
    }
}

/// Steuert Laden, Einreichen und Weiterschalten der Probleme.
#[derive(Debug, Clone)]
pub struct ProblemSession {
    index: usize,
    phase: SessionPhase,
    state: SessionState,
    encoding: TourEncoding,
    failure_policy: SubmitFailurePolicy,
}

impl ProblemSession {
    /// Erstellt eine Sitzung im Zustand `Idle`.
    pub fn new(encoding: TourEncoding, failure_policy: SubmitFailurePolicy) -> Self {
        Self {
            index: 0,
            phase: SessionPhase::Idle,
            state: SessionState::default(),
            encoding,
            failure_policy,
        }
    }

    /// Startet bei Problem 0 und liefert den ersten Fetch.
    pub fn start(&mut self) -> Result<ApiRequest, SessionError> {
        self.ensure_idle_or_ready()?;
        self.index = 0;
        self.phase = SessionPhase::Idle;
        log::info!("Sitzung gestartet");
        self.fetch_problem()
    }

    /// Fetch für den aktuellen Problem-Index.
    pub fn fetch_problem(&mut self) -> Result<ApiRequest, SessionError> {
        self.ensure_idle_or_ready()?;
        self.phase = SessionPhase::Loading;
        log::info!("Lade Problem {}", self.index);
        Ok(ApiRequest::FetchProblem { index: self.index })
    }

    /// Verarbeitet die Antwort auf einen Fetch.
    ///
    /// Der Tour-Builder wird zuerst geleert. Jeder Nicht-200-Status, jeder
    /// Netzwerkfehler und jeder unlesbare Body beendet die Sitzung endgültig.
    pub fn on_problem_response(
        &mut self,
        result: Result<HttpResponse, TransportError>,
        tour: &mut TourBuilder,
    ) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Loading {
            log::warn!("Unerwartete Problem-Antwort in Phase {:?}", self.phase);
            return Err(SessionError::NotReady);
        }

        tour.clear();
        self.state.tour_complete = false;

        let payload = match result {
            Ok(response) if response.is_ok() => ProblemPayload::parse(&response.body)
                .map_err(|e| log::warn!("Problem {} unlesbar: {}", self.index, e))
                .ok(),
            Ok(response) => {
                log::info!("Problem {}: Status {}", self.index, response.status);
                None
            }
            Err(e) => {
                log::warn!("Problem {}: {}", self.index, e);
                None
            }
        };

        let Some(payload) = payload else {
            self.state.exhausted = true;
            self.phase = SessionPhase::Exhausted;
            self.index += 1;
            log::info!("Keine weiteren Probleme");
            return Err(SessionError::ProblemsExhausted);
        };

        self.phase = SessionPhase::Ready;
        tour.load(payload.into_problem())?;
        log::info!("Problem {} bereit", self.index);
        Ok(())
    }

    /// Reicht die vollständige Tour ein.
    ///
    /// Bei Erfolg wird der Tour-Builder geleert; bis zur nächsten Antwort gibt es
    /// keine anklickbaren Städte.
    pub fn submit_tour(&mut self, tour: &mut TourBuilder) -> Result<ApiRequest, SessionError> {
        match self.phase {
            SessionPhase::Ready => {}
            SessionPhase::Loading | SessionPhase::Submitting => {
                return Err(SessionError::RequestInFlight)
            }
            SessionPhase::Exhausted => return Err(SessionError::ProblemsExhausted),
            SessionPhase::Idle => return Err(SessionError::NotReady),
        }

        let found = tour.cities().len();
        if !tour.is_submittable_problem() {
            return Err(SessionError::InvalidProblem {
                found,
                required: tour.rules().min_cities(),
            });
        }

        if !tour.is_complete() {
            return Err(SessionError::IncompleteTour {
                picked: tour.picked(),
                required: tour.completion_threshold(),
            });
        }

        if tour.rules().requires_full_permutation() && tour.picked() != found {
            return Err(SessionError::IncompleteTour {
                picked: tour.picked(),
                required: found,
            });
        }

        let body = TourSubmission::from_tour(tour, self.encoding).encode();
        self.phase = SessionPhase::Submitting;
        self.state.tour_complete = false;
        tour.clear();
        log::info!("Reiche Tour für Problem {} ein", self.index);

        Ok(ApiRequest::SubmitTour {
            index: self.index,
            body,
        })
    }

    /// Verarbeitet die Antwort auf eine Einreichung und liefert den nächsten Fetch.
    pub fn on_submit_response(
        &mut self,
        result: Result<HttpResponse, TransportError>,
    ) -> Result<ApiRequest, SessionError> {
        if self.phase != SessionPhase::Submitting {
            log::warn!("Unerwartete Submit-Antwort in Phase {:?}", self.phase);
            return Err(SessionError::NotReady);
        }

        let succeeded = matches!(&result, Ok(response) if response.is_success());
        let advance = match self.failure_policy {
            SubmitFailurePolicy::Advance => true,
            SubmitFailurePolicy::StayOnFailure => succeeded,
        };

        if !succeeded {
            log::warn!("Einreichung für Problem {} fehlgeschlagen", self.index);
        }
        if advance {
            self.index += 1;
        }

        self.phase = SessionPhase::Idle;
        self.fetch_problem()
    }

    /// Übernimmt den Vollständigkeitsstatus des Tour-Builders.
    pub fn sync_tour(&mut self, tour: &TourBuilder) {
        self.state.tour_complete = tour.is_complete();
    }

    /// Ob die Anwendung ohne Rückfrage geschlossen werden darf.
    pub fn may_discard(&self) -> bool {
        self.state.exhausted
    }

    fn ensure_idle_or_ready(&self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Idle | SessionPhase::Ready => Ok(()),
            SessionPhase::Loading | SessionPhase::Submitting => Err(SessionError::RequestInFlight),
            SessionPhase::Exhausted => Err(SessionError::ProblemsExhausted),
        }
    }

    /// Sichtbarer Zustand.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Aktuelle Phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Aktueller Problem-Index (0-basiert).
    pub fn problem_index(&self) -> usize {
        self.index
    }

    /// Anzeigenummer "Problem N" (1-basiert).
    pub fn display_number(&self) -> usize {
        self.index + 1
    }

    /// Verhalten bei fehlgeschlagener Einreichung.
    pub fn failure_policy(&self) -> SubmitFailurePolicy {
        self.failure_policy
    }
}

impl Default for ProblemSession {
    fn default() -> Self {
        Self::new(TourEncoding::default(), SubmitFailurePolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TourRules;
    use glam::Vec2;

    const SQUARE: &str = "[[0, 0], [10, 0], [0, 10], [10, 10]]";

    fn loaded(rules: TourRules) -> (ProblemSession, TourBuilder) {
        let mut session = ProblemSession::default();
        let mut tour = TourBuilder::new(rules);
        assert_eq!(
            session.start(),
            Ok(ApiRequest::FetchProblem { index: 0 })
        );
        session
            .on_problem_response(Ok(HttpResponse::new(200, SQUARE)), &mut tour)
            .expect("Problem lädt");
        (session, tour)
    }

    fn complete(tour: &mut TourBuilder) {
        for p in [[0.0, 0.0], [10.0, 0.0], [0.0, 10.0], [10.0, 10.0]] {
            tour.pick(Vec2::from_array(p));
        }
    }

    #[test]
    fn fetch_is_refused_while_loading() {
        let mut session = ProblemSession::default();
        session.start().expect("Start");
        assert_eq!(session.fetch_problem(), Err(SessionError::RequestInFlight));
        assert_eq!(session.phase(), SessionPhase::Loading);
    }

    #[test]
    fn not_found_exhausts_session() {
        let mut session = ProblemSession::default();
        let mut tour = TourBuilder::default();
        session.start().expect("Start");

        let err = session
            .on_problem_response(Ok(HttpResponse::new(404, "")), &mut tour)
            .unwrap_err();
        assert_eq!(err, SessionError::ProblemsExhausted);
        assert!(session.state().exhausted);
        assert!(session.may_discard());
        assert_eq!(session.problem_index(), 1);
        assert_eq!(session.fetch_problem(), Err(SessionError::ProblemsExhausted));
    }

    #[test]
    fn transport_error_and_garbage_body_also_exhaust() {
        for result in [
            Err(TransportError::Disconnected),
            Ok(HttpResponse::new(200, "not json")),
        ] {
            let mut session = ProblemSession::default();
            let mut tour = TourBuilder::default();
            session.start().expect("Start");
            assert_eq!(
                session.on_problem_response(result, &mut tour),
                Err(SessionError::ProblemsExhausted)
            );
            assert_eq!(session.phase(), SessionPhase::Exhausted);
        }
    }

    #[test]
    fn incomplete_tour_is_refused_without_state_change() {
        let (mut session, mut tour) = loaded(TourRules::colored());
        tour.pick(Vec2::new(0.0, 0.0));

        let err = session.submit_tour(&mut tour).unwrap_err();
        assert_eq!(
            err,
            SessionError::IncompleteTour {
                picked: 1,
                required: 4
            }
        );
        assert_eq!(session.problem_index(), 0);
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert_eq!(tour.tour(), vec![0]);
    }

    #[test]
    fn submit_clears_builder_and_advances_on_reply() {
        let (mut session, mut tour) = loaded(TourRules::classic());
        complete(&mut tour);
        session.sync_tour(&tour);
        assert!(session.state().tour_complete);

        let request = session.submit_tour(&mut tour).expect("Einreichung");
        assert_eq!(
            request,
            ApiRequest::SubmitTour {
                index: 0,
                body: "data=%5B0%2C1%2C2%2C3%5D".into()
            }
        );
        assert!(!session.state().tour_complete);
        assert!(tour.cities().is_empty());
        assert_eq!(session.submit_tour(&mut tour), Err(SessionError::RequestInFlight));

        let next = session
            .on_submit_response(Ok(HttpResponse::new(200, "")))
            .expect("nächster Fetch");
        assert_eq!(next, ApiRequest::FetchProblem { index: 1 });
        assert_eq!(session.display_number(), 2);
    }

    #[test]
    fn advance_policy_ignores_failed_submission() {
        let (mut session, mut tour) = loaded(TourRules::colored());
        complete(&mut tour);
        session.submit_tour(&mut tour).expect("Einreichung");

        let next = session
            .on_submit_response(Ok(HttpResponse::new(500, "")))
            .expect("nächster Fetch");
        assert_eq!(next, ApiRequest::FetchProblem { index: 1 });
    }

    #[test]
    fn stay_on_failure_refetches_same_problem() {
        let mut session =
            ProblemSession::new(TourEncoding::Indices, SubmitFailurePolicy::StayOnFailure);
        let mut tour = TourBuilder::new(TourRules::colored());
        session.start().expect("Start");
        session
            .on_problem_response(Ok(HttpResponse::new(200, SQUARE)), &mut tour)
            .expect("Problem lädt");
        complete(&mut tour);
        session.submit_tour(&mut tour).expect("Einreichung");

        let next = session
            .on_submit_response(Err(TransportError::Disconnected))
            .expect("erneuter Fetch");
        assert_eq!(next, ApiRequest::FetchProblem { index: 0 });
    }

    #[test]
    fn classic_small_problem_cannot_be_submitted() {
        let mut session = ProblemSession::default();
        let mut tour = TourBuilder::new(TourRules::classic());
        session.start().expect("Start");
        let err = session
            .on_problem_response(Ok(HttpResponse::new(200, "[[0, 0], [5, 5]]")), &mut tour)
            .unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidProblem {
                found: 2,
                required: 4
            }
        );
        assert_eq!(session.phase(), SessionPhase::Ready);

        tour.pick(Vec2::new(0.0, 0.0));
        tour.pick(Vec2::new(5.0, 5.0));
        assert!(matches!(
            session.submit_tour(&mut tour),
            Err(SessionError::InvalidProblem { .. })
        ));
    }

    #[test]
    fn submit_before_start_is_not_ready() {
        let mut session = ProblemSession::default();
        let mut tour = TourBuilder::default();
        assert_eq!(session.submit_tour(&mut tour), Err(SessionError::NotReady));
    }
}
