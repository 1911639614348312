use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use glam::Vec2;
use tsp_tour_collector::{
    AppCommand, AppController, AppIntent, AppOptions, AppState, CanvasMapping, HttpMethod,
    HttpRequest, HttpResponse, Prompt, ScriptedPrompt, SessionPhase, SubmitFailurePolicy,
    TourEncoding, TourState, TourVariant, Transport, TransportError,
};

const SQUARE: &str = "[[0, 0], [10, 0], [0, 10], [10, 10]]";
const COLORED_SQUARE: &str = r##"{"cities": [[20, 20], [80, 20], [20, 80], [80, 80]], "colors": ["#00f", 1, 0, "#f90"], "width": 100, "height": 100}"##;

/// Transport mit vorab festgelegten Antworten, protokolliert alle Requests.
#[derive(Default)]
struct ScriptedTransport {
    responses: VecDeque<Result<HttpResponse, TransportError>>,
    requests: Vec<HttpRequest>,
}

impl ScriptedTransport {
    fn new(responses: impl IntoIterator<Item = Result<HttpResponse, TransportError>>) -> Self {
        Self {
            responses: responses.into_iter().collect(),
            requests: Vec::new(),
        }
    }

    fn gets(&self) -> usize {
        self.requests
            .iter()
            .filter(|r| r.method == HttpMethod::Get)
            .count()
    }

    fn paths(&self) -> Vec<&str> {
        self.requests.iter().map(|r| r.path.as_str()).collect()
    }
}

impl Transport for ScriptedTransport {
    fn request(&mut self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.push(request.clone());
        self.responses
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::new(404, "")))
    }
}

/// Prompt, dessen Protokoll nach dem Boxen im AppState lesbar bleibt.
#[derive(Clone)]
struct SharedPrompt(Rc<RefCell<ScriptedPrompt>>);

impl SharedPrompt {
    fn always(answer: bool) -> Self {
        Self(Rc::new(RefCell::new(ScriptedPrompt::always(answer))))
    }

    fn notices(&self) -> Vec<String> {
        self.0.borrow().notices.clone()
    }

    fn asked(&self) -> Vec<String> {
        self.0.borrow().asked.clone()
    }
}

impl Prompt for SharedPrompt {
    fn confirm(&mut self, prompt: &str) -> bool {
        self.0.borrow_mut().confirm(prompt)
    }

    fn notify(&mut self, message: &str) {
        self.0.borrow_mut().notify(message)
    }
}

fn state_with(options: AppOptions, prompt: &SharedPrompt) -> AppState {
    AppState::with_options(options).with_prompt(Box::new(prompt.clone()))
}

fn classic_options() -> AppOptions {
    AppOptions {
        variant: TourVariant::Classic,
        ..AppOptions::default()
    }
}

fn click(controller: &mut AppController, state: &mut AppState, x: f32, y: f32) {
    controller
        .handle_intent(
            state,
            AppIntent::CanvasClicked {
                physical: Vec2::new(x, y),
                canvas: CanvasMapping::identity(state.tour.logical_size()),
            },
        )
        .expect("Klick sollte ohne Fehler durchlaufen");
}

fn start(controller: &mut AppController, state: &mut AppState, transport: &mut ScriptedTransport) {
    controller
        .handle_intent(state, AppIntent::SessionStartRequested)
        .expect("Start sollte ohne Fehler durchlaufen");
    controller
        .pump_blocking(state, transport)
        .expect("Pump sollte ohne Fehler durchlaufen");
}

#[test]
fn test_not_found_exhausts_session_and_stops_fetching() {
    let mut controller = AppController::new();
    let prompt = SharedPrompt::always(false);
    let mut state = state_with(AppOptions::default(), &prompt);
    let mut transport = ScriptedTransport::new([Ok(HttpResponse::new(404, "Not Found"))]);

    start(&mut controller, &mut state, &mut transport);

    assert!(state.session.state().exhausted);
    assert!(state.session.may_discard());
    assert_eq!(transport.gets(), 1);
    assert_eq!(prompt.notices(), vec!["No more problems!".to_string()]);

    // Weitere Starts oder Einreichungen erzeugen keinen GET mehr
    controller
        .handle_intent(&mut state, AppIntent::SessionStartRequested)
        .expect("robust");
    controller
        .handle_intent(&mut state, AppIntent::SubmitRequested)
        .expect("robust");
    controller
        .pump_blocking(&mut state, &mut transport)
        .expect("robust");
    assert_eq!(transport.gets(), 1);
}

#[test]
fn test_incomplete_submit_keeps_index_and_notifies() {
    let mut controller = AppController::new();
    let prompt = SharedPrompt::always(false);
    let mut state = state_with(classic_options(), &prompt);
    let mut transport = ScriptedTransport::new([Ok(HttpResponse::new(200, SQUARE))]);

    start(&mut controller, &mut state, &mut transport);
    click(&mut controller, &mut state, 0.5, 0.5);
    click(&mut controller, &mut state, 9.5, 0.5);

    controller
        .handle_intent(&mut state, AppIntent::SubmitRequested)
        .expect("Submit sollte robust sein");

    assert_eq!(state.session.problem_index(), 0);
    assert!(state.outbox.is_empty());
    assert_eq!(state.tour.tour(), vec![0, 1]);
    assert_eq!(prompt.notices(), vec!["Tour incomplete!".to_string()]);
    assert_eq!(state.ui.status_message.as_deref(), Some("Tour incomplete!"));
}

#[test]
fn test_full_classic_round_advances_to_next_problem() {
    let mut controller = AppController::new();
    let prompt = SharedPrompt::always(false);
    let mut state = state_with(classic_options(), &prompt);
    let mut transport = ScriptedTransport::new([
        Ok(HttpResponse::new(200, SQUARE)),
        Ok(HttpResponse::new(200, "")),
        Ok(HttpResponse::new(200, SQUARE)),
    ]);

    start(&mut controller, &mut state, &mut transport);
    assert_eq!(state.session.phase(), SessionPhase::Ready);
    assert_eq!(state.session.display_number(), 1);

    for (x, y) in [(0.5, 0.5), (9.5, 0.2), (0.3, 9.8), (10.2, 10.1)] {
        click(&mut controller, &mut state, x, y);
    }
    assert_eq!(state.tour.tour(), vec![0, 1, 2, 3]);
    assert_eq!(state.tour.state(), TourState::Complete);
    assert!(state.session.state().tour_complete);

    controller
        .handle_intent(&mut state, AppIntent::SubmitRequested)
        .expect("Submit");
    assert!(state.tour.cities().is_empty());

    controller
        .pump_blocking(&mut state, &mut transport)
        .expect("Pump");

    assert_eq!(
        transport.paths(),
        vec!["/api/0/cities", "/api/0/tour", "/api/1/cities"]
    );
    assert_eq!(
        transport.requests[1].body.as_deref(),
        Some("data=%5B0%2C1%2C2%2C3%5D")
    );
    assert_eq!(state.session.display_number(), 2);
    assert_eq!(state.city_count(), 4);
    assert!(state.tour.tour().is_empty());
}

#[test]
fn test_colored_submission_sends_cities_and_timestamps() {
    let mut controller = AppController::new();
    let prompt = SharedPrompt::always(false);
    let options = AppOptions {
        tour_encoding: TourEncoding::Cities,
        ..AppOptions::default()
    };
    let mut state = state_with(options, &prompt);
    let mut transport = ScriptedTransport::new([
        Ok(HttpResponse::new(200, COLORED_SQUARE)),
        Ok(HttpResponse::new(200, "")),
    ]);

    start(&mut controller, &mut state, &mut transport);
    for (x, y) in [(21.0, 21.0), (79.0, 21.0), (79.0, 79.0), (21.0, 79.0)] {
        click(&mut controller, &mut state, x, y);
    }
    assert!(state.tour.is_complete());

    controller
        .handle_intent(&mut state, AppIntent::SubmitRequested)
        .expect("Submit");
    controller
        .pump_blocking(&mut state, &mut transport)
        .expect("Pump");

    let body = transport.requests[1].body.clone().expect("POST-Body");
    assert!(body.starts_with("data="));
    let json: String = url::form_urlencoded::parse(body.as_bytes())
        .find(|(k, _)| k == "data")
        .map(|(_, v)| v.into_owned())
        .expect("data-Feld");
    let payload: serde_json::Value = serde_json::from_str(&json).expect("JSON");
    assert_eq!(payload[0][0], serde_json::json!([20.0, 20.0, "#00f"]));
    assert_eq!(payload[0][2], serde_json::json!([80.0, 80.0, "#f90"]));
    assert_eq!(payload[1].as_array().map(Vec::len), Some(4));

    // Nach Erschöpfung darf geschlossen werden
    assert!(state.session.state().exhausted);
}

#[test]
fn test_click_far_from_cities_is_ignored_in_colored_variant() {
    let mut controller = AppController::new();
    let prompt = SharedPrompt::always(false);
    let mut state = state_with(AppOptions::default(), &prompt);
    let mut transport = ScriptedTransport::new([Ok(HttpResponse::new(200, COLORED_SQUARE))]);

    start(&mut controller, &mut state, &mut transport);
    click(&mut controller, &mut state, 50.0, 50.0);

    assert!(state.tour.tour().is_empty());
    assert!(state.tour.timestamps().is_empty());
    assert!(state.ui.last_rejection.is_some());
}

#[test]
fn test_click_while_submitting_finds_no_city() {
    let mut controller = AppController::new();
    let prompt = SharedPrompt::always(false);
    let mut state = state_with(classic_options(), &prompt);
    let mut transport = ScriptedTransport::new([Ok(HttpResponse::new(200, SQUARE))]);

    start(&mut controller, &mut state, &mut transport);
    for (x, y) in [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0), (10.0, 10.0)] {
        click(&mut controller, &mut state, x, y);
    }
    controller
        .handle_intent(&mut state, AppIntent::SubmitRequested)
        .expect("Submit");

    // Request noch nicht gesendet: keine Städte geladen
    click(&mut controller, &mut state, 0.0, 0.0);
    assert!(matches!(
        state.ui.last_rejection,
        Some(tsp_tour_collector::ClickRejection::NoEligibleCity)
    ));
    assert_eq!(state.session.phase(), SessionPhase::Submitting);
}

#[test]
fn test_stay_on_failure_refetches_same_problem() {
    let mut controller = AppController::new();
    let prompt = SharedPrompt::always(false);
    let options = AppOptions {
        variant: TourVariant::Classic,
        submit_failure_policy: SubmitFailurePolicy::StayOnFailure,
        ..AppOptions::default()
    };
    let mut state = state_with(options, &prompt);
    let mut transport = ScriptedTransport::new([
        Ok(HttpResponse::new(200, SQUARE)),
        Err(TransportError::Request {
            path: "/api/0/tour".into(),
            message: "connection reset".into(),
        }),
        Ok(HttpResponse::new(200, SQUARE)),
    ]);

    start(&mut controller, &mut state, &mut transport);
    for (x, y) in [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0), (10.0, 10.0)] {
        click(&mut controller, &mut state, x, y);
    }
    controller
        .handle_intent(&mut state, AppIntent::SubmitRequested)
        .expect("Submit");
    controller
        .pump_blocking(&mut state, &mut transport)
        .expect("Pump");

    assert_eq!(transport.paths()[2], "/api/0/cities");
    assert_eq!(state.session.problem_index(), 0);
    assert_eq!(state.session.phase(), SessionPhase::Ready);
}

#[test]
fn test_colored_clear_requires_confirmation() {
    let mut controller = AppController::new();
    let prompt = SharedPrompt::always(false);
    let mut state = state_with(AppOptions::default(), &prompt);
    let mut transport = ScriptedTransport::new([Ok(HttpResponse::new(200, COLORED_SQUARE))]);

    start(&mut controller, &mut state, &mut transport);
    click(&mut controller, &mut state, 21.0, 21.0);

    controller
        .handle_intent(&mut state, AppIntent::ClearRequested)
        .expect("Clear");
    assert_eq!(state.tour.tour(), vec![0]);
    assert_eq!(state.tour.timestamps().len(), 1);
    assert_eq!(prompt.asked(), vec!["Clear existing tour?".to_string()]);
}

#[test]
fn test_classic_clear_restarts_without_prompt() {
    let mut controller = AppController::new();
    let prompt = SharedPrompt::always(false);
    let mut state = state_with(classic_options(), &prompt);
    let mut transport = ScriptedTransport::new([Ok(HttpResponse::new(200, SQUARE))]);

    start(&mut controller, &mut state, &mut transport);
    click(&mut controller, &mut state, 0.0, 0.0);
    click(&mut controller, &mut state, 10.0, 0.0);

    controller
        .handle_intent(&mut state, AppIntent::ClearRequested)
        .expect("Clear");
    assert!(state.tour.tour().is_empty());
    assert_eq!(state.tour.state(), TourState::Empty);
    assert_eq!(state.city_count(), 4);
    assert!(prompt.asked().is_empty());
}

#[test]
fn test_undo_logs_command_and_reopens_tour() {
    let mut controller = AppController::new();
    let prompt = SharedPrompt::always(false);
    let mut state = state_with(classic_options(), &prompt);
    let mut transport = ScriptedTransport::new([Ok(HttpResponse::new(200, SQUARE))]);

    start(&mut controller, &mut state, &mut transport);
    for (x, y) in [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0), (10.0, 10.0)] {
        click(&mut controller, &mut state, x, y);
    }
    assert!(state.session.state().tour_complete);

    controller
        .handle_intent(&mut state, AppIntent::UndoRequested)
        .expect("Undo");

    assert!(!state.session.state().tour_complete);
    assert_eq!(state.tour.state(), TourState::PartialSelection { current: 2 });
    let last = state
        .command_log
        .entries()
        .last()
        .expect("Es sollte ein Command geloggt sein");
    assert!(matches!(last, AppCommand::UndoLastStep));
}

#[test]
fn test_close_is_guarded_until_exhausted() {
    let mut controller = AppController::new();
    let prompt = SharedPrompt::always(false);
    let mut state = state_with(AppOptions::default(), &prompt);
    let mut transport = ScriptedTransport::new([Ok(HttpResponse::new(200, COLORED_SQUARE))]);
    start(&mut controller, &mut state, &mut transport);

    controller
        .handle_intent(&mut state, AppIntent::CloseRequested)
        .expect("Close");
    assert!(!state.should_exit);
    assert_eq!(prompt.asked().len(), 1);

    // Classic-Variante fragt nie nach
    let mut classic = state_with(classic_options(), &prompt);
    controller
        .handle_intent(&mut classic, AppIntent::CloseRequested)
        .expect("Close");
    assert!(classic.should_exit);
    assert_eq!(prompt.asked().len(), 1);
}

#[test]
fn test_completion_notice_only_while_complete() {
    let mut controller = AppController::new();
    let prompt = SharedPrompt::always(false);
    let mut state = state_with(classic_options(), &prompt);
    let mut transport = ScriptedTransport::new([Ok(HttpResponse::new(200, SQUARE))]);

    start(&mut controller, &mut state, &mut transport);
    for (x, y) in [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0), (10.0, 10.0)] {
        click(&mut controller, &mut state, x, y);
    }
    assert!(state.ui.completion_notice_at.is_some());

    controller
        .handle_intent(&mut state, AppIntent::CompletionNoticeDue)
        .expect("Notice");
    assert_eq!(prompt.notices(), vec!["Tour complete!".to_string()]);
    assert!(state.ui.completion_notice_at.is_none());
}
