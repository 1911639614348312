//! TSP Tour Collector Library.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod net;
pub mod render;
pub mod shared;
pub mod ui;

pub use app::{
    AppCommand, AppController, AppIntent, AppState, ProblemSession, SessionError, SessionPhase,
    SessionState, UiState,
};
pub use core::{
    CanvasMapping, City, ClickOutcome, ClickRejection, CompletionRule, Problem, Prompt,
    ScriptedPrompt, SubmitFailurePolicy, TimestampUndo, TourBuilder, TourEncoding, TourError,
    TourRules, TourState, TourVariant,
};
pub use net::{
    ApiReply, ApiRequest, HttpMethod, HttpRequest, HttpResponse, HttpTransport, NetworkWorker,
    PayloadError, ProblemPayload, TourSubmission, Transport, TransportError,
};
pub use shared::{AppOptions, RenderScene};
