//! Application-Layer: Controller, State, Events und Sitzung.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;
mod intent_mapping;
pub mod render_scene;
/// Problem-Sitzung
///
/// Dieses Modul steuert Laden, Einreichen und Weiterschalten der Probleme.
pub mod session;
pub mod state;

pub use command_log::CommandLog;
pub use controller::AppController;
pub use events::{AppCommand, AppIntent};
pub use render_scene::build as build_render_scene;
pub use session::{ProblemSession, SessionError, SessionPhase, SessionState};
pub use state::{AppState, UiState};
