//! Core-Domänentypen: Städte, Problem, Tour-Zustandsautomat, Canvas-Mapping.

pub mod canvas;
pub mod city;
pub mod geometry;
pub mod problem;
pub mod prompt;
pub mod rules;
/// Tour-Aufbau
///
/// Zustandsautomat über Städte, Tour, Zeitstempel und Vollständigkeit.
pub mod tour;

pub use canvas::{physical_to_logical, CanvasMapping, DEFAULT_LOGICAL_SIZE};
pub use city::{parse_hex_color, City, ColorToken, COLOR_PALETTE};
pub use geometry::{closed_tour_length, distance};
pub use problem::Problem;
pub use prompt::{Clock, Prompt, ScriptedPrompt, SystemClock};
pub use rules::{
    CompletionRule, SubmitFailurePolicy, TimestampUndo, TourEncoding, TourRules, TourVariant,
};
pub use tour::{
    ClickOutcome, ClickRejection, TourBuilder, TourError, TourState, CLEAR_TOUR_PROMPT,
};
