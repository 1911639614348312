use crate::core::CanvasMapping;
use crate::net::{HttpResponse, TransportError};

/// App-Commands.
/// Commands sind mutierende Operationen, ausgeführt vom Controller.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Sitzung bei Problem 0 starten
    StartSession,
    /// Nächste Stadt zum Klickpunkt wählen
    PickCity {
        physical: glam::Vec2,
        canvas: CanvasMapping,
    },
    /// Letzten Tour-Schritt entfernen
    UndoLastStep,
    /// Tour nach Rückfrage verwerfen
    ClearTour,
    /// Vollständige Tour einreichen
    SubmitTour,
    /// Problem-Antwort in den Tour-Builder übernehmen
    ApplyProblemResponse {
        result: Result<HttpResponse, TransportError>,
    },
    /// Submit-Antwort verarbeiten und weiterschalten
    ApplySubmitResponse {
        result: Result<HttpResponse, TransportError>,
    },
    /// "Tour complete!" anzeigen
    ShowCompletionNotice,
    /// Schließen nur nach Unload-Guard
    GuardedClose,
}
