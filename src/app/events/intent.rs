use crate::core::CanvasMapping;
use crate::net::{ApiReply, ApiRequest, HttpResponse, TransportError};

/// App-Intent Events.
/// Intents sind Eingaben aus UI/System ohne direkte Mutationslogik.
#[derive(Debug, Clone)]
pub enum AppIntent {
    /// Sitzung starten (erstes Problem laden)
    SessionStartRequested,
    /// Klick auf die Zeichenfläche (physische Koordinaten)
    CanvasClicked {
        physical: glam::Vec2,
        canvas: CanvasMapping,
    },
    /// Letzten Tour-Schritt entfernen
    UndoRequested,
    /// Tour verwerfen (mit Rückfrage)
    ClearRequested,
    /// Tour einreichen
    SubmitRequested,
    /// Antwort auf einen Problem-Fetch
    ProblemResponseReceived {
        result: Result<HttpResponse, TransportError>,
    },
    /// Antwort auf eine Tour-Einreichung
    SubmitResponseReceived {
        result: Result<HttpResponse, TransportError>,
    },
    /// Verzögerter "Tour complete!"-Hinweis ist fällig
    CompletionNoticeDue,
    /// Fenster soll geschlossen werden (Unload-Guard)
    CloseRequested,
}

impl From<ApiReply> for AppIntent {
    fn from(reply: ApiReply) -> Self {
        match reply.request {
            ApiRequest::FetchProblem { .. } => AppIntent::ProblemResponseReceived {
                result: reply.result,
            },
            ApiRequest::SubmitTour { .. } => AppIntent::SubmitResponseReceived {
                result: reply.result,
            },
        }
    }
}
