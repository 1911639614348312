//! Netzwerk-Layer: Wire-Format, HTTP-Transport und Hintergrund-Worker.

pub mod api;
pub mod transport;
pub mod worker;

pub use api::{
    ApiRequest, HttpMethod, HttpRequest, HttpResponse, PayloadError, ProblemPayload,
    TourSubmission,
};
pub use transport::{HttpTransport, Transport, TransportError};
pub use worker::{ApiReply, NetworkWorker};
