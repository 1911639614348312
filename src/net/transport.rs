//! HTTP-Transport zum Backend.

use super::api::{HttpMethod, HttpRequest, HttpResponse};
use reqwest::header::CONTENT_TYPE;

/// Netzwerkfehler (Verbindung, DNS, abgebrochene Antwort).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Der Client konnte nicht erstellt werden
    #[error("http client setup failed: {0}")]
    Setup(String),
    /// Request ist fehlgeschlagen
    #[error("request to {path} failed: {message}")]
    Request {
        /// Request-Pfad
        path: String,
        /// Fehlermeldung des Clients
        message: String,
    },
    /// Der Netzwerk-Worker läuft nicht mehr
    #[error("network worker disconnected")]
    Disconnected,
}

/// Führt einen HTTP-Request synchron aus.
pub trait Transport {
    /// Sendet den Request und liefert die Antwort (beliebiger Status).
    fn request(&mut self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blockierender `reqwest`-Client gegen eine Basis-URL. Kein Timeout, keine Retries.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpTransport {
    /// Erstellt einen Transport für `base_url` (z.B. `http://127.0.0.1:5000`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<std::time::Duration>)
            .build()
            .map_err(|e| TransportError::Setup(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Basis-URL ohne abschließenden Slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    fn request(&mut self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = format!("{}{}", self.base_url, request.path);
        let builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self
                .client
                .post(&url)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(request.body.clone().unwrap_or_default()),
        };

        let failed = |e: reqwest::Error| TransportError::Request {
            path: request.path.clone(),
            message: e.to_string(),
        };

        let response = builder.send().map_err(failed)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(failed)?;
        log::debug!("{:?} {} → {}", request.method, request.path, status);

        Ok(HttpResponse { status, body })
    }
}
