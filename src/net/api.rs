//! Wire-Format des Backends: Problem-Payload, Tour-Einreichung, Request-Pfade.

use crate::core::{City, ColorToken, Problem, TourBuilder, TourEncoding, TourVariant};
use glam::Vec2;
use serde::Deserialize;
use serde_json::{json, Value};

/// Fehler beim Parsen eines Problem-Payloads.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// Kein gültiges JSON oder unbekannte Struktur
    #[error("malformed problem payload: {0}")]
    Json(#[from] serde_json::Error),
    /// `colors` hat nicht dieselbe Länge wie `cities`
    #[error("{colors} colors for {cities} cities")]
    ColorCountMismatch {
        /// Anzahl Städte
        cities: usize,
        /// Anzahl Farben
        colors: usize,
    },
    /// Negative oder nicht-endliche Koordinate
    #[error("city {index} has an invalid coordinate")]
    InvalidCoordinate {
        /// Index der Stadt
        index: usize,
    },
    /// Nicht-positive oder nicht-endliche Canvas-Größe
    #[error("invalid canvas size {width} x {height}")]
    InvalidSize {
        /// Deklarierte Breite
        width: f64,
        /// Deklarierte Höhe
        height: f64,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawProblem {
    Bare(Vec<[f64; 2]>),
    Colored {
        cities: Vec<[f64; 2]>,
        #[serde(default)]
        colors: Option<Vec<Value>>,
        #[serde(default)]
        width: Option<f64>,
        #[serde(default)]
        height: Option<f64>,
    },
}

/// Geparster Problem-Payload (`GET /api/{index}/cities`).
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemPayload {
    /// Städte-Koordinaten in Index-Reihenfolge, unverändert vom Server
    pub cities: Vec<[f64; 2]>,
    /// Farb-Tokens parallel zu `cities`
    pub colors: Option<Vec<ColorToken>>,
    /// Deklarierte logische Größe (fehlt bei der Classic-Variante)
    pub size: Option<Vec2>,
}

impl ProblemPayload {
    /// Parst den Response-Body.
    ///
    /// Akzeptiert eine nackte Liste von `[x, y]`-Paaren oder ein Objekt
    /// `{cities, colors, width, height}`.
    pub fn parse(body: &str) -> Result<Self, PayloadError> {
        let (cities, colors, width, height) = match serde_json::from_str::<RawProblem>(body)? {
            RawProblem::Bare(cities) => (cities, None, None, None),
            RawProblem::Colored {
                cities,
                colors,
                width,
                height,
            } => (cities, colors, width, height),
        };

        if let Some(colors) = &colors {
            if colors.len() != cities.len() {
                return Err(PayloadError::ColorCountMismatch {
                    cities: cities.len(),
                    colors: colors.len(),
                });
            }
        }

        // Hit-Testing rechnet in f32: die Prüfung gilt dem gecasteten Wert
        for (index, [x, y]) in cities.iter().enumerate() {
            let valid = |v: f64| {
                let v = v as f32;
                v.is_finite() && v >= 0.0
            };
            if !valid(*x) || !valid(*y) {
                return Err(PayloadError::InvalidCoordinate { index });
            }
        }

        let size = match (width, height) {
            (None, None) => None,
            (w, h) => {
                let width = w.unwrap_or(f64::NAN);
                let height = h.unwrap_or(f64::NAN);
                let valid = |v: f64| {
                    let v = v as f32;
                    v.is_finite() && v > 0.0
                };
                if !valid(width) || !valid(height) {
                    return Err(PayloadError::InvalidSize { width, height });
                }
                Some(Vec2::new(width as f32, height as f32))
            }
        };

        Ok(Self {
            cities,
            colors: colors.map(|c| c.into_iter().map(ColorToken).collect()),
            size,
        })
    }

    /// Wandelt den Payload in ein ladbares Problem.
    pub fn into_problem(self) -> Problem {
        let colors = self.colors.unwrap_or_default();
        let mut colors = colors.into_iter();
        let cities = self
            .cities
            .iter()
            .enumerate()
            .map(|(index, &[x, y])| {
                let city = City::new(index, Vec2::new(x as f32, y as f32)).with_source([x, y]);
                match colors.next() {
                    Some(color) => city.with_color(color),
                    None => city,
                }
            })
            .collect();

        let problem = Problem::new(cities);
        match self.size {
            Some(size) => problem.with_logical_size(size),
            None => problem,
        }
    }
}

/// Serialisierte Tour für `POST /api/{index}/tour`.
#[derive(Debug, Clone, PartialEq)]
pub struct TourSubmission {
    payload: Value,
}

impl TourSubmission {
    /// Baut die Einreichung aus dem aktuellen Tour-Zustand.
    ///
    /// Classic: nackte Index-Liste. Colored: `[tour, timestamps]`, die Tour je nach
    /// `encoding` als Indizes oder als `[x, y, color]`-Tupel.
    pub fn from_tour(tour: &TourBuilder, encoding: TourEncoding) -> Self {
        let indices = tour.tour();
        let payload = match tour.rules().variant {
            TourVariant::Classic => json!(indices),
            TourVariant::Colored => {
                let steps: Vec<Value> = match encoding {
                    TourEncoding::Indices => indices.iter().map(|&i| json!(i)).collect(),
                    TourEncoding::Cities => indices
                        .iter()
                        .filter_map(|&i| tour.cities().get(i))
                        .map(|city| {
                            let color = city.color.as_ref().map_or(Value::Null, |c| c.0.clone());
                            let [x, y] = city.wire_position();
                            json!([x, y, color])
                        })
                        .collect(),
                };
                json!([steps, tour.timestamps()])
            }
        };
        Self { payload }
    }

    /// JSON-Payload vor dem URL-Encoding.
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Request-Body `data=<url-encoded JSON>`.
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("data", &self.payload.to_string())
            .finish()
    }
}

/// HTTP-Methode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
}

/// Transport-unabhängiger HTTP-Request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Methode
    pub method: HttpMethod,
    /// Pfad relativ zur Server-URL
    pub path: String,
    /// Form-encoded Body (nur POST)
    pub body: Option<String>,
}

/// Antwort des Backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP-Status
    pub status: u16,
    /// Response-Body
    pub body: String,
}

impl HttpResponse {
    /// Erstellt eine Antwort.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Ob der Status 200 ist.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Ob der Status im 2xx-Bereich liegt.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Fachlicher Request an das Backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    /// `GET /api/{index}/cities`
    FetchProblem {
        /// Problem-Index
        index: usize,
    },
    /// `POST /api/{index}/tour`
    SubmitTour {
        /// Problem-Index
        index: usize,
        /// Form-encoded Body
        body: String,
    },
}

impl ApiRequest {
    /// Problem-Index des Requests.
    pub fn index(&self) -> usize {
        match self {
            ApiRequest::FetchProblem { index } | ApiRequest::SubmitTour { index, .. } => *index,
        }
    }

    /// Übersetzt in einen HTTP-Request.
    pub fn to_http(&self) -> HttpRequest {
        match self {
            ApiRequest::FetchProblem { index } => HttpRequest {
                method: HttpMethod::Get,
                path: format!("/api/{}/cities", index),
                body: None,
            },
            ApiRequest::SubmitTour { index, body } => HttpRequest {
                method: HttpMethod::Post,
                path: format!("/api/{}/tour", index),
                body: Some(body.clone()),
            },
        }
    }
}
