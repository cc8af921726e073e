use serde::Serialize;
use thiserror::Error;
use crate::models::{Coordinates, IssueStatus};

/// Superficie de mapa común (Leaflet en web, grabadora en tests)
pub trait MapSurface {
    /// Crear el mapa dentro de `container_id`
    fn mount(&mut self, container_id: &str, config: &MapViewConfig) -> Result<(), MapError>;

    /// Reemplazar todos los marcadores
    fn set_markers(&mut self, markers: &[MapMarker]) -> Result<(), MapError>;

    fn is_ready(&self) -> bool;

    /// Liberar el mapa (la vista se va a re-renderizar)
    fn destroy(&mut self);
}

/// Configuración inicial del mapa
#[derive(Debug, Clone, PartialEq)]
pub struct MapViewConfig {
    pub center: Coordinates,
    pub zoom: f64,
    pub scroll_wheel_zoom: bool,
}

/// Marcador con popup; `status` decide el color
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub lat: f64,
    pub lng: f64,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<IssueStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
}

impl MapMarker {
    pub fn new(position: Coordinates, label: impl Into<String>) -> Self {
        Self {
            lat: position.latitude,
            lng: position.longitude,
            label: label.into(),
            status: None,
            color: None,
        }
    }

    pub fn with_status(mut self, status: IssueStatus) -> Self {
        self.status = Some(status);
        self.color = Some(status.marker_color());
        self
    }

    pub fn position(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    #[error("Map is not ready")]
    NotReady,
    #[error("Invalid coordinates ({0}, {1})")]
    InvalidCoordinates(f64, f64),
    #[error("Map library error: {0}")]
    Library(String),
}
