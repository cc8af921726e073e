// ============================================================================
// MAP VIEWER - Marcadores fijos de solo lectura
// ============================================================================

use crate::models::{Coordinates, Issue};
use super::picker::default_center;
use super::traits::{MapError, MapMarker, MapSurface, MapViewConfig};

pub struct MapViewer<S: MapSurface> {
    surface: S,
    markers: Vec<MapMarker>,
}

impl<S: MapSurface> MapViewer<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            markers: Vec::new(),
        }
    }

    /// Rueda del ratón deshabilitada: la página hace scroll, no el mapa
    pub fn mount(
        &mut self,
        container_id: &str,
        center: Coordinates,
        zoom: f64,
        markers: Vec<MapMarker>,
    ) -> Result<(), MapError> {
        self.surface.mount(
            container_id,
            &MapViewConfig {
                center,
                zoom,
                scroll_wheel_zoom: false,
            },
        )?;
        self.set_markers(markers)
    }

    pub fn set_markers(&mut self, markers: Vec<MapMarker>) -> Result<(), MapError> {
        let (valid, invalid): (Vec<_>, Vec<_>) =
            markers.into_iter().partition(|m| m.position().is_valid());
        if !invalid.is_empty() {
            log::warn!("⚠️ [MAP] {} marcadores con coordenadas inválidas omitidos", invalid.len());
        }
        self.surface.set_markers(&valid)?;
        self.markers = valid;
        Ok(())
    }

    pub fn markers(&self) -> &[MapMarker] {
        &self.markers
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn destroy(&mut self) {
        self.surface.destroy();
    }
}

/// Un marcador por issue, coloreado según su estado
pub fn markers_for_issues(issues: &[Issue]) -> Vec<MapMarker> {
    issues
        .iter()
        .map(|issue| MapMarker::new(issue.coordinates(), issue.title.clone()).with_status(issue.status))
        .collect()
}

/// Centro de la página de mapa: primer issue, o el centro por defecto
pub fn center_for_issues(issues: &[Issue]) -> Coordinates {
    issues
        .first()
        .map(Issue::coordinates)
        .unwrap_or_else(default_center)
}
