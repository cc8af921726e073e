// ============================================================================
// MAP PICKER - Un solo marcador, movido con cada click
// ============================================================================

use crate::config::CONFIG;
use crate::models::Coordinates;
use crate::utils::constants::PICKER_ZOOM;
use super::traits::{MapError, MapMarker, MapSurface, MapViewConfig};

type SelectCallback = Box<dyn Fn(Coordinates)>;

pub struct MapPicker<S: MapSurface> {
    surface: S,
    selected: Option<Coordinates>,
    on_select: SelectCallback,
}

impl<S: MapSurface> MapPicker<S> {
    pub fn new<F>(surface: S, on_select: F) -> Self
    where
        F: Fn(Coordinates) + 'static,
    {
        Self {
            surface,
            selected: None,
            on_select: Box::new(on_select),
        }
    }

    /// Centro inicial: la coordenada dada o el centro por defecto.
    /// Cada render vuelve a montar el picker, así que un punto nuevo re-centra aquí.
    pub fn mount(&mut self, container_id: &str, initial: Option<Coordinates>) -> Result<(), MapError> {
        let initial = initial.filter(Coordinates::is_valid);
        let center = initial.unwrap_or_else(default_center);
        self.surface.mount(
            container_id,
            &MapViewConfig {
                center,
                zoom: PICKER_ZOOM,
                scroll_wheel_zoom: true,
            },
        )?;
        self.selected = initial;
        self.render_marker()
    }

    /// Click del usuario: mueve el marcador y avisa al controlador
    pub fn handle_click(&mut self, point: Coordinates) -> Result<(), MapError> {
        if !point.is_valid() {
            return Err(MapError::InvalidCoordinates(point.latitude, point.longitude));
        }
        self.selected = Some(point);
        self.render_marker()?;
        log::debug!("📍 [PICKER] Ubicación elegida ({:.5}, {:.5})", point.latitude, point.longitude);
        (self.on_select)(point);
        Ok(())
    }

    pub fn selected(&self) -> Option<Coordinates> {
        self.selected
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn destroy(&mut self) {
        self.surface.destroy();
    }

    fn render_marker(&mut self) -> Result<(), MapError> {
        let markers: Vec<MapMarker> = self
            .selected
            .map(|p| MapMarker::new(p, "Selected location"))
            .into_iter()
            .collect();
        self.surface.set_markers(&markers)
    }
}

pub fn default_center() -> Coordinates {
    Coordinates::new(
        CONFIG.map_config.default_center_lat,
        CONFIG.map_config.default_center_lng,
    )
}
