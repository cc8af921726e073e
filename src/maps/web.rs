use wasm_bindgen::prelude::*;
use crate::models::Coordinates;
use crate::utils::leaflet_ffi;
use super::traits::{MapError, MapMarker, MapSurface, MapViewConfig};

/// Superficie Leaflet (funciones JS en static/maps.js)
pub struct LeafletSurface {
    container_id: String,
    ready: bool,
    // El closure vive mientras viva el mapa
    click_handler: Option<Closure<dyn FnMut(f64, f64)>>,
}

impl LeafletSurface {
    pub fn new() -> Self {
        Self {
            container_id: String::new(),
            ready: false,
            click_handler: None,
        }
    }

    /// Registrar el callback de click (picker)
    pub fn on_click<F>(&mut self, handler: F) -> Result<(), MapError>
    where
        F: FnMut(Coordinates) + 'static,
    {
        if !self.ready {
            return Err(MapError::NotReady);
        }
        let mut handler = handler;
        let closure = Closure::wrap(Box::new(move |lat: f64, lng: f64| {
            handler(Coordinates::new(lat, lng));
        }) as Box<dyn FnMut(f64, f64)>);
        leaflet_ffi::on_map_click(&self.container_id, &closure).map_err(js_error)?;
        self.click_handler = Some(closure);
        Ok(())
    }
}

impl Default for LeafletSurface {
    fn default() -> Self {
        Self::new()
    }
}

fn js_error(e: JsValue) -> MapError {
    MapError::Library(format!("{:?}", e))
}

impl MapSurface for LeafletSurface {
    fn mount(&mut self, container_id: &str, config: &MapViewConfig) -> Result<(), MapError> {
        log::info!("🗺️ [MAP] Inicializando Leaflet en #{}", container_id);
        leaflet_ffi::init_map(
            container_id,
            config.center.latitude,
            config.center.longitude,
            config.zoom,
            config.scroll_wheel_zoom,
        )
        .map_err(js_error)?;
        self.container_id = container_id.to_string();
        self.ready = true;
        Ok(())
    }

    fn set_markers(&mut self, markers: &[MapMarker]) -> Result<(), MapError> {
        if !self.ready {
            return Err(MapError::NotReady);
        }
        let json = serde_json::to_string(markers).map_err(|e| MapError::Library(e.to_string()))?;
        leaflet_ffi::set_map_markers(&self.container_id, &json).map_err(js_error)
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn destroy(&mut self) {
        if self.ready {
            let _ = leaflet_ffi::destroy_map(&self.container_id);
            self.ready = false;
        }
        self.click_handler = None;
    }
}
