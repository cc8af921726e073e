// ============================================================================
// LEAFLET FFI - Foreign Function Interface para JavaScript (static/maps.js)
// ============================================================================
// Solo wrappers para funciones JS - Sin estado, sin lógica
// ============================================================================

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = initLeafletMap, catch)]
    pub fn init_map(
        container_id: &str,
        lat: f64,
        lng: f64,
        zoom: f64,
        scroll_wheel_zoom: bool,
    ) -> Result<(), JsValue>;

    /// `markers_json`: `[{lat, lng, label, status?, color?}]`
    #[wasm_bindgen(js_name = setLeafletMarkers, catch)]
    pub fn set_map_markers(container_id: &str, markers_json: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(js_name = onLeafletClick, catch)]
    pub fn on_map_click(container_id: &str, callback: &Closure<dyn FnMut(f64, f64)>) -> Result<(), JsValue>;

    #[wasm_bindgen(js_name = destroyLeafletMap, catch)]
    pub fn destroy_map(container_id: &str) -> Result<(), JsValue>;
}
