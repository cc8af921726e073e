// ============================================================================
// MAP WIDGETS - Montaje de mapas Leaflet después del render
// ============================================================================
// El contenedor solo existe cuando el DOM ya está en el documento, así que
// el montaje se programa con Timeout(0). Antes de cada re-render App llama a
// `destroy_all()` para liberar los mapas anteriores.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use gloo_timers::callback::Timeout;
use crate::maps::{LeafletSurface, MapMarker, MapPicker, MapViewer};
use crate::models::Coordinates;

enum MountedMap {
    Picker(Rc<RefCell<MapPicker<LeafletSurface>>>),
    Viewer(MapViewer<LeafletSurface>),
}

thread_local! {
    static MOUNTED: RefCell<Vec<MountedMap>> = RefCell::new(Vec::new());
    // Sube en cada destroy_all(): un Timeout de un render anterior ya no monta nada
    static GENERATION: Cell<u64> = const { Cell::new(0) };
}

fn generation() -> u64 {
    GENERATION.with(Cell::get)
}

pub fn destroy_all() {
    GENERATION.with(|g| g.set(g.get() + 1));
    let maps: Vec<MountedMap> = MOUNTED.with(|m| m.borrow_mut().drain(..).collect());
    for map in maps {
        match map {
            MountedMap::Picker(picker) => picker.borrow_mut().destroy(),
            MountedMap::Viewer(mut viewer) => viewer.destroy(),
        }
    }
}

/// Mapa de solo lectura con marcadores
pub fn schedule_viewer(container_id: &str, center: Coordinates, zoom: f64, markers: Vec<MapMarker>) {
    let container_id = container_id.to_string();
    let scheduled = generation();
    Timeout::new(0, move || {
        if scheduled != generation() {
            return;
        }
        let mut viewer = MapViewer::new(LeafletSurface::new());
        match viewer.mount(&container_id, center, zoom, markers) {
            Ok(()) => MOUNTED.with(|m| m.borrow_mut().push(MountedMap::Viewer(viewer))),
            Err(e) => log::error!("❌ [MAP] No se pudo montar #{}: {}", container_id, e),
        }
    })
    .forget();
}

/// Picker de ubicación; `on_select` recibe cada click válido
pub fn schedule_picker<F>(container_id: &str, initial: Option<Coordinates>, on_select: F)
where
    F: Fn(Coordinates) + 'static,
{
    let container_id = container_id.to_string();
    let scheduled = generation();
    Timeout::new(0, move || {
        if scheduled != generation() {
            return;
        }
        let picker = Rc::new(RefCell::new(MapPicker::new(LeafletSurface::new(), on_select)));
        if let Err(e) = picker.borrow_mut().mount(&container_id, initial) {
            log::error!("❌ [MAP] No se pudo montar el picker #{}: {}", container_id, e);
            return;
        }

        // El closure de click solo guarda un Weak: el picker se libera en destroy_all()
        let weak = Rc::downgrade(&picker);
        let registered = picker.borrow_mut().surface_mut().on_click(move |point| {
            if let Some(picker) = weak.upgrade() {
                if let Err(e) = picker.borrow_mut().handle_click(point) {
                    log::warn!("⚠️ [MAP] Click ignorado: {}", e);
                }
            }
        });
        if let Err(e) = registered {
            log::error!("❌ [MAP] No se pudo registrar el click: {}", e);
        }
        MOUNTED.with(|m| m.borrow_mut().push(MountedMap::Picker(picker)));
    })
    .forget();
}
