// ============================================================================
// COMMUNITY REPORTS - FRONTEND MVVM (RUST PURO)
// ============================================================================
// - Views: funciones que construyen DOM (sin lógica)
// - ViewModels: estado de página + lógica UI
// - Services: SOLO comunicación API + sesión local
// - State: estado compartido con Rc<RefCell>
// - Models: estructuras compartidas con el backend
// Todo lo que toca el navegador queda detrás de cfg(target_arch = "wasm32").
// ============================================================================

pub mod config;
pub mod error;
pub mod maps;
pub mod models;
pub mod router;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod views;

#[cfg(test)]
mod test_support;

#[cfg(target_arch = "wasm32")]
pub use web::{main, rerender_app};

#[cfg(target_arch = "wasm32")]
mod web {
    use std::rc::Rc;
    use std::cell::RefCell;
    use gloo_timers::callback::Timeout;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use crate::app::App;
    use crate::config::CONFIG;
    use crate::utils::constants::ROUTE_CHANGE_EVENT;

    // Instancia global de la App
    thread_local! {
        static APP: RefCell<Option<Rc<App>>> = RefCell::new(None);
    }

    fn current_app() -> Option<Rc<App>> {
        APP.with(|cell| cell.borrow().clone())
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let level = if CONFIG.is_logging_enabled() {
            log::Level::Debug
        } else {
            log::Level::Warn
        };
        wasm_logger::init(wasm_logger::Config::new(level));
        log::info!("🚀 Community Reports - Rust + MVVM ({})", CONFIG.backend_url());

        let app = Rc::new(App::new()?);
        APP.with(|cell| *cell.borrow_mut() = Some(app.clone()));
        app.start()?;

        // Listeners globales: se registran UNA sola vez aquí
        if let Some(win) = web_sys::window() {
            for event in [ROUTE_CHANGE_EVENT, "popstate"] {
                let closure = Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    // Diferido: la navegación puede dispararse en medio de un render
                    Timeout::new(0, handle_route_change).forget();
                }) as Box<dyn FnMut(web_sys::Event)>);
                win.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
                closure.forget();
            }
        }

        Ok(())
    }

    fn handle_route_change() {
        match current_app() {
            Some(app) => {
                if let Err(e) = app.handle_route_change() {
                    log::error!("❌ [ROUTER] Error cambiando de página: {:?}", e);
                }
            }
            None => log::warn!("⚠️ [ROUTER] App no está inicializada"),
        }
    }

    /// Re-render completo (llamado vía subscribe_to_changes)
    pub fn rerender_app() {
        match current_app() {
            Some(app) => {
                if let Err(e) = app.render() {
                    log::error!("❌ [RERENDER] Error re-renderizando: {:?}", e);
                }
            }
            None => log::warn!("⚠️ [RERENDER] App no está inicializada"),
        }
    }

    /// Llamable desde JavaScript
    #[wasm_bindgen]
    pub fn rerender_app_wasm() {
        rerender_app();
    }
}
