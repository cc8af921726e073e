// ============================================================================
// APP - Aplicación principal: ruta actual + página montada + render
// ============================================================================

use std::cell::RefCell;
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, get_element_by_id, clear_children};
use crate::router::{current_path, Route};
use crate::state::AppState;
use crate::views::{map_widgets, render_app, Page};

pub struct App {
    state: AppState,
    root: Element,
    route: RefCell<Route>,
    page: RefCell<Page>,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app").ok_or_else(|| JsValue::from_str("No #app element found"))?;
        let state = AppState::browser();

        // Varios cambios seguidos = un solo re-render
        state.subscribe_to_changes(move || {
            Timeout::new(0, crate::rerender_app).forget();
        });

        let route = Route::parse(&current_path());
        let page = Page::for_route(&route, &state);
        log::info!("🧭 [APP] Ruta inicial {}", route.path());

        Ok(Self {
            state,
            root,
            route: RefCell::new(route),
            page: RefCell::new(page),
        })
    }

    /// Primera carga: página + contador de no leídas
    pub fn start(&self) -> Result<(), JsValue> {
        self.page.borrow().mount();
        let state = self.state.clone();
        wasm_bindgen_futures::spawn_local(async move { state.refresh_unread_count().await });
        self.render()
    }

    /// Tras pushState / popstate: cambia de página si la ruta es otra
    pub fn handle_route_change(&self) -> Result<(), JsValue> {
        let route = Route::parse(&current_path());
        if *self.route.borrow() != route {
            log::info!("🧭 [APP] {} -> {}", self.route.borrow().path(), route.path());
            self.page.borrow().unmount();
            let page = Page::for_route(&route, &self.state);
            *self.route.borrow_mut() = route;
            *self.page.borrow_mut() = page;
            self.page.borrow().mount();
        }
        self.render()
    }

    /// Re-render completo del #app
    pub fn render(&self) -> Result<(), JsValue> {
        map_widgets::destroy_all();
        clear_children(&self.root);
        let view = render_app(&self.state, &self.route.borrow(), &self.page.borrow())?;
        append_child(&self.root, &view)
    }
}
