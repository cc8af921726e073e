// ============================================================================
// EVENT HANDLING - Sistema de eventos
// ============================================================================
// Listeners en elementos del DOM: al destruirse el elemento (re-render con
// set_inner_html("")) el navegador los limpia, así que forget() es seguro.
// Listeners globales (window): registrar UNA sola vez, en lib.rs.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, MouseEvent};

fn listen<F>(element: &Element, event_type: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    element.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
    element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Recibe el valor actual del control en cada tecla
pub fn on_input<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(String) + 'static,
{
    let target = element.clone();
    listen(element, "input", move |_| handler(crate::dom::control_value(&target)))
}

/// `change` de un `<select>` o `<input type=file>`
pub fn on_change<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(String) + 'static,
{
    let target = element.clone();
    listen(element, "change", move |_| handler(crate::dom::control_value(&target)))
}

/// Submit con preventDefault
pub fn on_submit<F>(form: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    listen(form, "submit", move |e| {
        e.prevent_default();
        handler();
    })
}

/// Link interno: evita la recarga y navega con el router
pub fn on_navigate(element: &Element, route: crate::router::Route) -> Result<(), JsValue> {
    use crate::router::{BrowserNavigator, Navigator};
    on_click(element, move |e: MouseEvent| {
        // Ctrl/Cmd+click: dejar que el navegador abra otra pestaña
        if e.ctrl_key() || e.meta_key() {
            return;
        }
        e.prevent_default();
        BrowserNavigator.navigate(&route);
    })
}
