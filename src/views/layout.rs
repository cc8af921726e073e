// ============================================================================
// LAYOUT - Barra de navegación + aviso + contenido
// ============================================================================

use std::cell::Cell;
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::config::CONFIG;
use crate::dom::{on_click, ElementBuilder};
use crate::router::Route;
use crate::state::AppState;
use crate::viewmodels::AuthViewModel;
use super::common::link;

thread_local! {
    // Último aviso con auto-cierre ya programado
    static SCHEDULED_NOTICE: Cell<u64> = const { Cell::new(0) };
}

pub fn render_layout(state: &AppState, current: &Route, content: Element) -> Result<Element, JsValue> {
    let shell = ElementBuilder::new("div")?.class("app-shell").build();
    shell.append_child(&render_navbar(state, current)?)?;
    if let Some(notice) = render_notice(state)? {
        shell.append_child(&notice)?;
    }
    let main = ElementBuilder::new("main")?.class("container").child(content)?.build();
    shell.append_child(&main)?;
    Ok(shell)
}

fn nav_link(text: &str, route: Route, current: &Route) -> Result<Element, JsValue> {
    let class = if &route == current { "nav-link active" } else { "nav-link" };
    link(text, route, class)
}

fn render_navbar(state: &AppState, current: &Route) -> Result<Element, JsValue> {
    let nav = ElementBuilder::new("nav")?.class("navbar").build();
    nav.append_child(&link("Community Reports", Route::Home, "navbar-brand")?)?;

    let links = ElementBuilder::new("div")?.class("navbar-links").build();
    links.append_child(&nav_link("Issues", Route::Issues, current)?)?;
    links.append_child(&nav_link("Map", Route::IssueMap, current)?)?;

    let session = state.session.get();
    if session.is_authenticated() {
        links.append_child(&nav_link("Dashboard", Route::Dashboard, current)?)?;
        links.append_child(&nav_link("Report Issue", Route::ReportIssue, current)?)?;

        let notifications = nav_link("Notifications", Route::Notifications, current)?;
        let unread = state.unread_count();
        if unread > 0 {
            let badge = ElementBuilder::new("span")?
                .class("nav-badge")
                .text(&unread.to_string())
                .build();
            notifications.append_child(&badge)?;
        }
        links.append_child(&notifications)?;

        if let Some(name) = session.user_name() {
            let user = ElementBuilder::new("span")?.class("nav-user").text(name).build();
            links.append_child(&user)?;
        }

        let logout = ElementBuilder::new("button")?
            .class("btn btn-outline")
            .attr("type", "button")?
            .text("Logout")
            .build();
        let state = state.clone();
        on_click(&logout, move |_| AuthViewModel::new(state.clone()).logout())?;
        links.append_child(&logout)?;
    } else {
        links.append_child(&nav_link("Login", Route::Login, current)?)?;
        links.append_child(&link("Sign Up", Route::Register, "btn btn-primary")?)?;
    }

    nav.append_child(&links)?;
    Ok(nav)
}

/// Aviso actual; el auto-cierre se programa una sola vez por aviso
fn render_notice(state: &AppState) -> Result<Option<Element>, JsValue> {
    let Some(notice) = state.current_notice() else {
        return Ok(None);
    };

    let close = ElementBuilder::new("button")?
        .class("notice-close")
        .attr("type", "button")?
        .attr("aria-label", "Dismiss")?
        .text("×")
        .build();
    {
        let state = state.clone();
        let id = notice.id;
        on_click(&close, move |_| state.dismiss_notice(id))?;
    }

    let element = ElementBuilder::new("div")?
        .class(notice.kind.css_class())
        .attr("role", "status")?
        .child(ElementBuilder::new("span")?.text(&notice.message).build())?
        .child(close)?
        .build();

    if SCHEDULED_NOTICE.with(|last| last.replace(notice.id)) != notice.id {
        let state = state.clone();
        let id = notice.id;
        Timeout::new(CONFIG.notice_duration_ms, move || state.dismiss_notice(id)).forget();
    }

    Ok(Some(element))
}
