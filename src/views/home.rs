// Portada y página 404

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::ElementBuilder;
use crate::router::Route;
use crate::state::AppState;
use super::common::link;

pub fn render_home(state: &AppState) -> Result<Element, JsValue> {
    let actions = ElementBuilder::new("div")?.class("hero-actions").build();
    // Sin sesión, "Report an Issue" pasa por el guard y acaba en login
    actions.append_child(&link("Report an Issue", Route::ReportIssue, "btn btn-primary btn-lg")?)?;
    actions.append_child(&link("View Reports", Route::Issues, "btn btn-outline btn-lg")?)?;
    if !state.session.is_authenticated() {
        actions.append_child(&link("Create an account", Route::Register, "btn btn-link")?)?;
    }

    let hero = ElementBuilder::new("section")?
        .class("hero")
        .child(ElementBuilder::new("h1")?.text("Report problems in your community").build())?
        .child(
            ElementBuilder::new("p")?
                .class("hero-subtitle")
                .text("Potholes, broken lights, illegal dumping... Put them on the map and follow them until they are fixed.")
                .build(),
        )?
        .child(actions)?
        .build();

    let steps = ElementBuilder::new("section")?.class("features").build();
    for (title, text) in [
        ("Report", "Describe the issue, pick its category and mark the exact spot on the map."),
        ("Track", "Every status change is sent to you as a notification."),
        ("Resolve", "Administrators review reports and update them as work progresses."),
    ] {
        let card = ElementBuilder::new("div")?
            .class("feature-card")
            .child(ElementBuilder::new("h3")?.text(title).build())?
            .child(ElementBuilder::new("p")?.text(text).build())?
            .build();
        steps.append_child(&card)?;
    }

    ElementBuilder::new("div")?
        .class("home-page")
        .child(hero)?
        .child(steps)
        .map(ElementBuilder::build)
}

pub fn render_not_found() -> Result<Element, JsValue> {
    ElementBuilder::new("div")?
        .class("not-found")
        .child(ElementBuilder::new("h1")?.text("404").build())?
        .child(ElementBuilder::new("p")?.text("The page you are looking for does not exist.").build())?
        .child(link("Back to home", Route::Home, "btn btn-primary")?)
        .map(ElementBuilder::build)
}
