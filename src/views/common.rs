// Piezas reutilizadas por varias vistas

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{on_navigate, ElementBuilder};
use crate::models::{IssueCategory, IssueStatus};
use crate::router::Route;

/// `<a href>` interno que navega sin recargar
pub fn link(text: &str, route: Route, class: &str) -> Result<Element, JsValue> {
    let anchor = ElementBuilder::new("a")?
        .attr("href", &route.path())?
        .class(class)
        .text(text)
        .build();
    on_navigate(&anchor, route)?;
    Ok(anchor)
}

pub fn status_badge(status: IssueStatus) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("span")?
        .class(status.badge_class())
        .text(status.label())
        .build())
}

pub fn loading(text: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?.class("loading").text(text).build())
}

pub fn page_title(text: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("h1")?.class("page-title").text(text).build())
}

/// `<select>` de categorías; `all_label` añade la opción vacía "todas"
pub fn category_select(
    id: &str,
    selected: Option<IssueCategory>,
    all_label: Option<&str>,
) -> Result<Element, JsValue> {
    let select = ElementBuilder::new("select")?.id(id)?.class("form-input").build();
    if let Some(label) = all_label {
        let option = ElementBuilder::new("option")?
            .attr("value", "")?
            .flag("selected", selected.is_none())?
            .text(label)
            .build();
        select.append_child(&option)?;
    }
    for category in IssueCategory::ALL {
        let option = ElementBuilder::new("option")?
            .attr("value", category.as_str())?
            .flag("selected", selected == Some(category))?
            .text(category.label())
            .build();
        select.append_child(&option)?;
    }
    Ok(select)
}

pub fn status_select(id: &str, selected: Option<IssueStatus>, all_label: Option<&str>) -> Result<Element, JsValue> {
    let select = ElementBuilder::new("select")?.id(id)?.class("form-input").build();
    if let Some(label) = all_label {
        let option = ElementBuilder::new("option")?
            .attr("value", "")?
            .flag("selected", selected.is_none())?
            .text(label)
            .build();
        select.append_child(&option)?;
    }
    for status in IssueStatus::ALL {
        let option = ElementBuilder::new("option")?
            .attr("value", status.as_str())?
            .flag("selected", selected == Some(status))?
            .text(status.label())
            .build();
        select.append_child(&option)?;
    }
    Ok(select)
}

/// Grupo label + control
pub fn form_group(label: &str, for_id: &str, control: Element) -> Result<Element, JsValue> {
    ElementBuilder::new("div")?
        .class("form-group")
        .child(ElementBuilder::new("label")?.attr("for", for_id)?.text(label).build())?
        .child(control)
        .map(ElementBuilder::build)
}
