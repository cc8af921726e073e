// ============================================================================
// ISSUE DETAIL VIEW - Detalle, mapa y acciones de administrador
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{on_change, on_click, window, ElementBuilder};
use crate::maps::MapMarker;
use crate::models::{Issue, IssueStatus};
use crate::router::Route;
use crate::utils::{format_datetime, DETAIL_ZOOM};
use crate::viewmodels::IssueDetailViewModel;
use super::common::{form_group, link, loading, status_badge, status_select};
use super::map_widgets;

const DETAIL_MAP_ID: &str = "issue-detail-map";

pub fn render_issue_detail(vm: &IssueDetailViewModel) -> Result<Element, JsValue> {
    let page = ElementBuilder::new("div")?
        .class("issue-detail-page")
        .child(link("← Back to issues", Route::Issues, "btn btn-link")?)?
        .build();

    let Some(issue) = vm.issue() else {
        if vm.is_loading() {
            page.append_child(&loading("Loading issue...")?)?;
        }
        return Ok(page);
    };

    let header = ElementBuilder::new("div")?
        .class("issue-detail-header")
        .child(ElementBuilder::new("h1")?.class("page-title").text(&issue.title).build())?
        .child(status_badge(issue.status)?)?
        .build();
    page.append_child(&header)?;

    let body = ElementBuilder::new("div")?.class("issue-detail-body").build();
    body.append_child(&render_info(&issue)?)?;

    let map = ElementBuilder::new("div")?.id(DETAIL_MAP_ID)?.class("map-container").build();
    body.append_child(&map)?;
    map_widgets::schedule_viewer(
        DETAIL_MAP_ID,
        issue.coordinates(),
        DETAIL_ZOOM,
        vec![MapMarker::new(issue.coordinates(), issue.title.clone()).with_status(issue.status)],
    );
    page.append_child(&body)?;

    if vm.can_manage() {
        page.append_child(&render_admin_panel(vm, &issue)?)?;
    }

    Ok(page)
}

fn info_row(label: &str, value: &str) -> Result<Element, JsValue> {
    ElementBuilder::new("div")?
        .class("info-row")
        .child(ElementBuilder::new("dt")?.text(label).build())?
        .child(ElementBuilder::new("dd")?.text(value).build())
        .map(ElementBuilder::build)
}

fn render_info(issue: &Issue) -> Result<Element, JsValue> {
    let info = ElementBuilder::new("div")?.class("issue-info card").build();
    info.append_child(&ElementBuilder::new("p")?.class("issue-description").text(&issue.description).build())?;

    if let Some(url) = &issue.image_url {
        let image = ElementBuilder::new("img")?
            .class("issue-image")
            .attr("src", url)?
            .attr("alt", &issue.title)?
            .build();
        info.append_child(&image)?;
    }

    let facts = ElementBuilder::new("dl")?.class("issue-facts").build();
    facts.append_child(&info_row("Category", issue.category.label())?)?;
    facts.append_child(&info_row("Reported", &format_datetime(&issue.created_at))?)?;
    if let Some(updated) = &issue.updated_at {
        facts.append_child(&info_row("Last update", &format_datetime(updated))?)?;
    }
    facts.append_child(&info_row(
        "Location",
        &format!("{:.5}, {:.5}", issue.latitude, issue.longitude),
    )?)?;
    info.append_child(&facts)?;
    Ok(info)
}

fn render_admin_panel(vm: &IssueDetailViewModel, issue: &Issue) -> Result<Element, JsValue> {
    let busy = *vm.updating.borrow();
    let panel = ElementBuilder::new("section")?
        .class("admin-panel card")
        .child(ElementBuilder::new("h2")?.text("Manage Issue").build())?
        .build();

    let select = status_select("issue-status", Some(issue.status), None)?;
    if busy {
        select.set_attribute("disabled", "")?;
    }
    {
        let vm = vm.clone();
        on_change(&select, move |value| {
            let Ok(status) = value.parse::<IssueStatus>() else {
                return;
            };
            let vm = vm.clone();
            spawn_local(async move {
                vm.change_status(status).await;
            });
        })?;
    }
    panel.append_child(&form_group("Status", "issue-status", select)?)?;

    let delete = ElementBuilder::new("button")?
        .class("btn btn-danger")
        .attr("type", "button")?
        .flag("disabled", busy)?
        .text("Delete Issue")
        .build();
    {
        let vm = vm.clone();
        on_click(&delete, move |_| {
            let confirmed = window()
                .and_then(|w| w.confirm_with_message("Delete this issue? This cannot be undone.").ok())
                .unwrap_or(false);
            if !confirmed {
                return;
            }
            let vm = vm.clone();
            spawn_local(async move {
                vm.delete().await;
            });
        })?;
    }
    panel.append_child(&delete)?;
    Ok(panel)
}
