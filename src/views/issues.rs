// ============================================================================
// ISSUES VIEWS - Listado con filtros y mapa de issues
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{on_change, on_click, ElementBuilder};
use crate::models::{Issue, IssueCategory, IssueStatus};
use crate::router::Route;
use crate::utils::{format_date, MAP_PAGE_ZOOM};
use crate::viewmodels::IssueListViewModel;
use super::common::{category_select, link, loading, page_title, status_badge, status_select};
use super::map_widgets;

const ISSUES_MAP_ID: &str = "issues-map";

/// Barra de filtros compartida por listado y mapa
fn render_filters(vm: &IssueListViewModel) -> Result<Element, JsValue> {
    let filters = vm.filters();
    let bar = ElementBuilder::new("div")?.class("filters-bar").build();

    let category = category_select("filter-category", filters.category, Some("All categories"))?;
    {
        let vm = vm.clone();
        on_change(&category, move |value| {
            let vm = vm.clone();
            let category = value.parse::<IssueCategory>().ok();
            spawn_local(async move { vm.set_category(category).await });
        })?;
    }
    bar.append_child(&category)?;

    let status = status_select("filter-status", filters.status, Some("All statuses"))?;
    {
        let vm = vm.clone();
        on_change(&status, move |value| {
            let vm = vm.clone();
            let status = value.parse::<IssueStatus>().ok();
            spawn_local(async move { vm.set_status(status).await });
        })?;
    }
    bar.append_child(&status)?;

    if !filters.is_empty() {
        let clear = ElementBuilder::new("button")?
            .class("btn btn-outline btn-sm")
            .attr("type", "button")?
            .text("Clear Filters")
            .build();
        let vm = vm.clone();
        on_click(&clear, move |_| {
            let vm = vm.clone();
            spawn_local(async move { vm.clear_filters().await });
        })?;
        bar.append_child(&clear)?;
    }

    Ok(bar)
}

fn render_issue_card(issue: &Issue) -> Result<Element, JsValue> {
    let meta = ElementBuilder::new("div")?
        .class("issue-meta")
        .child(ElementBuilder::new("span")?.class("issue-category").text(issue.category.label()).build())?
        .child(ElementBuilder::new("span")?.class("issue-date").text(&format_date(&issue.created_at)).build())?
        .build();

    let header = ElementBuilder::new("div")?
        .class("issue-card-header")
        .child(link(&issue.title, Route::IssueDetail(issue.id), "issue-title")?)?
        .child(status_badge(issue.status)?)?
        .build();

    ElementBuilder::new("article")?
        .class("issue-card")
        .child(header)?
        .child(ElementBuilder::new("p")?.class("issue-excerpt").text(&issue.excerpt(140)).build())?
        .child(meta)
        .map(ElementBuilder::build)
}

pub fn render_issue_list(vm: &IssueListViewModel) -> Result<Element, JsValue> {
    let header = ElementBuilder::new("div")?
        .class("page-header")
        .child(page_title("Reported Issues")?)?
        .child(link("Map View", Route::IssueMap, "btn btn-outline")?)?
        .child(link("Report an Issue", Route::ReportIssue, "btn btn-primary")?)?
        .build();

    let page = ElementBuilder::new("div")?
        .class("issues-page")
        .child(header)?
        .child(render_filters(vm)?)?
        .build();

    let issues = vm.issues.borrow();
    if vm.is_loading() && issues.is_empty() {
        page.append_child(&loading("Loading issues...")?)?;
    } else if issues.is_empty() {
        let text = if vm.filters().is_empty() {
            "No issues have been reported yet."
        } else {
            "No issues match the selected filters."
        };
        page.append_child(&ElementBuilder::new("p")?.class("empty-state").text(text).build())?;
    } else {
        let grid = ElementBuilder::new("div")?.class("issues-grid").build();
        for issue in issues.iter() {
            grid.append_child(&render_issue_card(issue)?)?;
        }
        page.append_child(&grid)?;
    }

    Ok(page)
}

fn render_legend() -> Result<Element, JsValue> {
    let legend = ElementBuilder::new("div")?.class("map-legend").build();
    for status in IssueStatus::ALL {
        let swatch = ElementBuilder::new("span")?
            .class("legend-swatch")
            .attr("style", &format!("background-color: {}", status.marker_color()))?
            .build();
        let item = ElementBuilder::new("span")?
            .class("legend-item")
            .child(swatch)?
            .child(ElementBuilder::new("span")?.text(status.label()).build())?
            .build();
        legend.append_child(&item)?;
    }
    Ok(legend)
}

pub fn render_issue_map(vm: &IssueListViewModel) -> Result<Element, JsValue> {
    let header = ElementBuilder::new("div")?
        .class("page-header")
        .child(page_title("Issues Map")?)?
        .child(link("List View", Route::Issues, "btn btn-outline")?)?
        .build();

    let count = vm.issues.borrow().len();
    let summary = if vm.is_loading() {
        "Loading issues...".to_string()
    } else {
        format!("{} issues on the map", count)
    };

    let map = ElementBuilder::new("div")?.id(ISSUES_MAP_ID)?.class("map-container map-large").build();
    map_widgets::schedule_viewer(ISSUES_MAP_ID, vm.map_center(), MAP_PAGE_ZOOM, vm.markers());

    ElementBuilder::new("div")?
        .class("issues-map-page")
        .child(header)?
        .child(render_filters(vm)?)?
        .child(ElementBuilder::new("p")?.class("map-summary").text(&summary).build())?
        .child(map)?
        .child(render_legend()?)
        .map(ElementBuilder::build)
}
