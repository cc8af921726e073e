// ============================================================================
// DASHBOARD VIEW - Resumen del usuario
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{on_click, ElementBuilder};
use crate::models::{Issue, Notification};
use crate::router::Route;
use crate::utils::format_date;
use crate::viewmodels::DashboardViewModel;
use super::common::{link, loading, page_title, status_badge};

pub fn render_dashboard(vm: &DashboardViewModel) -> Result<Element, JsValue> {
    let page = ElementBuilder::new("div")?.class("dashboard-page").build();

    let greeting = match vm.user() {
        Some(user) => format!("Welcome, {}", user.name),
        None => "Dashboard".to_string(),
    };
    let header = ElementBuilder::new("div")?
        .class("page-header")
        .child(page_title(&greeting)?)?
        .child(link("Report an Issue", Route::ReportIssue, "btn btn-primary")?)?
        .build();
    page.append_child(&header)?;

    if vm.is_loading() {
        page.append_child(&loading("Loading dashboard...")?)?;
    }

    let stats = vm.stats();
    let cards = ElementBuilder::new("div")?.class("stats-grid").build();
    for (label, value, class) in [
        ("Total Issues", stats.total, "stat-card"),
        ("Pending", stats.pending, "stat-card stat-pending"),
        ("Resolved", stats.resolved, "stat-card stat-resolved"),
    ] {
        let card = ElementBuilder::new("div")?
            .class(class)
            .child(ElementBuilder::new("span")?.class("stat-value").text(&value.to_string()).build())?
            .child(ElementBuilder::new("span")?.class("stat-label").text(label).build())?
            .build();
        cards.append_child(&card)?;
    }
    page.append_child(&cards)?;

    let columns = ElementBuilder::new("div")?.class("dashboard-columns").build();
    columns.append_child(&render_recent_issues(&vm.recent_issues.borrow())?)?;
    columns.append_child(&render_unread(vm, &vm.notifications.borrow())?)?;
    page.append_child(&columns)?;

    Ok(page)
}

fn section(title: &str, more: Element) -> Result<Element, JsValue> {
    let header = ElementBuilder::new("div")?
        .class("section-header")
        .child(ElementBuilder::new("h2")?.text(title).build())?
        .child(more)?
        .build();
    ElementBuilder::new("section")?.class("card").child(header).map(ElementBuilder::build)
}

fn empty(text: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("p")?.class("empty-state").text(text).build())
}

fn render_recent_issues(issues: &[Issue]) -> Result<Element, JsValue> {
    let section = section("Recent Issues", link("View all", Route::Issues, "btn btn-link")?)?;
    if issues.is_empty() {
        section.append_child(&empty("No issues reported yet.")?)?;
        return Ok(section);
    }
    let list = ElementBuilder::new("ul")?.class("compact-list").build();
    for issue in issues {
        let item = ElementBuilder::new("li")?
            .class("compact-item")
            .child(link(&issue.title, Route::IssueDetail(issue.id), "compact-title")?)?
            .child(status_badge(issue.status)?)?
            .child(ElementBuilder::new("span")?.class("compact-date").text(&format_date(&issue.created_at)).build())?
            .build();
        list.append_child(&item)?;
    }
    section.append_child(&list)?;
    Ok(section)
}

fn render_unread(vm: &DashboardViewModel, notifications: &[Notification]) -> Result<Element, JsValue> {
    let section = section("Unread Notifications", link("View all", Route::Notifications, "btn btn-link")?)?;
    if notifications.is_empty() {
        section.append_child(&empty("You're all caught up.")?)?;
        return Ok(section);
    }
    let list = ElementBuilder::new("ul")?.class("compact-list").build();
    for notification in notifications {
        let item = ElementBuilder::new("li")?
            .class("compact-item unread")
            .child(ElementBuilder::new("strong")?.text(&notification.title).build())?
            .child(ElementBuilder::new("span")?.text(&notification.message).build())?
            .build();
        if let Some(issue_id) = notification.issue_id {
            item.append_child(&link("View issue", Route::IssueDetail(issue_id), "btn btn-link")?)?;
        }
        list.append_child(&item)?;
    }
    section.append_child(&list)?;

    let refresh = ElementBuilder::new("button")?
        .class("btn btn-outline btn-sm")
        .attr("type", "button")?
        .text("Refresh")
        .build();
    let vm = vm.clone();
    on_click(&refresh, move |_| {
        let vm = vm.clone();
        spawn_local(async move { vm.load().await });
    })?;
    section.append_child(&refresh)?;
    Ok(section)
}
