// Bandeja de notificaciones

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlInputElement};
use crate::dom::{on_change, on_click, ElementBuilder};
use crate::models::Notification;
use crate::router::Route;
use crate::utils::format_datetime;
use crate::viewmodels::NotificationsViewModel;
use super::common::{link, loading, page_title};

pub fn render_notifications(vm: &NotificationsViewModel) -> Result<Element, JsValue> {
    let items = vm.notifications();
    let has_unread = items.iter().any(|n| !n.is_read);

    let header = ElementBuilder::new("div")?
        .class("page-header")
        .child(page_title("Notifications")?)?
        .build();
    if has_unread {
        let mark_all = ElementBuilder::new("button")?
            .class("btn btn-outline")
            .attr("type", "button")?
            .text("Mark all as read")
            .build();
        let vm = vm.clone();
        on_click(&mark_all, move |_| {
            let vm = vm.clone();
            spawn_local(async move { vm.mark_all_as_read().await });
        })?;
        header.append_child(&mark_all)?;
    }

    // Filtro "solo no leídas"
    let toggle = ElementBuilder::new("input")?
        .id("unread-only")?
        .attr("type", "checkbox")?
        .flag("checked", vm.unread_only())?
        .build();
    {
        let vm = vm.clone();
        let input = toggle.clone();
        on_change(&toggle, move |_| {
            let checked = input
                .dyn_ref::<HtmlInputElement>()
                .map(HtmlInputElement::checked)
                .unwrap_or(false);
            let vm = vm.clone();
            spawn_local(async move { vm.set_unread_only(checked).await });
        })?;
    }
    let filter = ElementBuilder::new("label")?
        .class("checkbox-label")
        .child(toggle)?
        .child(ElementBuilder::new("span")?.text("Unread only").build())?
        .build();

    let page = ElementBuilder::new("div")?
        .class("notifications-page")
        .child(header)?
        .child(filter)?
        .build();

    if vm.is_loading() && items.is_empty() {
        page.append_child(&loading("Loading notifications...")?)?;
    } else if items.is_empty() {
        page.append_child(&ElementBuilder::new("p")?.class("empty-state").text("No notifications.").build())?;
    } else {
        let list = ElementBuilder::new("ul")?.class("notification-list").build();
        for notification in &items {
            list.append_child(&render_notification(vm, notification)?)?;
        }
        page.append_child(&list)?;
    }

    Ok(page)
}

fn render_notification(vm: &NotificationsViewModel, notification: &Notification) -> Result<Element, JsValue> {
    let class = if notification.is_read {
        "notification-item"
    } else {
        "notification-item unread"
    };
    let item = ElementBuilder::new("li")?
        .class(class)
        .child(ElementBuilder::new("h3")?.class("notification-title").text(&notification.title).build())?
        .child(ElementBuilder::new("p")?.text(&notification.message).build())?
        .child(
            ElementBuilder::new("span")?
                .class("notification-date")
                .text(&format_datetime(&notification.created_at))
                .build(),
        )?
        .build();

    let actions = ElementBuilder::new("div")?.class("notification-actions").build();
    if let Some(issue_id) = notification.issue_id {
        actions.append_child(&link("View issue", Route::IssueDetail(issue_id), "btn btn-link")?)?;
    }
    if !notification.is_read {
        let mark = ElementBuilder::new("button")?
            .class("btn btn-outline btn-sm")
            .attr("type", "button")?
            .text("Mark as read")
            .build();
        let vm = vm.clone();
        let id = notification.id;
        on_click(&mark, move |_| {
            let vm = vm.clone();
            spawn_local(async move { vm.mark_as_read(id).await });
        })?;
        actions.append_child(&mark)?;
    }
    item.append_child(&actions)?;
    Ok(item)
}
