// ============================================================================
// APP VIEW - Página actual dentro del layout
// ============================================================================
// Cada página guarda su viewmodel; la vista solo lo lee y le pasa eventos.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::router::Route;
use crate::state::AppState;
use crate::viewmodels::{
    AuthViewModel, DashboardViewModel, IssueDetailViewModel, IssueListViewModel, NotificationsViewModel,
    ReportViewModel,
};
use super::auth::{render_login, render_register, AuthFields, SharedFields};
use super::dashboard::render_dashboard;
use super::home::{render_home, render_not_found};
use super::issue_detail::render_issue_detail;
use super::issues::{render_issue_list, render_issue_map};
use super::layout::render_layout;
use super::notifications::render_notifications;
use super::report::render_report;

/// Página montada: ruta + viewmodel vivo mientras dure
pub enum Page {
    Home,
    Login(AuthViewModel, SharedFields),
    Register(AuthViewModel, SharedFields),
    Dashboard(DashboardViewModel),
    Issues(IssueListViewModel),
    IssueMap(IssueListViewModel),
    IssueDetail(i64, IssueDetailViewModel),
    Report(ReportViewModel),
    Notifications(NotificationsViewModel),
    NotFound,
}

impl Page {
    pub fn for_route(route: &Route, state: &AppState) -> Self {
        let state = state.clone();
        match route {
            Route::Home => Page::Home,
            Route::Login => Page::Login(AuthViewModel::new(state), new_fields()),
            Route::Register => Page::Register(AuthViewModel::new(state), new_fields()),
            Route::Dashboard => Page::Dashboard(DashboardViewModel::new(state)),
            Route::Issues => Page::Issues(IssueListViewModel::new(state)),
            Route::IssueMap => Page::IssueMap(IssueListViewModel::new(state)),
            Route::IssueDetail(id) => Page::IssueDetail(*id, IssueDetailViewModel::new(state)),
            Route::ReportIssue => Page::Report(ReportViewModel::new(state)),
            Route::Notifications => Page::Notifications(NotificationsViewModel::new(state)),
            Route::NotFound => Page::NotFound,
        }
    }

    /// Guard + carga inicial de la página
    pub fn mount(&self) {
        match self {
            Page::Dashboard(vm) => {
                let vm = vm.clone();
                spawn_local(async move { vm.mount().await });
            }
            Page::Issues(vm) | Page::IssueMap(vm) => {
                let vm = vm.clone();
                spawn_local(async move { vm.mount().await });
            }
            Page::IssueDetail(id, vm) => {
                let vm = vm.clone();
                let id = *id;
                spawn_local(async move { vm.load(id).await });
            }
            Page::Report(vm) => {
                vm.mount();
            }
            Page::Notifications(vm) => {
                let vm = vm.clone();
                spawn_local(async move { vm.mount().await });
            }
            Page::Home | Page::Login(..) | Page::Register(..) | Page::NotFound => {}
        }
    }

    /// Al salir de la página se abortan sus peticiones en vuelo
    pub fn unmount(&self) {
        match self {
            Page::Dashboard(vm) => vm.unmount(),
            Page::Issues(vm) | Page::IssueMap(vm) => vm.unmount(),
            Page::IssueDetail(_, vm) => vm.unmount(),
            Page::Notifications(vm) => vm.unmount(),
            _ => {}
        }
    }
}

fn new_fields() -> SharedFields {
    Rc::new(RefCell::new(AuthFields::default()))
}

pub fn render_app(state: &AppState, route: &Route, page: &Page) -> Result<Element, JsValue> {
    let content = match page {
        Page::Home => render_home(state)?,
        Page::Login(vm, fields) => render_login(vm, fields)?,
        Page::Register(vm, fields) => render_register(vm, fields)?,
        Page::Dashboard(vm) => render_dashboard(vm)?,
        Page::Issues(vm) => render_issue_list(vm)?,
        Page::IssueMap(vm) => render_issue_map(vm)?,
        Page::IssueDetail(_, vm) => render_issue_detail(vm)?,
        Page::Report(vm) => render_report(vm)?,
        Page::Notifications(vm) => render_notifications(vm)?,
        Page::NotFound => render_not_found()?,
    };
    render_layout(state, route, content)
}
