// ============================================================================
// DASHBOARD VIEWMODEL - Issues recientes + no leídas + estadísticas
// ============================================================================
// Tres fetches concurrentes; cada uno se aplica en cuanto llega.
// Las estadísticas salen de un lote acotado (CONFIG.dashboard_config).
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use crate::config::CONFIG;
use crate::models::{DashboardStats, Issue, IssueQuery, Notification, NotificationQuery, User};
use crate::router::{enforce_guard, Route};
use crate::state::{AppState, RequestTracker};

#[derive(Clone)]
pub struct DashboardViewModel {
    state: AppState,
    tracker: RequestTracker,
    pub recent_issues: Rc<RefCell<Vec<Issue>>>,
    pub notifications: Rc<RefCell<Vec<Notification>>>,
    pub stats: Rc<RefCell<DashboardStats>>,
    pub loading: Rc<RefCell<bool>>,
}

impl DashboardViewModel {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            tracker: RequestTracker::new(),
            recent_issues: Rc::new(RefCell::new(Vec::new())),
            notifications: Rc::new(RefCell::new(Vec::new())),
            stats: Rc::new(RefCell::new(DashboardStats::default())),
            loading: Rc::new(RefCell::new(true)),
        }
    }

    pub fn user(&self) -> Option<User> {
        self.state.session.get().user
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn stats(&self) -> DashboardStats {
        *self.stats.borrow()
    }

    /// Guard + carga. Sin token se redirige a login antes de cualquier fetch.
    pub async fn mount(&self) {
        if !enforce_guard(&Route::Dashboard, &self.state.session, self.state.navigator.as_ref()) {
            return;
        }
        self.load().await;
    }

    pub fn unmount(&self) {
        self.tracker.cancel();
    }

    pub async fn load(&self) {
        let ticket = self.tracker.begin();
        *self.loading.borrow_mut() = true;
        self.state.notify_subscribers();

        let limits = &CONFIG.dashboard_config;
        let failed = Cell::new(false);
        let api = &self.state.api;

        let recent = async {
            let query = IssueQuery::limited(limits.recent_limit);
            match self.tracker.guard(ticket, api.issues.list(&query)).await {
                Some(Ok(issues)) => {
                    *self.recent_issues.borrow_mut() = issues;
                    self.state.notify_subscribers();
                }
                Some(Err(e)) => {
                    log::error!("❌ [DASHBOARD] Issues recientes: {}", e);
                    failed.set(true);
                }
                None => {}
            }
        };

        let unread = async {
            let query = NotificationQuery::unread(limits.recent_limit);
            match self.tracker.guard(ticket, api.notifications.list(&query)).await {
                Some(Ok(notifications)) => {
                    *self.notifications.borrow_mut() = notifications;
                    self.state.notify_subscribers();
                }
                Some(Err(e)) => {
                    log::error!("❌ [DASHBOARD] Notificaciones: {}", e);
                    failed.set(true);
                }
                None => {}
            }
        };

        let stats = async {
            let query = IssueQuery::limited(limits.stats_limit);
            match self.tracker.guard(ticket, api.issues.list(&query)).await {
                Some(Ok(batch)) => {
                    *self.stats.borrow_mut() = DashboardStats::from_issues(&batch);
                    self.state.notify_subscribers();
                }
                Some(Err(e)) => {
                    log::error!("❌ [DASHBOARD] Estadísticas: {}", e);
                    failed.set(true);
                }
                None => {}
            }
        };

        futures::join!(recent, unread, stats);

        if !self.tracker.is_current(ticket) {
            return;
        }
        *self.loading.borrow_mut() = false;
        if failed.get() {
            self.state.show_error("Failed to load dashboard data");
        } else {
            self.state.notify_subscribers();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IssueCategory, IssueStatus};
    use crate::router::Navigator;
    use crate::services::http_client::{HttpRequest, HttpResponse};
    use crate::services::SessionStore;
    use crate::test_support::{api_with, issue, issue_with_status, json_response, notification, signed_in_store, MockTransport, RecordingNavigator, Reply};
    use crate::utils::storage::MemoryStorage;

    fn setup(transport: &MockTransport, store: SessionStore) -> (DashboardViewModel, AppState, Rc<RecordingNavigator>) {
        let navigator = Rc::new(RecordingNavigator::default());
        let nav: Rc<dyn Navigator> = navigator.clone();
        let state = AppState::new(api_with(transport, store, nav.clone()), nav);
        (DashboardViewModel::new(state.clone()), state, navigator)
    }

    fn stats_batch() -> Vec<Issue> {
        [
            IssueStatus::Pending,
            IssueStatus::Resolved,
            IssueStatus::Closed,
            IssueStatus::Pending,
            IssueStatus::InProgress,
        ]
        .iter()
        .enumerate()
        .map(|(i, s)| issue_with_status(i as i64 + 1, *s))
        .collect()
    }

    #[tokio::test]
    async fn anonymous_mount_redirects_without_fetching() {
        let transport = MockTransport::always(HttpResponse::new(200, "[]"));
        let store = SessionStore::new(Rc::new(MemoryStorage::new()));
        let (vm, _, navigator) = setup(&transport, store);

        vm.mount().await;

        assert_eq!(navigator.visited(), vec![Route::Login]);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn loads_recent_unread_and_stats() {
        let transport = MockTransport::new(|request: &HttpRequest| {
            match (request.path.as_str(), request.query_value("limit")) {
                ("/api/issues/", Some("100")) => Reply::Now(json_response(200, &stats_batch())),
                ("/api/issues/", _) => Reply::Now(json_response(200, &vec![issue(9, IssueCategory::Health, IssueStatus::Pending)])),
                ("/api/notifications/", _) => Reply::Now(json_response(200, &vec![notification(1, false)])),
                _ => Reply::Now(HttpResponse::new(404, "")),
            }
        });
        let (store, _) = signed_in_store();
        let (vm, state, _) = setup(&transport, store);

        vm.mount().await;

        assert_eq!(vm.stats(), DashboardStats { total: 5, pending: 2, resolved: 2 });
        assert_eq!(vm.recent_issues.borrow()[0].id, 9);
        assert_eq!(vm.notifications.borrow().len(), 1);
        assert!(!vm.is_loading());
        assert!(state.current_notice().is_none());

        let sent = transport.requests();
        assert_eq!(sent.len(), 3);
        let notifications = sent.iter().find(|r| r.path == "/api/notifications/").unwrap();
        assert_eq!(notifications.query_value("unread_only"), Some("true"));
        assert_eq!(notifications.query_value("limit"), Some("5"));
    }

    #[tokio::test]
    async fn a_failure_keeps_prior_state_and_shows_notice() {
        let transport = MockTransport::new(|request: &HttpRequest| match request.path.as_str() {
            "/api/notifications/" => Reply::Fail("offline".into()),
            _ => Reply::Now(json_response(200, &stats_batch())),
        });
        let (store, _) = signed_in_store();
        let (vm, state, _) = setup(&transport, store);
        vm.notifications.borrow_mut().push(notification(42, false));

        vm.load().await;

        assert_eq!(vm.notifications.borrow()[0].id, 42);
        assert_eq!(vm.recent_issues.borrow().len(), 5);
        assert_eq!(
            state.current_notice().map(|n| n.message),
            Some("Failed to load dashboard data".to_string())
        );
    }
}
