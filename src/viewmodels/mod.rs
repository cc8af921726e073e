pub mod auth_viewmodel;
pub mod dashboard_viewmodel;
pub mod issue_list_viewmodel;
pub mod issue_detail_viewmodel;
pub mod report_viewmodel;
pub mod notifications_viewmodel;

pub use auth_viewmodel::{AuthError, AuthViewModel};
pub use dashboard_viewmodel::DashboardViewModel;
pub use issue_list_viewmodel::IssueListViewModel;
pub use issue_detail_viewmodel::IssueDetailViewModel;
pub use report_viewmodel::{ReportError, ReportForm, ReportViewModel};
pub use notifications_viewmodel::NotificationsViewModel;

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use futures::channel::oneshot;
    use super::*;
    use crate::models::{IssueCategory, IssueStatus, UserRole};
    use crate::router::{Navigator, Route};
    use crate::services::http_client::{HttpRequest, HttpResponse};
    use crate::services::SessionStore;
    use crate::state::AppState;
    use crate::test_support::{api_with, issue, json_response, notification, sample_user, MockTransport, RecordingNavigator, Reply};
    use crate::utils::storage::MemoryStorage;

    #[tokio::test]
    async fn login_dashboard_logout_round_trip() {
        let (notifications_tx, notifications_rx) = oneshot::channel::<HttpResponse>();
        let deferred = RefCell::new(Some(notifications_rx));
        let transport = MockTransport::new(move |request: &HttpRequest| match request.path.as_str() {
            "/api/auth/login/json" => Reply::Now(HttpResponse::new(200, r#"{"access_token":"jwt-e2e","token_type":"bearer"}"#)),
            "/api/auth/me" => Reply::Now(json_response(200, &sample_user(UserRole::User))),
            "/api/notifications/unread/count" => Reply::Now(HttpResponse::new(200, r#"{"unread_count":1}"#)),
            "/api/notifications/" => match deferred.borrow_mut().take() {
                Some(rx) => Reply::Deferred(rx),
                None => Reply::Now(HttpResponse::new(200, "[]")),
            },
            "/api/issues/" => Reply::Now(json_response(200, &vec![issue(1, IssueCategory::Safety, IssueStatus::Pending)])),
            _ => Reply::Now(HttpResponse::new(404, "")),
        });

        let storage = MemoryStorage::new();
        let store = SessionStore::new(Rc::new(storage.clone()));
        let navigator = Rc::new(RecordingNavigator::default());
        let nav: Rc<dyn Navigator> = navigator.clone();
        let state = AppState::new(api_with(&transport, store.clone(), nav.clone()), nav);

        // Login: token + perfil guardados
        let auth = AuthViewModel::new(state.clone());
        auth.login("ada@example.com", "secret").await.unwrap();
        assert_eq!(store.token().as_deref(), Some("jwt-e2e"));
        assert_eq!(store.user(), Some(sample_user(UserRole::User)));
        assert_eq!(navigator.visited(), vec![Route::Dashboard]);

        // Dashboard: los issues llegan mientras las notificaciones siguen pendientes
        let dashboard = DashboardViewModel::new(state.clone());
        let mount = dashboard.mount();
        futures::pin_mut!(mount);
        assert!(futures::poll!(&mut mount).is_pending());
        assert_eq!(dashboard.recent_issues.borrow().len(), 1);
        assert_eq!(dashboard.stats().total, 1);
        assert!(dashboard.notifications.borrow().is_empty());

        let _ = notifications_tx.send(json_response(200, &vec![notification(5, false)]));
        mount.await;
        assert_eq!(dashboard.notifications.borrow()[0].id, 5);
        assert!(!dashboard.is_loading());

        let dashboard_requests = transport
            .requests()
            .into_iter()
            .filter(|r| r.path.starts_with("/api/issues/") || r.path == "/api/notifications/")
            .collect::<Vec<_>>();
        assert!(dashboard_requests
            .iter()
            .all(|r| r.header("Authorization") == Some("Bearer jwt-e2e")));

        // Logout: ambas entradas borradas, vuelta a la portada
        auth.logout();
        assert!(storage.is_empty());
        assert_eq!(navigator.visited().last(), Some(&Route::Home));
        assert_eq!(state.unread_count(), 0);
    }
}
