// ============================================================================
// ISSUE DETAIL VIEWMODEL - Detalle + acciones de admin
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::models::{Issue, IssueStatus};
use crate::router::Route;
use crate::state::{AppState, RequestTracker};

#[derive(Clone)]
pub struct IssueDetailViewModel {
    state: AppState,
    tracker: RequestTracker,
    pub issue: Rc<RefCell<Option<Issue>>>,
    pub loading: Rc<RefCell<bool>>,
    pub updating: Rc<RefCell<bool>>,
}

impl IssueDetailViewModel {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            tracker: RequestTracker::new(),
            issue: Rc::new(RefCell::new(None)),
            loading: Rc::new(RefCell::new(true)),
            updating: Rc::new(RefCell::new(false)),
        }
    }

    pub fn issue(&self) -> Option<Issue> {
        self.issue.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Solo orientativo: el backend vuelve a comprobar el rol
    pub fn can_manage(&self) -> bool {
        self.state.session.is_admin()
    }

    pub fn unmount(&self) {
        self.tracker.cancel();
    }

    /// Cargar por id; un fallo vuelve al listado
    pub async fn load(&self, id: i64) {
        *self.loading.borrow_mut() = true;
        let Some(result) = self.tracker.run(self.state.api.issues.get(id)).await else {
            return;
        };
        *self.loading.borrow_mut() = false;

        match result {
            Ok(issue) => {
                *self.issue.borrow_mut() = Some(issue);
                self.state.notify_subscribers();
            }
            Err(e) => {
                log::error!("❌ [ISSUE] No se pudo cargar {}: {}", id, e);
                self.state.show_error("Failed to load issue");
                self.state.navigate(&Route::Issues);
            }
        }
    }

    pub async fn change_status(&self, status: IssueStatus) -> bool {
        let Some(id) = self.managed_issue_id() else {
            return false;
        };
        if self.issue().map(|i| i.status) == Some(status) {
            return true;
        }

        self.set_updating(true);
        let result = self.state.api.issues.update_status(id, status).await;
        self.set_updating(false);

        match result {
            Ok(updated) => {
                *self.issue.borrow_mut() = Some(updated);
                self.state.show_success(format!("Status updated to {}", status.label()));
                true
            }
            Err(e) => {
                self.state.show_error(e.user_message("Failed to update status"));
                false
            }
        }
    }

    pub async fn delete(&self) -> bool {
        let Some(id) = self.managed_issue_id() else {
            return false;
        };

        self.set_updating(true);
        let result = self.state.api.issues.delete(id).await;
        self.set_updating(false);

        match result {
            Ok(()) => {
                *self.issue.borrow_mut() = None;
                self.state.show_success("Issue deleted");
                self.state.navigate(&Route::Issues);
                true
            }
            Err(e) => {
                self.state.show_error(e.user_message("Failed to delete issue"));
                false
            }
        }
    }

    fn managed_issue_id(&self) -> Option<i64> {
        if !self.can_manage() {
            self.state.show_error("Only administrators can manage issues");
            return None;
        }
        self.issue().map(|i| i.id)
    }

    fn set_updating(&self, value: bool) {
        *self.updating.borrow_mut() = value;
        self.state.notify_subscribers();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IssueCategory, UserRole};
    use crate::router::Navigator;
    use crate::services::http_client::{HttpResponse, Method};
    use crate::services::SessionStore;
    use crate::test_support::{api_with, issue, json_response, signed_in_store, signed_in_store_as, MockTransport, RecordingNavigator};

    fn setup(transport: &MockTransport, store: SessionStore) -> (IssueDetailViewModel, AppState, Rc<RecordingNavigator>) {
        let navigator = Rc::new(RecordingNavigator::default());
        let nav: Rc<dyn Navigator> = navigator.clone();
        let state = AppState::new(api_with(transport, store, nav.clone()), nav);
        (IssueDetailViewModel::new(state.clone()), state, navigator)
    }

    #[tokio::test]
    async fn missing_issue_goes_back_to_list() {
        let transport = MockTransport::always(HttpResponse::new(404, r#"{"detail":"Issue with id 9 not found"}"#));
        let (store, _) = signed_in_store();
        let (vm, state, navigator) = setup(&transport, store);

        vm.load(9).await;

        assert!(vm.issue().is_none());
        assert_eq!(navigator.visited(), vec![Route::Issues]);
        assert_eq!(state.current_notice().map(|n| n.message), Some("Failed to load issue".to_string()));
    }

    #[tokio::test]
    async fn admin_can_change_status() {
        let transport = MockTransport::always(json_response(200, &issue(4, IssueCategory::Safety, IssueStatus::Resolved)));
        let (store, _) = signed_in_store_as(UserRole::Admin);
        let (vm, _, _) = setup(&transport, store);
        *vm.issue.borrow_mut() = Some(issue(4, IssueCategory::Safety, IssueStatus::Pending));

        assert!(vm.change_status(IssueStatus::Resolved).await);
        assert_eq!(vm.issue().map(|i| i.status), Some(IssueStatus::Resolved));
        assert_eq!(transport.requests()[0].query_value("new_status"), Some("resolved"));
    }

    #[tokio::test]
    async fn regular_user_cannot_delete() {
        let transport = MockTransport::always(HttpResponse::new(204, ""));
        let (store, _) = signed_in_store();
        let (vm, _, _) = setup(&transport, store);
        *vm.issue.borrow_mut() = Some(issue(4, IssueCategory::Safety, IssueStatus::Pending));

        assert!(!vm.delete().await);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn admin_delete_returns_to_list() {
        let transport = MockTransport::always(HttpResponse::new(204, ""));
        let (store, _) = signed_in_store_as(UserRole::Admin);
        let (vm, _, navigator) = setup(&transport, store);
        *vm.issue.borrow_mut() = Some(issue(4, IssueCategory::Safety, IssueStatus::Pending));

        assert!(vm.delete().await);
        assert_eq!(transport.requests()[0].method, Method::Delete);
        assert_eq!(navigator.visited(), vec![Route::Issues]);
    }
}
