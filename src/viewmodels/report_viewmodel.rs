// ============================================================================
// REPORT VIEWMODEL - Formulario de nuevo issue
// ============================================================================
// Validación local antes de cualquier petición: título, descripción y
// ubicación elegida en el mapa.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;
use crate::error::ApiError;
use crate::models::{Coordinates, ImageUpload, Issue, IssueCategory, NewIssue};
use crate::router::{enforce_guard, Route};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    #[error("Please fill in the title and description")]
    MissingFields,
    #[error("Please select a location on the map")]
    MissingLocation,
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ReportError {
    pub fn user_message(&self) -> String {
        match self {
            ReportError::Api(e) => e.user_message("Failed to report issue"),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportForm {
    pub title: String,
    pub description: String,
    pub category: IssueCategory,
    pub location: Option<Coordinates>,
    pub image: Option<ImageUpload>,
}

impl ReportForm {
    pub fn to_new_issue(&self) -> Result<NewIssue, ReportError> {
        let title = self.title.trim();
        let description = self.description.trim();
        if title.is_empty() || description.is_empty() {
            return Err(ReportError::MissingFields);
        }
        let location = self.location.ok_or(ReportError::MissingLocation)?;
        Ok(NewIssue {
            title: title.to_string(),
            description: description.to_string(),
            category: self.category,
            location,
            image: self.image.clone(),
        })
    }
}

#[derive(Clone)]
pub struct ReportViewModel {
    state: AppState,
    pub form: Rc<RefCell<ReportForm>>,
    pub submitting: Rc<RefCell<bool>>,
}

impl ReportViewModel {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            form: Rc::new(RefCell::new(ReportForm::default())),
            submitting: Rc::new(RefCell::new(false)),
        }
    }

    /// `false` si se redirigió a login
    pub fn mount(&self) -> bool {
        enforce_guard(&Route::ReportIssue, &self.state.session, self.state.navigator.as_ref())
    }

    pub fn is_submitting(&self) -> bool {
        *self.submitting.borrow()
    }

    pub fn form(&self) -> ReportForm {
        self.form.borrow().clone()
    }

    // Los setters no notifican: el DOM ya refleja lo tecleado

    pub fn set_title(&self, title: String) {
        self.form.borrow_mut().title = title;
    }

    pub fn set_description(&self, description: String) {
        self.form.borrow_mut().description = description;
    }

    pub fn set_category(&self, category: IssueCategory) {
        self.form.borrow_mut().category = category;
    }

    pub fn set_location(&self, location: Coordinates) {
        self.form.borrow_mut().location = Some(location);
    }

    pub fn set_image(&self, image: Option<ImageUpload>) {
        self.form.borrow_mut().image = image;
    }

    pub async fn submit(&self) -> Result<Issue, ReportError> {
        let draft = match self.form().to_new_issue() {
            Ok(draft) => draft,
            Err(e) => {
                self.state.show_error(e.user_message());
                return Err(e);
            }
        };

        self.set_submitting(true);
        let result = self.state.api.issues.create(&draft).await;
        self.set_submitting(false);

        match result {
            Ok(issue) => {
                *self.form.borrow_mut() = ReportForm::default();
                self.state.show_success("Issue reported successfully!");
                self.state.navigate(&Route::Dashboard);
                Ok(issue)
            }
            Err(e) => {
                let error = ReportError::from(e);
                self.state.show_error(error.user_message());
                Err(error)
            }
        }
    }

    fn set_submitting(&self, value: bool) {
        *self.submitting.borrow_mut() = value;
        self.state.notify_subscribers();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IssueStatus;
    use crate::router::Navigator;
    use crate::services::http_client::HttpResponse;
    use crate::services::SessionStore;
    use crate::test_support::{api_with, issue, json_response, signed_in_store, MockTransport, RecordingNavigator};
    use crate::utils::storage::MemoryStorage;

    fn setup(transport: &MockTransport, store: SessionStore) -> (ReportViewModel, AppState, Rc<RecordingNavigator>) {
        let navigator = Rc::new(RecordingNavigator::default());
        let nav: Rc<dyn Navigator> = navigator.clone();
        let state = AppState::new(api_with(transport, store, nav.clone()), nav);
        (ReportViewModel::new(state.clone()), state, navigator)
    }

    fn filled(vm: &ReportViewModel) {
        vm.set_title("Broken bench".to_string());
        vm.set_description("Slats missing".to_string());
        vm.set_category(IssueCategory::Infrastructure);
    }

    #[tokio::test]
    async fn missing_location_is_rejected_locally() {
        let transport = MockTransport::always(HttpResponse::new(201, "{}"));
        let (store, _) = signed_in_store();
        let (vm, state, _) = setup(&transport, store);
        filled(&vm);

        assert_eq!(vm.submit().await.unwrap_err(), ReportError::MissingLocation);
        assert_eq!(transport.request_count(), 0);
        assert_eq!(
            state.current_notice().map(|n| n.message),
            Some("Please select a location on the map".to_string())
        );
    }

    #[tokio::test]
    async fn blank_title_is_rejected_locally() {
        let transport = MockTransport::always(HttpResponse::new(201, "{}"));
        let (store, _) = signed_in_store();
        let (vm, _, _) = setup(&transport, store);
        vm.set_description("Something".to_string());
        vm.set_location(Coordinates::new(40.0, -74.0));

        assert_eq!(vm.submit().await.unwrap_err(), ReportError::MissingFields);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn success_resets_form_and_goes_to_dashboard() {
        let transport = MockTransport::always(json_response(201, &issue(11, IssueCategory::Infrastructure, IssueStatus::Pending)));
        let (store, _) = signed_in_store();
        let (vm, state, navigator) = setup(&transport, store);
        filled(&vm);
        vm.set_location(Coordinates::new(40.7, -74.0));

        let created = vm.submit().await.unwrap();

        assert_eq!(created.id, 11);
        assert_eq!(vm.form(), ReportForm::default());
        assert_eq!(navigator.visited(), vec![Route::Dashboard]);
        assert_eq!(state.current_notice().map(|n| n.message), Some("Issue reported successfully!".to_string()));
    }

    #[tokio::test]
    async fn backend_detail_or_fallback_is_shown() {
        let transport = MockTransport::always(HttpResponse::new(500, "Internal Server Error"));
        let (store, _) = signed_in_store();
        let (vm, state, navigator) = setup(&transport, store);
        filled(&vm);
        vm.set_location(Coordinates::new(40.7, -74.0));

        assert!(matches!(vm.submit().await, Err(ReportError::Api(_))));
        assert_eq!(state.current_notice().map(|n| n.message), Some("Failed to report issue".to_string()));
        assert!(navigator.visited().is_empty());
        assert_eq!(vm.form().title, "Broken bench");
    }

    #[test]
    fn anonymous_mount_redirects() {
        let transport = MockTransport::always(HttpResponse::new(200, "{}"));
        let (vm, _, navigator) = setup(&transport, SessionStore::new(Rc::new(MemoryStorage::new())));
        assert!(!vm.mount());
        assert_eq!(navigator.visited(), vec![Route::Login]);
    }
}
