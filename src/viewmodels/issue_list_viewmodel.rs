// ============================================================================
// ISSUE LIST VIEWMODEL - Listado / mapa con filtros
// ============================================================================
// Cada cambio de filtro reemplaza el resultado completo. Solo se aplica la
// respuesta del último ticket; la anterior se aborta.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::maps::{center_for_issues, markers_for_issues, MapMarker};
use crate::models::{Coordinates, Issue, IssueCategory, IssueFilters, IssueStatus};
use crate::state::{AppState, RequestTracker};

#[derive(Clone)]
pub struct IssueListViewModel {
    state: AppState,
    tracker: RequestTracker,
    pub issues: Rc<RefCell<Vec<Issue>>>,
    pub filters: Rc<RefCell<IssueFilters>>,
    pub loading: Rc<RefCell<bool>>,
}

impl IssueListViewModel {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            tracker: RequestTracker::new(),
            issues: Rc::new(RefCell::new(Vec::new())),
            filters: Rc::new(RefCell::new(IssueFilters::default())),
            loading: Rc::new(RefCell::new(true)),
        }
    }

    pub fn issues(&self) -> Vec<Issue> {
        self.issues.borrow().clone()
    }

    pub fn filters(&self) -> IssueFilters {
        *self.filters.borrow()
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub async fn mount(&self) {
        self.refresh().await;
    }

    /// Cancela el fetch en vuelo (cambio de página)
    pub fn unmount(&self) {
        self.tracker.cancel();
    }

    pub async fn refresh(&self) {
        let query = self.filters().to_query();
        *self.loading.borrow_mut() = true;
        self.state.notify_subscribers();

        let Some(result) = self.tracker.run(self.state.api.issues.list(&query)).await else {
            return;
        };

        *self.loading.borrow_mut() = false;
        match result {
            Ok(issues) => {
                *self.issues.borrow_mut() = issues;
                self.state.notify_subscribers();
            }
            Err(e) => {
                log::error!("❌ [ISSUES] Error cargando listado: {}", e);
                self.state.show_error("Failed to load issues");
            }
        }
    }

    pub async fn set_category(&self, category: Option<IssueCategory>) {
        self.filters.borrow_mut().category = category;
        self.refresh().await;
    }

    pub async fn set_status(&self, status: Option<IssueStatus>) {
        self.filters.borrow_mut().status = status;
        self.refresh().await;
    }

    pub async fn clear_filters(&self) {
        *self.filters.borrow_mut() = IssueFilters::default();
        self.refresh().await;
    }

    pub fn markers(&self) -> Vec<MapMarker> {
        markers_for_issues(&self.issues.borrow())
    }

    pub fn map_center(&self) -> Coordinates {
        center_for_issues(&self.issues.borrow())
    }
}
