// ============================================================================
// API CLIENT - Fachada tipada por recurso (auth, issues, notifications)
// ============================================================================
// NO tiene lógica de negocio: solo da forma a las peticiones. Sin reintentos.
// ============================================================================

use crate::services::http_client::HttpClient;
use crate::services::{AuthService, IssueService, NotificationService, SessionStore};

/// Los tres servicios comparten un único `HttpClient`
#[derive(Clone)]
pub struct ApiClient {
    pub auth: AuthService,
    pub issues: IssueService,
    pub notifications: NotificationService,
    http: HttpClient,
}

impl ApiClient {
    pub fn new(http: HttpClient) -> Self {
        Self {
            auth: AuthService::new(http.clone()),
            issues: IssueService::new(http.clone()),
            notifications: NotificationService::new(http.clone()),
            http,
        }
    }

    pub fn session(&self) -> &SessionStore {
        self.http.session()
    }
}
