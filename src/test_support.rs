// Fakes compartidos por los tests: transporte guionizado, navegador que
// registra rutas y fixtures del dominio.

use std::cell::RefCell;
use std::rc::Rc;
use async_trait::async_trait;
use futures::channel::oneshot;
use serde::Serialize;
use crate::error::ApiError;
use crate::maps::{MapError, MapMarker, MapSurface, MapViewConfig};
use crate::models::{Issue, IssueCategory, IssueStatus, Notification, User, UserRole};
use crate::router::{Navigator, Route};
use crate::services::http_client::{HttpClient, HttpRequest, HttpResponse, Transport};
use crate::services::{ApiClient, SessionStore};
use crate::utils::storage::MemoryStorage;

pub const TEST_TOKEN: &str = "test-token";

pub fn sample_user(role: UserRole) -> User {
    User {
        id: 1,
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        role,
        created_at: "2024-01-01T09:00:00+00:00".to_string(),
    }
}

pub fn signed_in_store() -> (SessionStore, MemoryStorage) {
    signed_in_store_as(UserRole::User)
}

pub fn signed_in_store_as(role: UserRole) -> (SessionStore, MemoryStorage) {
    let storage = MemoryStorage::new();
    let store = SessionStore::new(Rc::new(storage.clone()));
    store.establish(TEST_TOKEN, &sample_user(role));
    (store, storage)
}

pub fn issue(id: i64, category: IssueCategory, status: IssueStatus) -> Issue {
    Issue {
        id,
        title: format!("Issue {}", id),
        description: format!("Description of issue {}", id),
        category,
        status,
        latitude: 40.0 + id as f64 / 100.0,
        longitude: -74.0,
        image_url: None,
        created_at: "2024-03-01T10:00:00+00:00".to_string(),
        updated_at: None,
        reporter_id: 1,
    }
}

pub fn issue_with_status(id: i64, status: IssueStatus) -> Issue {
    issue(id, IssueCategory::Infrastructure, status)
}

pub fn notification(id: i64, is_read: bool) -> Notification {
    Notification {
        id,
        title: format!("Notification {}", id),
        message: "Your issue status changed".to_string(),
        is_read,
        created_at: "2024-03-02T10:00:00+00:00".to_string(),
        user_id: Some(1),
        issue_id: Some(id),
    }
}

pub fn json_response<T: Serialize>(status: u16, body: &T) -> HttpResponse {
    HttpResponse::new(status, serde_json::to_string(body).unwrap())
}

/// Navegador que solo apunta las rutas pedidas
#[derive(Default)]
pub struct RecordingNavigator {
    visited: RefCell<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<Route> {
        self.visited.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &Route) {
        self.visited.borrow_mut().push(route.clone());
    }
}

/// Respuesta guionizada
pub enum Reply {
    Now(HttpResponse),
    /// Se resuelve cuando el test envía por el canal
    Deferred(oneshot::Receiver<HttpResponse>),
    Fail(String),
}

type Handler = Box<dyn FnMut(&HttpRequest) -> Reply>;

struct MockInner {
    handler: RefCell<Handler>,
    requests: RefCell<Vec<HttpRequest>>,
}

/// Transporte falso: registra cada petición y responde con el handler
#[derive(Clone)]
pub struct MockTransport {
    inner: Rc<MockInner>,
}

impl MockTransport {
    pub fn new<F>(handler: F) -> Self
    where
        F: FnMut(&HttpRequest) -> Reply + 'static,
    {
        Self {
            inner: Rc::new(MockInner {
                handler: RefCell::new(Box::new(handler)),
                requests: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn always(response: HttpResponse) -> Self {
        Self::new(move |_| Reply::Now(response.clone()))
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.inner.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.inner.requests.borrow().len()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, _base_url: &str, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.inner.requests.borrow_mut().push(request.clone());
        let reply = {
            let mut handler = self.inner.handler.borrow_mut();
            (&mut *handler)(request)
        };
        match reply {
            Reply::Now(response) => Ok(response),
            Reply::Deferred(receiver) => receiver
                .await
                .map_err(|_| ApiError::Network("request dropped".to_string())),
            Reply::Fail(message) => Err(ApiError::Network(message)),
        }
    }
}

pub fn client_with(
    transport: &MockTransport,
    session: SessionStore,
    navigator: Rc<dyn Navigator>,
) -> HttpClient {
    HttpClient::new("http://test.local", Rc::new(transport.clone()), session, navigator)
}

pub fn api_with(
    transport: &MockTransport,
    session: SessionStore,
    navigator: Rc<dyn Navigator>,
) -> ApiClient {
    ApiClient::new(client_with(transport, session, navigator))
}

/// Superficie de mapa que solo guarda lo que recibe
#[derive(Default)]
pub struct RecordingSurface {
    pub config: Option<MapViewConfig>,
    pub markers: Vec<MapMarker>,
    pub destroyed: bool,
}

impl MapSurface for RecordingSurface {
    fn mount(&mut self, _container_id: &str, config: &MapViewConfig) -> Result<(), MapError> {
        self.config = Some(config.clone());
        self.destroyed = false;
        Ok(())
    }

    fn set_markers(&mut self, markers: &[MapMarker]) -> Result<(), MapError> {
        if self.config.is_none() {
            return Err(MapError::NotReady);
        }
        self.markers = markers.to_vec();
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.config.is_some() && !self.destroyed
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }
}
