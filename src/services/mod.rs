pub mod session_store;
pub mod http_client;
pub mod auth_service;
pub mod issue_service;
pub mod notification_service;
pub mod api_client;

pub use session_store::SessionStore;
pub use http_client::{HttpClient, HttpRequest, HttpResponse, Transport};
pub use auth_service::AuthService;
pub use issue_service::IssueService;
pub use notification_service::NotificationService;
pub use api_client::ApiClient;
