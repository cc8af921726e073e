use crate::error::ApiError;
use crate::models::{Notification, NotificationQuery, UnreadCount};
use crate::services::http_client::{HttpClient, HttpRequest};

/// Endpoints `/api/notifications/*`
#[derive(Clone)]
pub struct NotificationService {
    http: HttpClient,
}

impl NotificationService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, query: &NotificationQuery) -> Result<Vec<Notification>, ApiError> {
        self.http.get_json("/api/notifications/", query.to_pairs()).await
    }

    pub async fn unread_count(&self) -> Result<u64, ApiError> {
        let count: UnreadCount = self
            .http
            .get_json("/api/notifications/unread/count", Vec::new())
            .await?;
        Ok(count.unread_count)
    }

    pub async fn mark_as_read(&self, id: i64) -> Result<Notification, ApiError> {
        self.http
            .send_json(HttpRequest::put(format!("/api/notifications/{}/read", id)))
            .await
    }

    pub async fn mark_all_as_read(&self) -> Result<(), ApiError> {
        self.http.send(HttpRequest::put("/api/notifications/read-all")).await?;
        log::info!("📭 [NOTIFICATIONS] Todas marcadas como leídas");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::http_client::{HttpResponse, Method};
    use crate::test_support::{client_with, json_response, notification, signed_in_store, MockTransport, RecordingNavigator, Reply};
    use std::rc::Rc;

    fn service(transport: &MockTransport) -> NotificationService {
        let (store, _) = signed_in_store();
        NotificationService::new(client_with(transport, store, Rc::new(RecordingNavigator::default())))
    }

    #[tokio::test]
    async fn list_sends_unread_only_flag() {
        let transport = MockTransport::always(json_response(200, &vec![notification(1, false)]));
        let items = service(&transport).list(&NotificationQuery::unread(5)).await.unwrap();
        assert_eq!(items.len(), 1);

        let sent = &transport.requests()[0];
        assert_eq!(sent.path, "/api/notifications/");
        assert_eq!(sent.query_value("limit"), Some("5"));
        assert_eq!(sent.query_value("unread_only"), Some("true"));
        assert_eq!(sent.query_value("skip"), None);
    }

    #[tokio::test]
    async fn unread_count_reads_the_counter_field() {
        let transport = MockTransport::always(HttpResponse::new(200, r#"{"unread_count": 3}"#));
        assert_eq!(service(&transport).unread_count().await.unwrap(), 3);
        assert_eq!(transport.requests()[0].path, "/api/notifications/unread/count");
    }

    #[tokio::test]
    async fn mark_endpoints_use_put() {
        let transport = MockTransport::new(|request: &HttpRequest| match request.path.as_str() {
            "/api/notifications/7/read" => Reply::Now(json_response(200, &notification(7, true))),
            _ => Reply::Now(HttpResponse::new(200, r#"{"message":"Marked 2 notifications as read"}"#)),
        });
        let svc = service(&transport);

        assert!(svc.mark_as_read(7).await.unwrap().is_read);
        svc.mark_all_as_read().await.unwrap();

        let sent = transport.requests();
        assert!(sent.iter().all(|r| r.method == Method::Put));
        assert_eq!(sent[1].path, "/api/notifications/read-all");
    }
}
