use crate::error::ApiError;
use crate::models::{Issue, IssueQuery, IssueStatus, IssueUpdate, NewIssue};
use crate::services::http_client::{FormPart, HttpClient, HttpRequest};

/// Endpoints `/api/issues/*`
#[derive(Clone)]
pub struct IssueService {
    http: HttpClient,
}

impl IssueService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Listado en el orden del servidor
    pub async fn list(&self, query: &IssueQuery) -> Result<Vec<Issue>, ApiError> {
        let issues: Vec<Issue> = self.http.get_json("/api/issues/", query.to_pairs()).await?;
        log::info!("📋 [ISSUES] {} issues recibidos", issues.len());
        Ok(issues)
    }

    pub async fn get(&self, id: i64) -> Result<Issue, ApiError> {
        self.http.get_json(&format!("/api/issues/{}", id), Vec::new()).await
    }

    /// Alta multipart: title, description, category, latitude, longitude, image?
    pub async fn create(&self, draft: &NewIssue) -> Result<Issue, ApiError> {
        let mut parts = vec![
            ("title".to_string(), FormPart::Text(draft.title.clone())),
            ("description".to_string(), FormPart::Text(draft.description.clone())),
            ("category".to_string(), FormPart::Text(draft.category.as_str().to_string())),
            ("latitude".to_string(), FormPart::Text(draft.location.latitude.to_string())),
            ("longitude".to_string(), FormPart::Text(draft.location.longitude.to_string())),
        ];
        if let Some(image) = &draft.image {
            parts.push((
                "image".to_string(),
                FormPart::File {
                    file_name: image.file_name.clone(),
                    content_type: image.content_type.clone(),
                    bytes: image.bytes.clone(),
                },
            ));
        }

        log::info!("📍 [ISSUES] Reportando '{}' en ({}, {})",
                   draft.title, draft.location.latitude, draft.location.longitude);
        let issue: Issue = self
            .http
            .send_json(HttpRequest::post("/api/issues/").with_multipart(parts))
            .await?;
        log::info!("✅ [ISSUES] Issue {} creado", issue.id);
        Ok(issue)
    }

    pub async fn update(&self, id: i64, changes: &IssueUpdate) -> Result<Issue, ApiError> {
        self.http
            .send_json(HttpRequest::patch(format!("/api/issues/{}", id)).with_json(changes)?)
            .await
    }

    /// Cambio de estado (solo admin en el backend)
    pub async fn update_status(&self, id: i64, status: IssueStatus) -> Result<Issue, ApiError> {
        let request = HttpRequest::put(format!("/api/issues/{}/status", id))
            .with_query(vec![("new_status".to_string(), status.as_str().to_string())]);
        self.http.send_json(request).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.http.send(HttpRequest::delete(format!("/api/issues/{}", id))).await?;
        log::info!("🗑️ [ISSUES] Issue {} eliminado", id);
        Ok(())
    }
}
