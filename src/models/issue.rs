use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    #[default]
    Infrastructure,
    Safety,
    Environment,
    Health,
    Other,
}

impl IssueCategory {
    pub const ALL: [IssueCategory; 5] = [
        IssueCategory::Infrastructure,
        IssueCategory::Safety,
        IssueCategory::Environment,
        IssueCategory::Health,
        IssueCategory::Other,
    ];

    /// Valor en el wire (query string y multipart)
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCategory::Infrastructure => "infrastructure",
            IssueCategory::Safety => "safety",
            IssueCategory::Environment => "environment",
            IssueCategory::Health => "health",
            IssueCategory::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IssueCategory::Infrastructure => "Infrastructure",
            IssueCategory::Safety => "Safety",
            IssueCategory::Environment => "Environment",
            IssueCategory::Health => "Health",
            IssueCategory::Other => "Other",
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IssueCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// Ciclo de vida de un issue, controlado por el backend
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    #[default]
    Pending,
    InProgress,
    Resolved,
    Closed,
}

impl IssueStatus {
    pub const ALL: [IssueStatus; 4] = [
        IssueStatus::Pending,
        IssueStatus::InProgress,
        IssueStatus::Resolved,
        IssueStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Pending => "pending",
            IssueStatus::InProgress => "in_progress",
            IssueStatus::Resolved => "resolved",
            IssueStatus::Closed => "closed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IssueStatus::Pending => "Pending",
            IssueStatus::InProgress => "In Progress",
            IssueStatus::Resolved => "Resolved",
            IssueStatus::Closed => "Closed",
        }
    }

    /// Resolved y closed cuentan como "resueltos" en el dashboard
    pub fn is_settled(&self) -> bool {
        matches!(self, IssueStatus::Resolved | IssueStatus::Closed)
    }

    /// Clase CSS del badge
    pub fn badge_class(&self) -> &'static str {
        match self {
            IssueStatus::Pending => "badge badge-pending",
            IssueStatus::InProgress => "badge badge-in-progress",
            IssueStatus::Resolved => "badge badge-resolved",
            IssueStatus::Closed => "badge badge-closed",
        }
    }

    /// Color del marcador en el mapa
    pub fn marker_color(&self) -> &'static str {
        match self {
            IssueStatus::Pending => "#eab308",
            IssueStatus::InProgress => "#3b82f6",
            IssueStatus::Resolved => "#22c55e",
            IssueStatus::Closed => "#6b7280",
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IssueStatus::ALL
            .iter()
            .copied()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| format!("Unknown status: {}", s))
    }
}

/// Proyección de solo lectura de un issue del backend
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Issue {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: IssueCategory,
    pub status: IssueStatus,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    pub reporter_id: i64,
}

impl Issue {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Extracto para tarjetas (máx. `max_chars` caracteres)
    pub fn excerpt(&self, max_chars: usize) -> String {
        if self.description.chars().count() <= max_chars {
            return self.description.clone();
        }
        let cut: String = self.description.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Filtros de una página (nunca se persisten)
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct IssueFilters {
    pub category: Option<IssueCategory>,
    pub status: Option<IssueStatus>,
}

impl IssueFilters {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.status.is_none()
    }

    pub fn to_query(&self) -> IssueQuery {
        IssueQuery {
            category: self.category,
            status: self.status,
            ..IssueQuery::default()
        }
    }
}

/// Parámetros de `GET /api/issues/`
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct IssueQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<IssueCategory>,
    pub status: Option<IssueStatus>,
}

impl IssueQuery {
    pub fn limited(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Pares de query string; los campos ausentes se omiten
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(skip) = self.skip {
            pairs.push(("skip".to_string(), skip.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(category) = self.category {
            pairs.push(("category".to_string(), category.as_str().to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status".to_string(), status.as_str().to_string()));
        }
        pairs
    }
}

/// Imagen adjunta al reporte (bytes ya leídos del `<input type=file>`)
#[derive(Clone, PartialEq, Debug)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Borrador multipart para `POST /api/issues/`
#[derive(Clone, PartialEq, Debug)]
pub struct NewIssue {
    pub title: String,
    pub description: String,
    pub category: IssueCategory,
    pub location: Coordinates,
    pub image: Option<ImageUpload>,
}

/// Cuerpo de `PATCH /api/issues/{id}`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct IssueUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<IssueCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<IssueStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_deserializes_from_backend_payload() {
        let json = r#"{
            "id": 7,
            "title": "Pothole",
            "description": "Deep pothole on Main St",
            "category": "infrastructure",
            "status": "in_progress",
            "latitude": 40.71,
            "longitude": -74.0,
            "image_url": null,
            "created_at": "2024-03-01T10:00:00+00:00",
            "updated_at": null,
            "reporter_id": 3
        }"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.id, 7);
        assert_eq!(issue.status, IssueStatus::InProgress);
        assert_eq!(issue.category, IssueCategory::Infrastructure);
        assert!(issue.image_url.is_none());
    }

    #[test]
    fn query_omits_absent_fields() {
        let query = IssueQuery {
            limit: Some(5),
            status: Some(IssueStatus::Closed),
            ..IssueQuery::default()
        };
        assert_eq!(
            query.to_pairs(),
            vec![
                ("limit".to_string(), "5".to_string()),
                ("status".to_string(), "closed".to_string()),
            ]
        );
        assert!(IssueQuery::default().to_pairs().is_empty());
    }

    #[test]
    fn status_parses_wire_names() {
        assert_eq!("in_progress".parse::<IssueStatus>(), Ok(IssueStatus::InProgress));
        assert!("done".parse::<IssueStatus>().is_err());
        assert!(IssueStatus::Closed.is_settled());
        assert!(!IssueStatus::InProgress.is_settled());
    }

    #[test]
    fn patch_body_skips_unset_fields() {
        let update = IssueUpdate {
            title: Some("New title".to_string()),
            ..IssueUpdate::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({ "title": "New title" })
        );
    }

    #[test]
    fn excerpt_truncates_on_char_boundary() {
        let issue = Issue {
            id: 1,
            title: "t".into(),
            description: "ñandú ñandú".into(),
            category: IssueCategory::Other,
            status: IssueStatus::Pending,
            latitude: 0.0,
            longitude: 0.0,
            image_url: None,
            created_at: String::new(),
            updated_at: None,
            reporter_id: 1,
        };
        assert_eq!(issue.excerpt(5), "ñandú...");
        assert_eq!(issue.excerpt(100), "ñandú ñandú");
    }
}
