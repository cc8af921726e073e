use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub issue_id: Option<i64>,
}

/// Parámetros de `GET /api/notifications/`
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct NotificationQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub unread_only: Option<bool>,
}

impl NotificationQuery {
    pub fn unread(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            unread_only: Some(true),
            ..Self::default()
        }
    }

    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(skip) = self.skip {
            pairs.push(("skip".to_string(), skip.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(unread_only) = self.unread_only {
            pairs.push(("unread_only".to_string(), unread_only.to_string()));
        }
        pairs
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct UnreadCount {
    pub unread_count: u64,
}
