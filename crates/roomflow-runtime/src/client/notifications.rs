use reqwest::Method;
use roomflow_types::NotificationResponse;
use serde::Deserialize;

use crate::http::ApiClient;
use crate::Result;

/// Unread count as the backend sends it: a bare number or `{ "count": n }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum UnreadCount {
    Bare(u64),
    Wrapped { count: u64 },
}

impl UnreadCount {
    pub(crate) fn value(&self) -> u64 {
        match self {
            UnreadCount::Bare(n) | UnreadCount::Wrapped { count: n } => *n,
        }
    }
}

#[derive(Clone)]
pub struct NotificationOps {
    api: ApiClient,
}

impl NotificationOps {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<NotificationResponse>> {
        self.api.get("notifications").await
    }

    pub async fn unread(&self) -> Result<Vec<NotificationResponse>> {
        self.api.get("notifications/unread").await
    }

    pub async fn unread_count(&self) -> Result<u64> {
        let count: UnreadCount = self.api.get("notifications/unread/count").await?;
        Ok(count.value())
    }

    pub async fn mark_read(&self, notification_id: u64) -> Result<NotificationResponse> {
        self.api
            .put::<(), _>(&format!("notifications/{}/read", notification_id), None)
            .await
    }

    pub async fn mark_all_read(&self) -> Result<Option<String>> {
        self.api
            .ack::<()>(Method::PUT, "notifications/read-all", None)
            .await
    }

    pub async fn delete(&self, notification_id: u64) -> Result<Option<String>> {
        self.api
            .ack::<()>(
                Method::DELETE,
                &format!("notifications/{}", notification_id),
                None,
            )
            .await
    }

    pub async fn delete_all(&self) -> Result<Option<String>> {
        self.api
            .ack::<()>(Method::DELETE, "notifications", None)
            .await
    }

    pub fn session_active(&self) -> bool {
        self.api.session().is_authenticated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unread_count_shapes() {
        let bare: UnreadCount = serde_json::from_str("5").unwrap();
        assert_eq!(bare.value(), 5);
        let wrapped: UnreadCount = serde_json::from_str(r#"{"count": 12}"#).unwrap();
        assert_eq!(wrapped.value(), 12);
    }
}
