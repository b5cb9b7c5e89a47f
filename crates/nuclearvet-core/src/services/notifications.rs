use crate::api::{ApiClient, ApiError, NO_BODY};
use crate::models::{Notification, Payload};

#[derive(Clone)]
pub struct NotificationService {
    api: ApiClient,
}

impl NotificationService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn for_recipient(&self, recipient_id: i64) -> Result<Vec<Notification>, ApiError> {
        let notifications: Payload<Vec<Notification>> = self
            .api
            .get(&format!("/notificaciones/destinatario/{}", recipient_id), None)
            .await?;
        Ok(notifications.into_inner())
    }

    pub async fn unread(&self, recipient_id: i64) -> Result<Vec<Notification>, ApiError> {
        let notifications: Payload<Vec<Notification>> = self
            .api
            .get(
                &format!("/notificaciones/destinatario/{}/no-leidas", recipient_id),
                None,
            )
            .await?;
        Ok(notifications.into_inner())
    }

    pub async fn unread_count(&self, recipient_id: i64) -> Result<u64, ApiError> {
        let count: Payload<u64> = self
            .api
            .get(
                &format!("/notificaciones/destinatario/{}/count-no-leidas", recipient_id),
                None,
            )
            .await?;
        Ok(count.into_inner())
    }

    pub async fn mark_read(&self, id: i64) -> Result<Notification, ApiError> {
        let notification: Payload<Notification> = self
            .api
            .put(&format!("/notificaciones/{}/marcar-leida", id), NO_BODY, None)
            .await?;
        Ok(notification.into_inner())
    }

    pub async fn mark_all_read(&self, recipient_id: i64) -> Result<(), ApiError> {
        let _: Payload<Option<serde_json::Value>> = self
            .api
            .put(
                &format!("/notificaciones/destinatario/{}/marcar-todas-leidas", recipient_id),
                NO_BODY,
                None,
            )
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let _: Payload<Option<serde_json::Value>> = self
            .api
            .delete(&format!("/notificaciones/{}", id), None)
            .await?;
        Ok(())
    }
}
