//! Notification endpoints.

use crate::errors::ClientResult;
use crate::http::HttpClient;
use crate::models::{
    MarkReadRequest, MarkReadResult, Message, Notification, NotificationList, NotificationQuery,
    UnreadCount,
};

/// GET /notifications
pub async fn list(http: &HttpClient, query: &NotificationQuery) -> ClientResult<NotificationList> {
    http.get_with_query("/notifications", query).await
}

/// GET /notifications/unread-count
pub async fn unread_count(http: &HttpClient) -> ClientResult<UnreadCount> {
    http.get("/notifications/unread-count").await
}

/// GET /notifications/{id}
pub async fn get(http: &HttpClient, notification_id: i64) -> ClientResult<Notification> {
    http.get(&format!("/notifications/{}", notification_id))
        .await
}

/// PATCH /notifications/{id}/read
pub async fn mark_read(http: &HttpClient, notification_id: i64) -> ClientResult<Notification> {
    http.patch(
        &format!("/notifications/{}/read", notification_id),
        &serde_json::json!({}),
    )
    .await
}

/// POST /notifications/mark-read
pub async fn mark_many_read(http: &HttpClient, ids: &[i64]) -> ClientResult<MarkReadResult> {
    http.post(
        "/notifications/mark-read",
        &MarkReadRequest {
            notification_ids: ids,
        },
    )
    .await
}

/// POST /notifications/mark-all-read
pub async fn mark_all_read(http: &HttpClient) -> ClientResult<MarkReadResult> {
    http.post_empty("/notifications/mark-all-read").await
}

/// DELETE /notifications/{id}
pub async fn delete(http: &HttpClient, notification_id: i64) -> ClientResult<Message> {
    http.delete(&format!("/notifications/{}", notification_id))
        .await
}
