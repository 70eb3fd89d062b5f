//! Activity log endpoints.

use serde::Serialize;

use crate::errors::ClientResult;
use crate::http::HttpClient;
use crate::models::{ActivityLog, ActivityLogList, ActivityLogQuery};

/// Query accepted by `/activity/logs/me`, which only filters by action.
#[derive(Serialize)]
struct OwnLogsQuery<'a> {
    page: u32,
    page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<&'a str>,
}

/// Query accepted by `/activity/logs/org/{id}`.
#[derive(Serialize)]
struct OrgLogsQuery<'a> {
    page: u32,
    page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<&'a str>,
}

/// GET /activity/logs
pub async fn logs(http: &HttpClient, query: &ActivityLogQuery) -> ClientResult<ActivityLogList> {
    http.get_with_query("/activity/logs", query).await
}

/// GET /activity/logs/me
pub async fn my_logs(
    http: &HttpClient,
    page: u32,
    page_size: u32,
    action: Option<&str>,
) -> ClientResult<ActivityLogList> {
    http.get_with_query(
        "/activity/logs/me",
        &OwnLogsQuery {
            page,
            page_size,
            action,
        },
    )
    .await
}

/// GET /activity/logs/org/{id}
pub async fn org_logs(
    http: &HttpClient,
    org_id: i64,
    page: u32,
    page_size: u32,
    user_id: Option<i64>,
    action: Option<&str>,
) -> ClientResult<ActivityLogList> {
    http.get_with_query(
        &format!("/activity/logs/org/{}", org_id),
        &OrgLogsQuery {
            page,
            page_size,
            user_id,
            action,
        },
    )
    .await
}

/// GET /activity/logs/{id}
pub async fn log(http: &HttpClient, log_id: i64) -> ClientResult<ActivityLog> {
    http.get(&format!("/activity/logs/{}", log_id)).await
}
