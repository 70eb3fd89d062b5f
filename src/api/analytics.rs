//! Analytics endpoints.

use crate::errors::ClientResult;
use crate::http::HttpClient;
use crate::models::{
    ActivityStats, DashboardStats, OrganizationStats, Period, TimeSeries, UserStats,
};

/// GET /analytics/dashboard
pub async fn dashboard(http: &HttpClient) -> ClientResult<DashboardStats> {
    http.get("/analytics/dashboard").await
}

/// GET /analytics/users/stats
pub async fn user_stats(http: &HttpClient) -> ClientResult<UserStats> {
    http.get("/analytics/users/stats").await
}

/// GET /analytics/users/growth
pub async fn user_growth(http: &HttpClient, days: u32) -> ClientResult<TimeSeries> {
    http.get_with_query("/analytics/users/growth", &[("days", days)])
        .await
}

/// GET /analytics/activities/stats
pub async fn activity_stats(http: &HttpClient) -> ClientResult<ActivityStats> {
    http.get("/analytics/activities/stats").await
}

/// GET /analytics/activities/timeline
pub async fn activity_timeline(
    http: &HttpClient,
    days: u32,
    period: Period,
) -> ClientResult<TimeSeries> {
    let days = days.to_string();
    http.get_with_query(
        "/analytics/activities/timeline",
        &[("days", days.as_str()), ("period", period.as_str())],
    )
    .await
}

/// GET /analytics/organizations/stats
pub async fn organization_stats(http: &HttpClient) -> ClientResult<OrganizationStats> {
    http.get("/analytics/organizations/stats").await
}
