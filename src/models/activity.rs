//! Activity (audit) log records.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityLog {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    /// Dotted action name such as `org.create` or `member.add`.
    pub action: String,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub resource_id: Option<i64>,
    #[serde(default)]
    pub organization_id: Option<i64>,
    #[serde(default)]
    pub details: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub organization_name: Option<String>,
}

/// One page of activity logs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityLogList {
    pub logs: Vec<ActivityLog>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

/// Query string for the activity log endpoints. Unset filters are omitted.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ActivityLogQuery {
    pub page: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<i64>,
}
