//! Aggregate counts for the analytics dashboard.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSeriesDataPoint {
    pub date: String,
    pub count: u64,
    #[serde(default)]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserStats {
    pub total_users: u64,
    pub new_users_today: u64,
    pub new_users_this_week: u64,
    pub new_users_this_month: u64,
    pub active_users_today: u64,
    pub active_users_this_week: u64,
    pub active_users_this_month: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityStats {
    pub total_activities: u64,
    pub activities_today: u64,
    pub activities_this_week: u64,
    pub activities_this_month: u64,
    pub activities_by_action: HashMap<String, u64>,
    pub activities_by_resource_type: HashMap<String, u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrganizationStats {
    pub total_organizations: u64,
    pub total_memberships: u64,
    pub average_members_per_org: f64,
    pub organizations_created_today: u64,
    pub organizations_created_this_week: u64,
    pub organizations_created_this_month: u64,
}

/// Timeline series; `period` is `day`, `week` or `month`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSeries {
    pub period: String,
    pub data: Vec<TimeSeriesDataPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    pub user_stats: UserStats,
    pub activity_stats: ActivityStats,
    pub organization_stats: OrganizationStats,
    pub activity_timeline: TimeSeries,
}

/// Bucket size for timeline queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Period {
    #[default]
    Day,
    Week,
    Month,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "day" => Some(Period::Day),
            "week" => Some(Period::Week),
            "month" => Some(Period::Month),
            _ => None,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort a count breakdown descending by count, then by name.
pub fn sorted_breakdown(counts: &HashMap<String, u64>) -> Vec<(&str, u64)> {
    let mut rows: Vec<(&str, u64)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_breakdown_orders_by_count_then_name() {
        let counts = HashMap::from([
            ("user.login".to_string(), 4),
            ("org.create".to_string(), 9),
            ("member.add".to_string(), 4),
        ]);

        assert_eq!(
            sorted_breakdown(&counts),
            vec![("org.create", 9), ("member.add", 4), ("user.login", 4)]
        );
    }
}
