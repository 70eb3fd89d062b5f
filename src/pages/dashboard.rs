//! Analytics dashboard.

use std::fmt;

use crate::api::analytics;
use crate::models::{sorted_breakdown, DashboardStats, Period, TimeSeries};
use crate::AppState;

use super::{ActionOutcome, PageState};

/// Days of history fetched for the growth chart.
pub const DEFAULT_HISTORY_DAYS: u32 = 30;

pub struct DashboardPage {
    app: AppState,
    state: PageState<DashboardStats>,
    growth: Option<TimeSeries>,
}

impl DashboardPage {
    pub fn new(app: AppState) -> Self {
        Self {
            app,
            state: PageState::Loading,
            growth: None,
        }
    }

    pub fn state(&self) -> &PageState<DashboardStats> {
        &self.state
    }

    pub fn growth(&self) -> Option<&TimeSeries> {
        self.growth.as_ref()
    }

    /// Fetch the combined stats and the user growth series together.
    pub async fn load(&mut self) -> &PageState<DashboardStats> {
        self.state = PageState::Loading;

        let (stats, growth) = tokio::join!(
            analytics::dashboard(&self.app.http),
            analytics::user_growth(&self.app.http, DEFAULT_HISTORY_DAYS)
        );

        self.growth = match growth {
            Ok(series) => Some(series),
            Err(err) => {
                tracing::warn!("Failed to load user growth: {}", err);
                None
            }
        };
        self.state = PageState::from_result(stats);
        &self.state
    }

    /// Replace the timeline with a different window or bucket size.
    pub async fn load_timeline(&mut self, days: u32, period: Period) -> ActionOutcome {
        let days = days.clamp(1, 365);
        match analytics::activity_timeline(&self.app.http, days, period).await {
            Ok(series) => {
                if let PageState::Ready(stats) = &mut self.state {
                    stats.activity_timeline = series;
                }
                ActionOutcome::Success(format!("Timeline: last {} days by {}", days, period))
            }
            Err(err) => ActionOutcome::from_error(&err),
        }
    }

    /// Re-fetch each section from its own endpoint.
    pub async fn refresh_sections(&mut self) -> ActionOutcome {
        let (users, activities, organizations) = tokio::join!(
            analytics::user_stats(&self.app.http),
            analytics::activity_stats(&self.app.http),
            analytics::organization_stats(&self.app.http)
        );

        let (users, activities, organizations) = match (users, activities, organizations) {
            (Ok(u), Ok(a), Ok(o)) => (u, a, o),
            (Err(err), _, _) | (_, Err(err), _) | (_, _, Err(err)) => {
                return ActionOutcome::from_error(&err)
            }
        };

        match &mut self.state {
            PageState::Ready(stats) => {
                stats.user_stats = users;
                stats.activity_stats = activities;
                stats.organization_stats = organizations;
                ActionOutcome::Success("Statistics refreshed".to_string())
            }
            _ => {
                self.load().await;
                ActionOutcome::Success("Dashboard loaded".to_string())
            }
        }
    }
}

impl fmt::Display for DashboardPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== Dashboard ==")?;
        if !self.state.fmt_pending(f)? {
            return Ok(());
        }
        let Some(stats) = self.state.ready() else {
            return Ok(());
        };

        let u = &stats.user_stats;
        writeln!(f, "Users: {} total", u.total_users)?;
        writeln!(
            f,
            "  new      today {:>5}  week {:>5}  month {:>5}",
            u.new_users_today, u.new_users_this_week, u.new_users_this_month
        )?;
        writeln!(
            f,
            "  active   today {:>5}  week {:>5}  month {:>5}",
            u.active_users_today, u.active_users_this_week, u.active_users_this_month
        )?;

        let a = &stats.activity_stats;
        writeln!(f, "Activities: {} total", a.total_activities)?;
        writeln!(
            f,
            "  today {:>5}  week {:>5}  month {:>5}",
            a.activities_today, a.activities_this_week, a.activities_this_month
        )?;
        writeln!(f, "  by action:")?;
        for (action, count) in sorted_breakdown(&a.activities_by_action) {
            writeln!(f, "    {:<28} {:>6}", action, count)?;
        }
        writeln!(f, "  by resource type:")?;
        for (kind, count) in sorted_breakdown(&a.activities_by_resource_type) {
            writeln!(f, "    {:<28} {:>6}", kind, count)?;
        }

        let o = &stats.organization_stats;
        writeln!(
            f,
            "Organizations: {} total, {} memberships, {:.2} members/org",
            o.total_organizations, o.total_memberships, o.average_members_per_org
        )?;
        writeln!(
            f,
            "  created  today {:>5}  week {:>5}  month {:>5}",
            o.organizations_created_today,
            o.organizations_created_this_week,
            o.organizations_created_this_month
        )?;

        writeln!(f, "Activity timeline (by {}):", stats.activity_timeline.period)?;
        fmt_series(f, &stats.activity_timeline)?;

        if let Some(growth) = &self.growth {
            writeln!(f, "User growth (by {}):", growth.period)?;
            fmt_series(f, growth)?;
        }
        Ok(())
    }
}

fn fmt_series(f: &mut fmt::Formatter<'_>, series: &TimeSeries) -> fmt::Result {
    if series.data.is_empty() {
        return writeln!(f, "  (no data)");
    }
    for point in &series.data {
        writeln!(f, "  {}  {:>6}", point.date, point.count)?;
    }
    Ok(())
}
