//! Activity log viewer with filters and pagination.

use std::fmt;

use crate::api::activity;
use crate::errors::{ClientError, ClientResult};
use crate::models::{ActivityLog, ActivityLogList, ActivityLogQuery};
use crate::AppState;

use super::{format_time, ActionOutcome, PageState, Pagination};

/// Which log endpoint the viewer reads from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActivityScope {
    /// Everything the user can see
    #[default]
    All,
    /// Only the user's own actions
    Mine,
    /// The current organization from the context
    CurrentOrg,
}

impl ActivityScope {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(ActivityScope::All),
            "mine" | "me" => Some(ActivityScope::Mine),
            "org" => Some(ActivityScope::CurrentOrg),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityScope::All => "all",
            ActivityScope::Mine => "mine",
            ActivityScope::CurrentOrg => "org",
        }
    }

    /// Whether this scope's endpoint takes the filter named by `change`.
    /// `/activity/logs/me` only filters by action; the organization endpoint
    /// adds the user.
    pub fn accepts(&self, change: &FilterChange) -> bool {
        match self {
            ActivityScope::All => true,
            ActivityScope::Mine => matches!(change, FilterChange::Action(_)),
            ActivityScope::CurrentOrg => {
                matches!(change, FilterChange::Action(_) | FilterChange::UserId(_))
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityFilters {
    pub action: Option<String>,
    pub resource_type: Option<String>,
    pub organization_id: Option<i64>,
    pub user_id: Option<i64>,
}

impl ActivityFilters {
    pub fn is_empty(&self) -> bool {
        *self == ActivityFilters::default()
    }

    /// Drop the filters `scope`'s endpoint does not take.
    fn restrict_to(&mut self, scope: ActivityScope) {
        if !scope.accepts(&FilterChange::ResourceType(None)) {
            self.resource_type = None;
        }
        if !scope.accepts(&FilterChange::OrganizationId(None)) {
            self.organization_id = None;
        }
        if !scope.accepts(&FilterChange::UserId(None)) {
            self.user_id = None;
        }
    }
}

/// One filter change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Action(Option<String>),
    ResourceType(Option<String>),
    OrganizationId(Option<i64>),
    UserId(Option<i64>),
}

impl FilterChange {
    pub fn name(&self) -> &'static str {
        match self {
            FilterChange::Action(_) => "action",
            FilterChange::ResourceType(_) => "resource type",
            FilterChange::OrganizationId(_) => "organization",
            FilterChange::UserId(_) => "user",
        }
    }

    fn is_set(&self) -> bool {
        match self {
            FilterChange::Action(v) | FilterChange::ResourceType(v) => {
                v.as_deref().is_some_and(|v| !v.trim().is_empty())
            }
            FilterChange::OrganizationId(v) | FilterChange::UserId(v) => v.is_some(),
        }
    }
}

pub struct ActivityLogPage {
    app: AppState,
    scope: ActivityScope,
    filters: ActivityFilters,
    pagination: Pagination,
    logs: PageState<Vec<ActivityLog>>,
    selected: Option<ActivityLog>,
}

impl ActivityLogPage {
    pub fn new(app: AppState) -> Self {
        Self {
            app,
            scope: ActivityScope::default(),
            filters: ActivityFilters::default(),
            pagination: Pagination::default(),
            logs: PageState::Loading,
            selected: None,
        }
    }

    pub fn scope(&self) -> ActivityScope {
        self.scope
    }

    pub fn filters(&self) -> &ActivityFilters {
        &self.filters
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn logs(&self) -> &PageState<Vec<ActivityLog>> {
        &self.logs
    }

    pub fn selected(&self) -> Option<&ActivityLog> {
        self.selected.as_ref()
    }

    /// Apply a filter change. The page goes back to 1.
    ///
    /// Setting a filter the current scope cannot send is rejected and leaves
    /// the page untouched; clearing one is always allowed.
    pub fn set_filter(&mut self, change: FilterChange) -> ClientResult<()> {
        if change.is_set() && !self.scope.accepts(&change) {
            return Err(ClientError::validation(format!(
                "The {} view cannot filter by {}",
                self.scope.as_str(),
                change.name()
            )));
        }

        let normalize = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        match change {
            FilterChange::Action(v) => self.filters.action = normalize(v),
            FilterChange::ResourceType(v) => self.filters.resource_type = normalize(v),
            FilterChange::OrganizationId(v) => self.filters.organization_id = v,
            FilterChange::UserId(v) => self.filters.user_id = v,
        }
        self.pagination.reset();
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        self.filters = ActivityFilters::default();
        self.pagination.reset();
    }

    /// Switch endpoints; filters the new endpoint does not take are dropped.
    pub fn set_scope(&mut self, scope: ActivityScope) {
        self.scope = scope;
        self.filters.restrict_to(scope);
        self.pagination.reset();
    }

    pub fn set_page_size(&mut self, page_size: u32) {
        self.pagination.set_page_size(page_size);
    }

    /// Query for the `All` scope built from the current page state.
    pub fn query(&self) -> ActivityLogQuery {
        ActivityLogQuery {
            page: self.pagination.page(),
            page_size: self.pagination.page_size(),
            user_id: self.filters.user_id,
            action: self.filters.action.clone(),
            resource_type: self.filters.resource_type.clone(),
            organization_id: self.filters.organization_id,
        }
    }

    pub async fn load(&mut self) -> &PageState<Vec<ActivityLog>> {
        self.logs = PageState::Loading;
        let mut result = self.fetch().await;
        if let Ok(list) = &result {
            // The total shrank below the current page; fetch the clamped one.
            if self.pagination.set_total(list.total) {
                result = self.fetch().await;
                if let Ok(list) = &result {
                    self.pagination.set_total(list.total);
                }
            }
        }
        self.logs = PageState::from_result(result.map(|list| list.logs));
        &self.logs
    }

    async fn fetch(&self) -> ClientResult<ActivityLogList> {
        let page = self.pagination.page();
        let page_size = self.pagination.page_size();
        let action = self.filters.action.as_deref();

        match self.scope {
            ActivityScope::All => activity::logs(&self.app.http, &self.query()).await,
            ActivityScope::Mine => {
                activity::my_logs(&self.app.http, page, page_size, action).await
            }
            ActivityScope::CurrentOrg => {
                let org = self
                    .app
                    .orgs
                    .current_org()
                    .ok_or_else(|| ClientError::validation("Select an organization first"))?;
                activity::org_logs(
                    &self.app.http,
                    org.id,
                    page,
                    page_size,
                    self.filters.user_id,
                    action,
                )
                .await
            }
        }
    }

    pub async fn next_page(&mut self) -> bool {
        self.navigate(|p| p.next()).await
    }

    pub async fn prev_page(&mut self) -> bool {
        self.navigate(|p| p.prev()).await
    }

    pub async fn go_to_page(&mut self, page: u32) -> bool {
        self.navigate(|p| p.go_to(page)).await
    }

    /// Move and re-fetch; nothing is requested when the page cannot move.
    async fn navigate(&mut self, step: impl FnOnce(&mut Pagination) -> bool) -> bool {
        if !step(&mut self.pagination) {
            return false;
        }
        self.load().await;
        true
    }

    pub async fn show(&mut self, log_id: i64) -> ActionOutcome {
        match activity::log(&self.app.http, log_id).await {
            Ok(log) => {
                self.selected = Some(log);
                ActionOutcome::Success(format!("Activity log {}", log_id))
            }
            Err(err) => ActionOutcome::from_error(&err),
        }
    }
}

impl fmt::Display for ActivityLogPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== Activity ({}) ==", self.scope.as_str())?;
        if !self.filters.is_empty() {
            let mut parts = Vec::new();
            if let Some(v) = &self.filters.action {
                parts.push(format!("action={}", v));
            }
            if let Some(v) = &self.filters.resource_type {
                parts.push(format!("resource_type={}", v));
            }
            if let Some(v) = self.filters.organization_id {
                parts.push(format!("organization_id={}", v));
            }
            if let Some(v) = self.filters.user_id {
                parts.push(format!("user_id={}", v));
            }
            writeln!(f, "Filters: {}", parts.join(", "))?;
        }

        if self.logs.fmt_pending(f)? {
            if let Some(logs) = self.logs.ready() {
                if logs.is_empty() {
                    writeln!(f, "No activity.")?;
                }
                for log in logs {
                    fmt_log_line(f, log)?;
                }
            }
            writeln!(
                f,
                "Page {} of {} ({} entries)",
                self.pagination.page(),
                self.pagination.total_pages(),
                self.pagination.total()
            )?;
        }

        if let Some(log) = &self.selected {
            writeln!(f)?;
            fmt_log_detail(f, log)?;
        }
        Ok(())
    }
}

pub(super) fn fmt_log_line(f: &mut fmt::Formatter<'_>, log: &ActivityLog) -> fmt::Result {
    let who = log
        .user_name
        .clone()
        .or_else(|| log.user_id.map(|id| format!("user {}", id)))
        .unwrap_or_else(|| "system".to_string());
    let resource = match (&log.resource_type, log.resource_id) {
        (Some(kind), Some(id)) => format!(" {} #{}", kind, id),
        (Some(kind), None) => format!(" {}", kind),
        _ => String::new(),
    };
    let org = log
        .organization_name
        .as_ref()
        .map(|name| format!(" in {}", name))
        .unwrap_or_default();

    writeln!(
        f,
        "  [{}] {} {} {}{}{}",
        log.id,
        format_time(&log.created_at),
        who,
        log.action,
        resource,
        org
    )
}

fn fmt_log_detail(f: &mut fmt::Formatter<'_>, log: &ActivityLog) -> fmt::Result {
    writeln!(f, "Log #{}", log.id)?;
    writeln!(f, "  action:     {}", log.action)?;
    writeln!(f, "  at:         {}", log.created_at.to_rfc3339())?;
    if let Some(name) = &log.user_name {
        writeln!(f, "  user:       {}", name)?;
    }
    if let Some(kind) = &log.resource_type {
        writeln!(
            f,
            "  resource:   {} {}",
            kind,
            log.resource_id.map(|id| id.to_string()).unwrap_or_default()
        )?;
    }
    if let Some(name) = &log.organization_name {
        writeln!(f, "  org:        {}", name)?;
    }
    if let Some(ip) = &log.ip_address {
        writeln!(f, "  ip:         {}", ip)?;
    }
    if let Some(agent) = &log.user_agent {
        writeln!(f, "  user agent: {}", agent)?;
    }
    if let Some(details) = &log.details {
        for (key, value) in details {
            writeln!(f, "  {}: {}", key, value)?;
        }
    }
    Ok(())
}
