//! Recent-activity widget.

use std::fmt;

use crate::api::activity;
use crate::models::ActivityLog;
use crate::AppState;

use super::activity::fmt_log_line;
use super::PageState;

pub const FEED_SIZE: u32 = 10;

pub struct ActivityFeed {
    app: AppState,
    limit: u32,
    state: PageState<Vec<ActivityLog>>,
}

impl ActivityFeed {
    pub fn new(app: AppState) -> Self {
        Self::with_limit(app, FEED_SIZE)
    }

    pub fn with_limit(app: AppState, limit: u32) -> Self {
        Self {
            app,
            limit: limit.clamp(1, 100),
            state: PageState::Loading,
        }
    }

    pub fn state(&self) -> &PageState<Vec<ActivityLog>> {
        &self.state
    }

    /// Latest entries of the current organization, or the user's own.
    pub async fn load(&mut self) -> &PageState<Vec<ActivityLog>> {
        let result = match self.app.orgs.current_org() {
            Some(org) => {
                activity::org_logs(&self.app.http, org.id, 1, self.limit, None, None).await
            }
            None => activity::my_logs(&self.app.http, 1, self.limit, None).await,
        };
        self.state = PageState::from_result(result.map(|list| list.logs));
        &self.state
    }
}

impl fmt::Display for ActivityFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Recent activity:")?;
        if !self.state.fmt_pending(f)? {
            return Ok(());
        }
        match self.state.ready() {
            Some(logs) if !logs.is_empty() => {
                for log in logs {
                    fmt_log_line(f, log)?;
                }
                Ok(())
            }
            _ => writeln!(f, "  Nothing yet."),
        }
    }
}
