//! Notification inbox.

use std::fmt;

use crate::api::notifications;
use crate::models::{NotificationList, NotificationQuery};
use crate::AppState;

use super::{format_time, ActionOutcome, PageState, Pagination};

pub struct NotificationsPage {
    app: AppState,
    unread_only: bool,
    pagination: Pagination,
    state: PageState<NotificationList>,
}

impl NotificationsPage {
    pub fn new(app: AppState) -> Self {
        Self {
            app,
            unread_only: false,
            pagination: Pagination::default(),
            state: PageState::Loading,
        }
    }

    pub fn state(&self) -> &PageState<NotificationList> {
        &self.state
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn set_unread_only(&mut self, unread_only: bool) {
        self.unread_only = unread_only;
        self.pagination.reset();
    }

    pub fn query(&self) -> NotificationQuery {
        NotificationQuery {
            page: self.pagination.page(),
            page_size: self.pagination.page_size(),
            is_read: self.unread_only.then_some(false),
            kind: None,
        }
    }

    pub async fn load(&mut self) -> &PageState<NotificationList> {
        self.state = PageState::Loading;
        let mut result = notifications::list(&self.app.http, &self.query()).await;
        if let Ok(list) = &result {
            if self.pagination.set_total(list.total) {
                result = notifications::list(&self.app.http, &self.query()).await;
                if let Ok(list) = &result {
                    self.pagination.set_total(list.total);
                }
            }
        }
        self.state = PageState::from_result(result);
        &self.state
    }

    pub async fn go_to_page(&mut self, page: u32) -> bool {
        if !self.pagination.go_to(page) {
            return false;
        }
        self.load().await;
        true
    }

    pub async fn mark_read(&mut self, notification_id: i64) -> ActionOutcome {
        match notifications::mark_read(&self.app.http, notification_id).await {
            Ok(_) => {
                self.load().await;
                ActionOutcome::Success("Marked as read".to_string())
            }
            Err(err) => ActionOutcome::from_error(&err),
        }
    }

    pub async fn mark_many_read(&mut self, ids: &[i64]) -> ActionOutcome {
        if ids.is_empty() {
            return ActionOutcome::Failed("No notifications selected".to_string());
        }
        match notifications::mark_many_read(&self.app.http, ids).await {
            Ok(result) => {
                self.load().await;
                ActionOutcome::Success(format!("{} marked as read", result.marked_read))
            }
            Err(err) => ActionOutcome::from_error(&err),
        }
    }

    pub async fn mark_all_read(&mut self) -> ActionOutcome {
        match notifications::mark_all_read(&self.app.http).await {
            Ok(result) => {
                self.load().await;
                ActionOutcome::Success(format!("{} marked as read", result.marked_read))
            }
            Err(err) => ActionOutcome::from_error(&err),
        }
    }

    pub async fn delete(&mut self, notification_id: i64) -> ActionOutcome {
        match notifications::delete(&self.app.http, notification_id).await {
            Ok(_) => {
                self.load().await;
                ActionOutcome::Success("Notification deleted".to_string())
            }
            Err(err) => ActionOutcome::from_error(&err),
        }
    }
}

impl fmt::Display for NotificationsPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== Notifications ==")?;
        if !self.state.fmt_pending(f)? {
            return Ok(());
        }
        let Some(list) = self.state.ready() else {
            return Ok(());
        };

        writeln!(f, "{} unread", list.unread_count)?;
        if list.notifications.is_empty() {
            writeln!(f, "Nothing here.")?;
        }
        for n in &list.notifications {
            writeln!(
                f,
                "  {} [{}] {} {}  {}",
                if n.is_read { " " } else { "*" },
                n.id,
                format_time(&n.created_at),
                n.kind,
                n.title
            )?;
            if let Some(message) = &n.message {
                writeln!(f, "        {}", message)?;
            }
        }
        writeln!(
            f,
            "Page {} of {}",
            self.pagination.page(),
            self.pagination.total_pages()
        )
    }
}
