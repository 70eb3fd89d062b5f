//! Page view models.
//!
//! Each page owns its local state (what was fetched, the current form, the
//! pagination window) and exposes `load` plus one method per user action.
//! Actions make one mutating call and then re-fetch what they changed; no
//! page patches data locally. Failed calls are turned into page reactions
//! through [`errors::decide`](crate::errors::decide) only.

mod activity;
mod activity_feed;
mod auth;
mod dashboard;
mod forms;
mod invitations;
mod navbar;
mod notifications;
mod organizations;
mod pagination;
mod settings;

pub use activity::*;
pub use activity_feed::*;
pub use auth::*;
pub use dashboard::*;
pub use forms::*;
pub use invitations::*;
pub use navbar::*;
pub use notifications::*;
pub use organizations::*;
pub use pagination::*;
pub use settings::*;

use std::fmt;

use chrono::{DateTime, Utc};

use crate::errors::{decide, ClientError, ClientResult, ErrorAction};

/// Client-side routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    ForgotPassword,
    ResetPassword,
    Dashboard,
    Settings,
    Organizations,
    Invitations,
    Activity,
    Notifications,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::ForgotPassword => "/forgot-password",
            Route::ResetPassword => "/reset-password",
            Route::Dashboard => "/dashboard",
            Route::Settings => "/settings",
            Route::Organizations => "/organizations",
            Route::Invitations => "/invitations",
            Route::Activity => "/activity",
            Route::Notifications => "/notifications",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// What a page is currently showing.
#[derive(Debug, Clone, PartialEq)]
pub enum PageState<T> {
    Loading,
    Ready(T),
    Redirect(Route),
    Error(String),
}

impl<T> PageState<T> {
    pub fn from_result(result: ClientResult<T>) -> Self {
        match result {
            Ok(data) => PageState::Ready(data),
            Err(err) => {
                tracing::debug!(code = err.error_code(), "page load failed: {}", err);
                match decide(&err) {
                    ErrorAction::RedirectToLogin => PageState::Redirect(Route::Login),
                    ErrorAction::Inline(message) | ErrorAction::Generic(message) => {
                        PageState::Error(message)
                    }
                }
            }
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            PageState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn redirect(&self) -> Option<Route> {
        match self {
            PageState::Redirect(route) => Some(*route),
            _ => None,
        }
    }

    /// Render the non-ready states; `Ok(true)` means the caller should render data.
    fn fmt_pending(&self, f: &mut fmt::Formatter<'_>) -> Result<bool, fmt::Error> {
        match self {
            PageState::Loading => writeln!(f, "Loading...").map(|_| false),
            PageState::Redirect(route) => writeln!(f, "Redirecting to {}", route).map(|_| false),
            PageState::Error(message) => writeln!(f, "Error: {}", message).map(|_| false),
            PageState::Ready(_) => Ok(true),
        }
    }
}

/// Result of a user action such as submitting a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Success(String),
    Redirect(Route),
    Failed(String),
}

impl ActionOutcome {
    pub fn from_error(err: &ClientError) -> Self {
        tracing::debug!(code = err.error_code(), "action failed: {}", err);
        match decide(err) {
            ErrorAction::RedirectToLogin => ActionOutcome::Redirect(Route::Login),
            ErrorAction::Inline(message) | ErrorAction::Generic(message) => {
                ActionOutcome::Failed(message)
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ActionOutcome::Success(_))
    }
}

impl fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionOutcome::Success(message) => write!(f, "{}", message),
            ActionOutcome::Redirect(route) => write!(f, "Redirecting to {}", route),
            ActionOutcome::Failed(message) => write!(f, "Error: {}", message),
        }
    }
}

fn format_time(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_page_state_from_unauthorized_redirects() {
        let state: PageState<()> = PageState::from_result(Err(ClientError::Http {
            status: StatusCode::UNAUTHORIZED,
            detail: Some("Not authenticated".into()),
        }));
        assert_eq!(state.redirect(), Some(Route::Login));
    }

    #[test]
    fn test_page_state_from_server_error_is_generic() {
        let state: PageState<()> = PageState::from_result(Err(ClientError::Http {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: None,
        }));
        assert_eq!(
            state,
            PageState::Error(crate::errors::GENERIC_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_action_outcome_from_forbidden_is_inline() {
        let outcome = ActionOutcome::from_error(&ClientError::Http {
            status: StatusCode::FORBIDDEN,
            detail: Some("You are not a member of this organization".into()),
        });
        assert_eq!(
            outcome,
            ActionOutcome::Failed("You are not a member of this organization".to_string())
        );
    }
}
