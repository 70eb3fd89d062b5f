//! Top navigation: signed-in user, organization switcher, account menu.

use std::fmt;

use crate::api::{auth, notifications};
use crate::models::User;
use crate::AppState;

use super::{ActionOutcome, PageState, Route};

/// Where a click landed relative to the account dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The button that opens and closes the menu
    Toggle,
    /// Somewhere inside the open menu
    Menu,
    /// Anywhere else on the page
    Outside,
}

pub struct Navbar {
    app: AppState,
    user: PageState<User>,
    unread: u64,
    dropdown_open: bool,
}

impl Navbar {
    pub fn new(app: AppState) -> Self {
        Self {
            app,
            user: PageState::Loading,
            unread: 0,
            dropdown_open: false,
        }
    }

    pub fn user(&self) -> &PageState<User> {
        &self.user
    }

    pub fn is_dropdown_open(&self) -> bool {
        self.dropdown_open
    }

    pub fn unread(&self) -> u64 {
        self.unread
    }

    pub async fn load(&mut self) -> &PageState<User> {
        let (user, unread) = tokio::join!(
            auth::me(&self.app.http),
            notifications::unread_count(&self.app.http)
        );
        self.unread = unread.map(|c| c.unread_count).unwrap_or(0);
        self.user = PageState::from_result(user);
        &self.user
    }

    pub fn handle_click(&mut self, target: ClickTarget) {
        match target {
            ClickTarget::Toggle => self.dropdown_open = !self.dropdown_open,
            ClickTarget::Menu => {}
            ClickTarget::Outside => self.dropdown_open = false,
        }
    }

    /// Switch the current organization from the dropdown.
    pub fn switch_org(&mut self, org_id: i64) -> ActionOutcome {
        self.dropdown_open = false;
        match self.app.orgs.set_current_org(Some(org_id)) {
            Ok(()) => match self.app.orgs.current_org() {
                Some(org) => ActionOutcome::Success(format!("Switched to {}", org.name)),
                None => ActionOutcome::Success("Organization cleared".to_string()),
            },
            Err(err) => ActionOutcome::from_error(&err),
        }
    }

    pub async fn logout(&mut self) -> ActionOutcome {
        self.dropdown_open = false;
        if let Err(err) = auth::logout(&self.app.http).await {
            tracing::warn!("Logout request failed: {}", err);
        }
        self.user = PageState::Redirect(Route::Login);
        ActionOutcome::Redirect(Route::Login)
    }
}

impl fmt::Display for Navbar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let who = match &self.user {
            PageState::Ready(user) => format!("{} <{}>", user.name, user.email),
            PageState::Loading => "...".to_string(),
            _ => "signed out".to_string(),
        };
        let orgs = self.app.orgs.snapshot();
        let org = match orgs.current() {
            _ if orgs.is_loading() => "loading organizations".to_string(),
            Some(org) => org.name.clone(),
            None => "no organization".to_string(),
        };

        writeln!(f, "[{}] [{}] [{} unread]", who, org, self.unread)?;
        if self.dropdown_open {
            for org in self.app.orgs.organizations() {
                writeln!(f, "  switch to [{}] {}", org.id, org.name)?;
            }
            writeln!(f, "  settings  ({})", Route::Settings)?;
            writeln!(f, "  sign out")?;
        }
        Ok(())
    }
}
