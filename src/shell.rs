//! Interactive terminal session.
//!
//! One command per line, parsed with clap. The session owns one instance of
//! every page for its whole lifetime, like a single browser tab.

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::models::{MemberRole, Period, ProfileUpdate};
use crate::pages::{
    ActionOutcome, ActivityFeed, ActivityLogPage, ActivityScope, ChangePasswordForm, ClickTarget,
    DashboardPage, FilterChange, ForgotPasswordForm, InvitationsPage, LoginForm, Navbar,
    NotificationsPage, OrganizationsPage, RegisterForm, ResetPasswordForm, Route,
    SettingsPage,
};
use crate::AppState;

#[derive(Debug, Parser)]
#[command(name = "orgdash", no_binary_name = true, disable_version_flag = true)]
pub struct Line {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Sign in
    Login { email: String, password: String },
    /// Create an account
    Register {
        name: String,
        email: String,
        password: String,
        confirm: String,
    },
    /// Sign out
    Logout,
    /// Request a password reset email
    ForgotPassword { email: String },
    /// Set a new password with a reset token
    ResetPassword {
        token: String,
        password: String,
        confirm: String,
    },
    /// Show account settings
    Settings,
    /// Update name and/or email
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Change password
    Password {
        current: String,
        new: String,
        confirm: String,
    },
    /// Upload an avatar image
    Avatar { path: PathBuf },
    /// Show the analytics dashboard
    Dashboard,
    /// Reload the dashboard timeline
    Timeline {
        #[arg(long, default_value_t = 30)]
        days: u32,
        #[arg(long, default_value = "day", value_parser = parse_period)]
        period: Period,
    },
    /// Refresh dashboard statistics section by section
    Stats,
    /// List organizations and members of the current one
    Orgs,
    /// Select the current organization (no id clears it)
    Use { org_id: Option<i64> },
    /// Create an organization
    CreateOrg { name: String },
    /// Invite someone to the current organization
    Invite {
        email: String,
        #[arg(value_parser = parse_role)]
        role: MemberRole,
    },
    /// Change a member's role
    Role {
        user_id: i64,
        #[arg(value_parser = parse_role)]
        role: MemberRole,
    },
    /// Remove a member
    Remove { user_id: i64 },
    /// List invitations addressed to you
    Invitations,
    /// Accept an invitation
    Accept { token: String },
    /// Show activity logs; filter flags reset the page to 1
    Activity {
        #[arg(long, value_parser = parse_scope)]
        scope: Option<ActivityScope>,
        #[arg(long)]
        action: Option<String>,
        #[arg(long)]
        resource_type: Option<String>,
        #[arg(long)]
        org: Option<i64>,
        #[arg(long)]
        user: Option<i64>,
        #[arg(long)]
        page_size: Option<u32>,
        /// Drop every filter
        #[arg(long)]
        clear: bool,
    },
    /// Show one activity log entry
    Log { id: i64 },
    /// Recent activity widget
    Feed,
    /// Show notifications
    Notifications {
        #[arg(long)]
        unread: bool,
    },
    /// Mark notifications as read
    Read { ids: Vec<i64> },
    /// Mark every notification as read
    ReadAll,
    /// Delete a notification
    DeleteNotification { id: i64 },
    /// Next page of the last list
    Next,
    /// Previous page of the last list
    Prev,
    /// Jump to a page of the last list
    Page { page: u32 },
    /// Toggle the account menu (`--close` simulates a click elsewhere)
    Menu {
        #[arg(long)]
        close: bool,
    },
    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

fn parse_role(s: &str) -> Result<MemberRole, String> {
    MemberRole::parse(s).ok_or_else(|| "role must be owner, admin or member".to_string())
}

fn parse_period(s: &str) -> Result<Period, String> {
    Period::parse(s).ok_or_else(|| "period must be day, week or month".to_string())
}

fn parse_scope(s: &str) -> Result<ActivityScope, String> {
    ActivityScope::parse(s).ok_or_else(|| "scope must be all, mine or org".to_string())
}

/// Split a line into words, honoring double quotes.
pub fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quoted {
        return Err("unterminated quote".to_string());
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Command>, String> {
    let words = split_words(line)?;
    if words.is_empty() {
        return Ok(None);
    }
    Line::try_parse_from(words)
        .map(|parsed| Some(parsed.command))
        .map_err(|err| err.to_string())
}

/// Which paginated list `next`/`prev`/`page` act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListView {
    Activity,
    Notifications,
}

pub enum Flow {
    Continue(String),
    Quit,
}

pub struct Session {
    app: AppState,
    navbar: Navbar,
    settings: SettingsPage,
    dashboard: DashboardPage,
    organizations: OrganizationsPage,
    invitations: InvitationsPage,
    activity: ActivityLogPage,
    notifications: NotificationsPage,
    feed: ActivityFeed,
    list_view: ListView,
}

impl Session {
    pub fn new(app: AppState) -> Self {
        Self {
            navbar: Navbar::new(app.clone()),
            settings: SettingsPage::new(app.clone()),
            dashboard: DashboardPage::new(app.clone()),
            organizations: OrganizationsPage::new(app.clone()),
            invitations: InvitationsPage::new(app.clone()),
            activity: ActivityLogPage::new(app.clone()),
            notifications: NotificationsPage::new(app.clone()),
            feed: ActivityFeed::new(app.clone()),
            list_view: ListView::Activity,
            app,
        }
    }

    /// Load the organization context and the navbar.
    pub async fn start(&mut self) -> String {
        self.app.orgs.init().await;
        self.navbar.load().await;
        self.header()
    }

    fn header(&self) -> String {
        let mut out = self.navbar.to_string();
        if self.navbar.user().redirect() == Some(Route::Login) {
            out.push_str("Not signed in. Use `login <email> <password>` or `register`.\n");
        }
        out
    }

    pub async fn execute(&mut self, command: Command) -> Flow {
        let out = match command {
            Command::Quit => return Flow::Quit,

            Command::Login { email, password } => {
                let outcome = LoginForm { email, password }.submit(&self.app).await;
                if outcome == ActionOutcome::Redirect(Route::Dashboard) {
                    self.navbar.load().await;
                    self.dashboard.load().await;
                    format!("{}{}", self.header(), self.dashboard)
                } else {
                    line(&outcome)
                }
            }
            Command::Register {
                name,
                email,
                password,
                confirm,
            } => {
                let form = RegisterForm {
                    name,
                    email,
                    password,
                    confirm_password: confirm,
                };
                line(&form.submit(&self.app).await)
            }
            Command::Logout => {
                let outcome = self.navbar.logout().await;
                self.app.orgs.refresh_orgs().await;
                line(&outcome)
            }
            Command::ForgotPassword { email } => {
                line(&ForgotPasswordForm { email }.submit(&self.app).await)
            }
            Command::ResetPassword {
                token,
                password,
                confirm,
            } => {
                let form = ResetPasswordForm {
                    token,
                    new_password: password,
                    confirm_password: confirm,
                };
                line(&form.submit(&self.app).await)
            }

            Command::Settings => {
                self.settings.load().await;
                self.settings.to_string()
            }
            Command::Profile { name, email } => {
                let outcome = self
                    .settings
                    .update_profile(ProfileUpdate { name, email })
                    .await;
                format!("{}{}", line(&outcome), self.settings)
            }
            Command::Password {
                current,
                new,
                confirm,
            } => {
                let form = ChangePasswordForm {
                    current_password: current,
                    new_password: new,
                    confirm_password: confirm,
                };
                line(&self.settings.change_password(&form).await)
            }
            Command::Avatar { path } => {
                let outcome = self.settings.upload_avatar(&path).await;
                format!("{}{}", line(&outcome), self.settings)
            }

            Command::Dashboard => {
                self.dashboard.load().await;
                self.dashboard.to_string()
            }
            Command::Timeline { days, period } => {
                let outcome = self.dashboard.load_timeline(days, period).await;
                format!("{}{}", line(&outcome), self.dashboard)
            }
            Command::Stats => {
                let outcome = self.dashboard.refresh_sections().await;
                format!("{}{}", line(&outcome), self.dashboard)
            }

            Command::Orgs => {
                self.organizations.load().await;
                self.organizations.to_string()
            }
            Command::Use { org_id } => {
                let outcome = match org_id {
                    Some(id) => self.navbar.switch_org(id),
                    None => match self.app.orgs.set_current_org(None) {
                        Ok(()) => ActionOutcome::Success("Organization cleared".to_string()),
                        Err(err) => ActionOutcome::from_error(&err),
                    },
                };
                self.organizations.load().await;
                format!("{}{}", line(&outcome), self.organizations)
            }
            Command::CreateOrg { name } => {
                let outcome = self.organizations.create_org(&name).await;
                format!("{}{}", line(&outcome), self.organizations)
            }
            Command::Invite { email, role } => {
                let outcome = self.organizations.invite(&email, role).await;
                format!("{}{}", line(&outcome), self.organizations)
            }
            Command::Role { user_id, role } => {
                let outcome = self.organizations.change_role(user_id, role).await;
                format!("{}{}", line(&outcome), self.organizations)
            }
            Command::Remove { user_id } => {
                let outcome = self.organizations.remove_member(user_id).await;
                format!("{}{}", line(&outcome), self.organizations)
            }

            Command::Invitations => {
                self.invitations.load().await;
                self.invitations.to_string()
            }
            Command::Accept { token } => {
                let outcome = self.invitations.accept(&token).await;
                format!("{}{}", line(&outcome), self.invitations)
            }

            Command::Activity {
                scope,
                action,
                resource_type,
                org,
                user,
                page_size,
                clear,
            } => {
                if clear {
                    self.activity.clear_filters();
                }
                if let Some(scope) = scope {
                    self.activity.set_scope(scope);
                }
                if let Some(size) = page_size {
                    self.activity.set_page_size(size);
                }

                let changes = [
                    action.map(|v| FilterChange::Action(Some(v))),
                    resource_type.map(|v| FilterChange::ResourceType(Some(v))),
                    org.map(|v| FilterChange::OrganizationId(Some(v))),
                    user.map(|v| FilterChange::UserId(Some(v))),
                ];
                let mut out = String::new();
                for change in changes.into_iter().flatten() {
                    if let Err(err) = self.activity.set_filter(change) {
                        out.push_str(&line(&ActionOutcome::from_error(&err)));
                    }
                }

                self.list_view = ListView::Activity;
                self.activity.load().await;
                let _ = write!(out, "{}", self.activity);
                out
            }
            Command::Log { id } => {
                let outcome = self.activity.show(id).await;
                format!("{}{}", line(&outcome), self.activity)
            }
            Command::Feed => {
                self.feed.load().await;
                self.feed.to_string()
            }

            Command::Notifications { unread } => {
                self.notifications.set_unread_only(unread);
                self.list_view = ListView::Notifications;
                self.notifications.load().await;
                self.notifications.to_string()
            }
            Command::Read { ids } => {
                let outcome = match ids.as_slice() {
                    [id] => self.notifications.mark_read(*id).await,
                    ids => self.notifications.mark_many_read(ids).await,
                };
                self.navbar.load().await;
                format!("{}{}", line(&outcome), self.notifications)
            }
            Command::ReadAll => {
                let outcome = self.notifications.mark_all_read().await;
                self.navbar.load().await;
                format!("{}{}", line(&outcome), self.notifications)
            }
            Command::DeleteNotification { id } => {
                let outcome = self.notifications.delete(id).await;
                format!("{}{}", line(&outcome), self.notifications)
            }

            Command::Next | Command::Prev | Command::Page { .. } => self.paginate(command).await,

            Command::Menu { close } => {
                let target = if close {
                    ClickTarget::Outside
                } else {
                    ClickTarget::Toggle
                };
                self.navbar.handle_click(target);
                self.navbar.to_string()
            }
        };

        Flow::Continue(out)
    }

    async fn paginate(&mut self, command: Command) -> String {
        match self.list_view {
            ListView::Activity => {
                let moved = match command {
                    Command::Next => self.activity.next_page().await,
                    Command::Prev => self.activity.prev_page().await,
                    Command::Page { page } => self.activity.go_to_page(page).await,
                    _ => false,
                };
                with_edge_note(moved, self.activity.to_string())
            }
            ListView::Notifications => {
                let current = self.notifications.pagination().page();
                let target = match command {
                    Command::Next => current.saturating_add(1),
                    Command::Prev => current.saturating_sub(1),
                    Command::Page { page } => page,
                    _ => current,
                };
                let moved = self.notifications.go_to_page(target).await;
                with_edge_note(moved, self.notifications.to_string())
            }
        }
    }
}

fn line(outcome: &ActionOutcome) -> String {
    let mut out = outcome.to_string();
    if !out.ends_with('\n') {
        out.push('\n');
    }
    if *outcome == ActionOutcome::Redirect(Route::Login) {
        out.push_str("Use `login <email> <password>` to sign in.\n");
    }
    out
}

fn with_edge_note(moved: bool, rendered: String) -> String {
    if moved {
        return rendered;
    }
    let mut out = String::from("Already at the edge of the list.\n");
    let _ = write!(out, "{}", rendered);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words_honors_quotes() {
        assert_eq!(
            split_words(r#"create-org "Acme Corp"  "#).unwrap(),
            vec!["create-org", "Acme Corp"]
        );
        assert_eq!(split_words(r#"profile --name """#).unwrap(), vec!["profile", "--name", ""]);
        assert!(split_words(r#"accept "abc"#).is_err());
        assert!(split_words("   ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_invite() {
        assert_eq!(
            parse_line("invite a@b.com member").unwrap(),
            Some(Command::Invite {
                email: "a@b.com".into(),
                role: MemberRole::Member,
            })
        );
        assert!(parse_line("invite a@b.com guest").is_err());
    }

    #[test]
    fn test_parse_activity_flags() {
        let parsed = parse_line("activity --scope org --action org.create --user 3").unwrap();
        assert_eq!(
            parsed,
            Some(Command::Activity {
                scope: Some(ActivityScope::CurrentOrg),
                action: Some("org.create".into()),
                resource_type: None,
                org: None,
                user: Some(3),
                page_size: None,
                clear: false,
            })
        );
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("exit").unwrap(), Some(Command::Quit));
        assert_eq!(parse_line("use").unwrap(), Some(Command::Use { org_id: None }));
        assert_eq!(
            parse_line("timeline --days 7 --period week").unwrap(),
            Some(Command::Timeline {
                days: 7,
                period: Period::Week
            })
        );
        assert!(parse_line("frobnicate").is_err());
    }
}
