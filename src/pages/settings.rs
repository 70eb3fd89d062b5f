//! Account settings: profile, password and avatar.

use std::fmt;
use std::path::Path;

use crate::api::auth;
use crate::models::{ProfileUpdate, User};
use crate::AppState;

use super::forms::{require, validate_email, validate_new_password};
use super::{ActionOutcome, PageState};

#[derive(Debug, Clone, Default)]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ChangePasswordForm {
    pub fn validate(&self) -> Result<(), crate::errors::ClientError> {
        require(&self.current_password, "Current password")?;
        validate_new_password(&self.new_password, &self.confirm_password)
    }
}

pub struct SettingsPage {
    app: AppState,
    state: PageState<User>,
}

impl SettingsPage {
    pub fn new(app: AppState) -> Self {
        Self {
            app,
            state: PageState::Loading,
        }
    }

    pub fn state(&self) -> &PageState<User> {
        &self.state
    }

    pub async fn load(&mut self) -> &PageState<User> {
        self.state = PageState::Loading;
        self.state = PageState::from_result(auth::me(&self.app.http).await);
        &self.state
    }

    pub async fn update_profile(&mut self, update: ProfileUpdate) -> ActionOutcome {
        if update.is_empty() {
            return ActionOutcome::Failed("Nothing to update".to_string());
        }
        if let Some(name) = &update.name {
            if let Err(err) = require(name, "Name") {
                return ActionOutcome::from_error(&err);
            }
        }
        if let Some(email) = &update.email {
            if let Err(err) = validate_email(email) {
                return ActionOutcome::from_error(&err);
            }
        }

        match auth::update_profile(&self.app.http, &update).await {
            Ok(_) => {
                self.load().await;
                ActionOutcome::Success("Profile updated".to_string())
            }
            Err(err) => ActionOutcome::from_error(&err),
        }
    }

    /// Invalid input is rejected here and never reaches the network.
    pub async fn change_password(&mut self, form: &ChangePasswordForm) -> ActionOutcome {
        if let Err(err) = form.validate() {
            return ActionOutcome::from_error(&err);
        }

        match auth::change_password(&self.app.http, &form.current_password, &form.new_password)
            .await
        {
            Ok(_) => ActionOutcome::Success("Password changed".to_string()),
            Err(err) => ActionOutcome::from_error(&err),
        }
    }

    pub async fn upload_avatar(&mut self, path: &Path) -> ActionOutcome {
        match auth::upload_avatar_file(&self.app.http, path).await {
            Ok(_) => {
                self.load().await;
                ActionOutcome::Success("Avatar updated".to_string())
            }
            Err(err) => ActionOutcome::from_error(&err),
        }
    }
}

impl fmt::Display for SettingsPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== Settings ==")?;
        if !self.state.fmt_pending(f)? {
            return Ok(());
        }
        if let Some(user) = self.state.ready() {
            writeln!(f, "Name:   {}", user.name)?;
            writeln!(f, "Email:  {}", user.email)?;
            writeln!(f, "Role:   {}", user.role)?;
            writeln!(
                f,
                "Avatar: {}",
                user.avatar_url.as_deref().unwrap_or("(none)")
            )?;
        }
        Ok(())
    }
}
