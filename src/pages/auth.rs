//! Sign-in, registration and password reset forms.

use reqwest::StatusCode;

use crate::api::auth;
use crate::errors::ClientError;
use crate::AppState;

use super::forms::{require, validate_email, validate_new_password};
use super::{ActionOutcome, Route};

/// Shown after a reset request whether or not the address is registered.
pub const RESET_REQUEST_MESSAGE: &str =
    "If an account exists for that email, a password reset link has been sent.";

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Sign in, then load the user's organizations.
    pub async fn submit(&self, app: &AppState) -> ActionOutcome {
        if let Err(err) =
            require(&self.email, "Email").and_then(|_| require(&self.password, "Password"))
        {
            return ActionOutcome::from_error(&err);
        }

        match auth::login(&app.http, self.email.trim(), &self.password).await {
            Ok(_) => {
                tracing::info!("signed in as {}", self.email.trim());
                app.orgs.refresh_orgs().await;
                ActionOutcome::Redirect(Route::Dashboard)
            }
            // On this page a 401 means bad credentials, not an expired session.
            Err(ClientError::Http { status, detail }) if status == StatusCode::UNAUTHORIZED => {
                ActionOutcome::Failed(detail.unwrap_or_else(|| "Invalid credentials".to_string()))
            }
            Err(err) => ActionOutcome::from_error(&err),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), ClientError> {
        require(&self.name, "Name")?;
        validate_email(&self.email)?;
        validate_new_password(&self.password, &self.confirm_password)
    }

    pub async fn submit(&self, app: &AppState) -> ActionOutcome {
        if let Err(err) = self.validate() {
            return ActionOutcome::from_error(&err);
        }

        let email = self.email.trim();
        match auth::register(&app.http, email, self.name.trim(), &self.password).await {
            Ok(user) => {
                tracing::info!(user_id = user.id, "registered");
                ActionOutcome::Redirect(Route::Login)
            }
            Err(err) => ActionOutcome::from_error(&err),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl ForgotPasswordForm {
    /// Always reports the same success so the form cannot be used to discover
    /// which addresses are registered.
    pub async fn submit(&self, app: &AppState) -> ActionOutcome {
        if let Err(err) = validate_email(&self.email) {
            return ActionOutcome::from_error(&err);
        }

        if let Err(err) = auth::request_password_reset(&app.http, self.email.trim()).await {
            tracing::debug!("password reset request failed: {}", err);
        }

        ActionOutcome::Success(RESET_REQUEST_MESSAGE.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResetPasswordForm {
    pub token: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ResetPasswordForm {
    pub fn validate(&self) -> Result<(), ClientError> {
        require(&self.token, "Reset token")?;
        validate_new_password(&self.new_password, &self.confirm_password)
    }

    pub async fn submit(&self, app: &AppState) -> ActionOutcome {
        if let Err(err) = self.validate() {
            return ActionOutcome::from_error(&err);
        }

        match auth::reset_password(&app.http, self.token.trim(), &self.new_password).await {
            Ok(_) => ActionOutcome::Redirect(Route::Login),
            Err(err) => ActionOutcome::from_error(&err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_validation() {
        let mut form = RegisterForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "correct horse".into(),
            confirm_password: "correct horse".into(),
        };
        assert!(form.validate().is_ok());

        form.confirm_password = "correct h0rse".into();
        assert!(form.validate().is_err());

        form.name = "  ".into();
        assert!(matches!(
            form.validate(),
            Err(ClientError::Validation(msg)) if msg == "Name is required"
        ));
    }

    #[test]
    fn test_reset_requires_token() {
        let form = ResetPasswordForm {
            token: String::new(),
            new_password: "longenough".into(),
            confirm_password: "longenough".into(),
        };
        assert!(form.validate().is_err());
    }
}
