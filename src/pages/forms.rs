//! Local form validation. Nothing here touches the network.

use crate::errors::{ClientError, ClientResult};

pub const MIN_PASSWORD_LEN: usize = 8;

pub fn require(value: &str, field: &str) -> ClientResult<()> {
    if value.trim().is_empty() {
        return Err(ClientError::validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Cheap shape check; the backend does the real validation.
pub fn validate_email(email: &str) -> ClientResult<()> {
    require(email, "Email")?;
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(ClientError::validation("Enter a valid email address"));
    }
    Ok(())
}

/// New password plus its confirmation.
pub fn validate_new_password(password: &str, confirmation: &str) -> ClientResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ClientError::validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    if password != confirmation {
        return Err(ClientError::validation("Passwords do not match"));
    }
    Ok(())
}
