//! Auth endpoints.

use std::path::Path;

use reqwest::multipart::{Form, Part};

use crate::errors::{ClientError, ClientResult};
use crate::http::HttpClient;
use crate::models::{
    ChangePassword, LoginRequest, Message, PasswordReset, PasswordResetRequest, ProfileUpdate,
    RegisterRequest, User,
};

/// POST /auth/register
pub async fn register(
    http: &HttpClient,
    email: &str,
    name: &str,
    password: &str,
) -> ClientResult<User> {
    http.post(
        "/auth/register",
        &RegisterRequest {
            email,
            name,
            password,
        },
    )
    .await
}

/// POST /auth/login - the backend answers with the session cookie.
pub async fn login(http: &HttpClient, email: &str, password: &str) -> ClientResult<Message> {
    http.post("/auth/login", &LoginRequest { email, password })
        .await
}

/// POST /auth/logout
pub async fn logout(http: &HttpClient) -> ClientResult<Message> {
    http.post_empty("/auth/logout").await
}

/// GET /auth/me
pub async fn me(http: &HttpClient) -> ClientResult<User> {
    http.get("/auth/me").await
}

/// POST /auth/refresh
pub async fn refresh(http: &HttpClient) -> ClientResult<Message> {
    http.post_empty("/auth/refresh").await
}

/// POST /auth/password-reset-request
pub async fn request_password_reset(http: &HttpClient, email: &str) -> ClientResult<Message> {
    http.post(
        "/auth/password-reset-request",
        &PasswordResetRequest { email },
    )
    .await
}

/// POST /auth/password-reset
pub async fn reset_password(
    http: &HttpClient,
    token: &str,
    new_password: &str,
) -> ClientResult<Message> {
    http.post(
        "/auth/password-reset",
        &PasswordReset {
            token,
            new_password,
        },
    )
    .await
}

/// PATCH /auth/profile
pub async fn update_profile(http: &HttpClient, update: &ProfileUpdate) -> ClientResult<User> {
    http.patch("/auth/profile", update).await
}

/// POST /auth/avatar - multipart upload with the image in the `file` field.
pub async fn upload_avatar(
    http: &HttpClient,
    file_name: &str,
    content_type: &str,
    bytes: Vec<u8>,
) -> ClientResult<User> {
    let part = Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(content_type)?;
    let form = Form::new().part("file", part);

    http.post_multipart("/auth/avatar", form).await
}

/// Read an image from disk and upload it as the avatar.
pub async fn upload_avatar_file(http: &HttpClient, path: &Path) -> ClientResult<User> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ClientError::validation(format!("Cannot read {}: {}", path.display(), e)))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("avatar");

    upload_avatar(http, file_name, image_content_type(path), bytes).await
}

/// POST /auth/change-password
pub async fn change_password(
    http: &HttpClient,
    current_password: &str,
    new_password: &str,
) -> ClientResult<Message> {
    http.post(
        "/auth/change-password",
        &ChangePassword {
            current_password,
            new_password,
        },
    )
    .await
}

fn image_content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_content_type() {
        assert_eq!(image_content_type(Path::new("me.PNG")), "image/png");
        assert_eq!(image_content_type(Path::new("/tmp/me.jpeg")), "image/jpeg");
        assert_eq!(
            image_content_type(Path::new("avatar")),
            "application/octet-stream"
        );
    }
}
