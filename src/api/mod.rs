//! Backend API modules.
//!
//! One function per endpoint, grouped by backend router. Each function makes
//! exactly one call through [`HttpClient`](crate::http::HttpClient) and returns
//! the decoded body; nothing is cached and no local state is touched.

pub mod activity;
pub mod analytics;
pub mod auth;
pub mod notifications;
pub mod organizations;
