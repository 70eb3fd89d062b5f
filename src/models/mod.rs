//! Data models mirrored from backend responses.
//!
//! Field names follow the backend's snake_case JSON exactly so records decode
//! without renaming.

mod activity;
mod analytics;
mod notification;
mod organization;
mod user;

pub use activity::*;
pub use analytics::*;
pub use notification::*;
pub use organization::*;
pub use user::*;

use serde::{Deserialize, Serialize};

/// Plain `{"message": ...}` acknowledgement body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub message: String,
}
