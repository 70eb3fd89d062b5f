//! Organizations, memberships and invitations.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role a member holds inside one organization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Owner,
    Admin,
    Member,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Owner => "owner",
            MemberRole::Admin => "admin",
            MemberRole::Member => "member",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "owner" => Some(MemberRole::Owner),
            "admin" => Some(MemberRole::Admin),
            "member" => Some(MemberRole::Member),
            _ => None,
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Membership row with the member's email and name denormalized in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub id: i64,
    pub user_id: i64,
    pub org_id: i64,
    pub role: MemberRole,
    /// Joined timestamp.
    pub created_at: DateTime<Utc>,
    pub user_email: String,
    pub user_name: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Expired,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invitation {
    pub id: i64,
    pub org_id: i64,
    pub email: String,
    pub role: MemberRole,
    /// Credential the invitee presents to accept.
    pub token: String,
    pub status: InvitationStatus,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateOrgRequest<'a> {
    pub name: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct InviteRequest<'a> {
    pub email: &'a str,
    pub role: MemberRole,
}

#[derive(Debug, Clone, Serialize)]
pub struct AcceptInviteRequest<'a> {
    pub token: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateMemberRoleRequest {
    pub role: MemberRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_round_trip() {
        for role in [MemberRole::Owner, MemberRole::Admin, MemberRole::Member] {
            assert_eq!(MemberRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(MemberRole::parse(" Admin "), Some(MemberRole::Admin));
        assert_eq!(MemberRole::parse("guest"), None);
    }

    #[test]
    fn test_invitation_decodes_backend_shape() {
        let invitation: Invitation = serde_json::from_value(serde_json::json!({
            "id": 3,
            "org_id": 7,
            "email": "a@b.com",
            "role": "member",
            "token": "4b1c",
            "status": "revoked",
            "expires_at": null,
            "created_at": "2025-01-02T03:04:05Z"
        }))
        .unwrap();

        assert_eq!(invitation.role, MemberRole::Member);
        assert_eq!(invitation.status, InvitationStatus::Unknown);
        assert!(invitation.expires_at.is_none());
    }

    #[test]
    fn test_invite_request_body() {
        let body = serde_json::to_value(InviteRequest {
            email: "a@b.com",
            role: MemberRole::Member,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"email": "a@b.com", "role": "member"}));
    }
}
