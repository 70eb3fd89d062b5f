//! Organization, membership and invitation endpoints.

use crate::errors::ClientResult;
use crate::http::HttpClient;
use crate::models::{
    AcceptInviteRequest, CreateOrgRequest, Invitation, InviteRequest, Member, MemberRole,
    Organization, UpdateMemberRoleRequest,
};

/// POST /orgs - the caller becomes owner.
pub async fn create(http: &HttpClient, name: &str) -> ClientResult<Organization> {
    http.post("/orgs", &CreateOrgRequest { name }).await
}

/// GET /orgs/mine
pub async fn mine(http: &HttpClient) -> ClientResult<Vec<Organization>> {
    http.get("/orgs/mine").await
}

/// POST /orgs/{id}/invite
pub async fn invite(
    http: &HttpClient,
    org_id: i64,
    email: &str,
    role: MemberRole,
) -> ClientResult<Invitation> {
    http.post(
        &format!("/orgs/{}/invite", org_id),
        &InviteRequest { email, role },
    )
    .await
}

/// GET /orgs/invitations/pending
pub async fn pending_invitations(http: &HttpClient) -> ClientResult<Vec<Invitation>> {
    http.get("/orgs/invitations/pending").await
}

/// POST /orgs/accept
pub async fn accept_invitation(http: &HttpClient, token: &str) -> ClientResult<Member> {
    http.post("/orgs/accept", &AcceptInviteRequest { token })
        .await
}

/// GET /orgs/{id}/members
pub async fn members(http: &HttpClient, org_id: i64) -> ClientResult<Vec<Member>> {
    http.get(&format!("/orgs/{}/members", org_id)).await
}

/// PATCH /orgs/{id}/members/{userId}
pub async fn update_member_role(
    http: &HttpClient,
    org_id: i64,
    user_id: i64,
    role: MemberRole,
) -> ClientResult<Member> {
    http.patch(
        &format!("/orgs/{}/members/{}", org_id, user_id),
        &UpdateMemberRoleRequest { role },
    )
    .await
}

/// DELETE /orgs/{id}/members/{userId}
pub async fn remove_member(http: &HttpClient, org_id: i64, user_id: i64) -> ClientResult<()> {
    http.delete(&format!("/orgs/{}/members/{}", org_id, user_id))
        .await
}
