//! Organization management: create, members, invitations out, roles.

use std::fmt;

use crate::api::organizations;
use crate::errors::ClientError;
use crate::models::{Invitation, Member, MemberRole, Organization};
use crate::AppState;

use super::forms::{require, validate_email};
use super::{format_time, ActionOutcome, PageState};

pub struct OrganizationsPage {
    app: AppState,
    members: PageState<Vec<Member>>,
    last_invitation: Option<Invitation>,
}

impl OrganizationsPage {
    pub fn new(app: AppState) -> Self {
        Self {
            app,
            members: PageState::Loading,
            last_invitation: None,
        }
    }

    pub fn members(&self) -> &PageState<Vec<Member>> {
        &self.members
    }

    /// Invitation created by the last successful `invite`.
    pub fn last_invitation(&self) -> Option<&Invitation> {
        self.last_invitation.as_ref()
    }

    pub fn current_org(&self) -> Option<Organization> {
        self.app.orgs.current_org()
    }

    /// Fetch the member roster of the current organization.
    pub async fn load(&mut self) -> &PageState<Vec<Member>> {
        let Some(org) = self.current_org() else {
            self.members = PageState::Ready(Vec::new());
            return &self.members;
        };

        self.members = PageState::Loading;
        self.members =
            PageState::from_result(organizations::members(&self.app.http, org.id).await);
        &self.members
    }

    pub async fn create_org(&mut self, name: &str) -> ActionOutcome {
        if let Err(err) = require(name, "Organization name") {
            return ActionOutcome::from_error(&err);
        }

        let org = match organizations::create(&self.app.http, name.trim()).await {
            Ok(org) => org,
            Err(err) => return ActionOutcome::from_error(&err),
        };
        tracing::info!(org_id = org.id, "organization created");

        self.app.orgs.refresh_orgs().await;
        if let Err(err) = self.app.orgs.set_current_org(Some(org.id)) {
            tracing::warn!("New organization not selectable: {}", err);
        }
        self.load().await;

        ActionOutcome::Success(format!("Organization \"{}\" created", org.name))
    }

    /// Invite `email` at `role` into the current organization and show the token.
    pub async fn invite(&mut self, email: &str, role: MemberRole) -> ActionOutcome {
        let org = match self.require_org() {
            Ok(org) => org,
            Err(err) => return ActionOutcome::from_error(&err),
        };
        if let Err(err) = validate_email(email) {
            return ActionOutcome::from_error(&err);
        }

        match organizations::invite(&self.app.http, org.id, email.trim(), role).await {
            Ok(invitation) => {
                let message = format!(
                    "Invitation sent to {} as {}. Token: {}",
                    invitation.email, invitation.role, invitation.token
                );
                self.last_invitation = Some(invitation);
                self.load().await;
                ActionOutcome::Success(message)
            }
            Err(err) => ActionOutcome::from_error(&err),
        }
    }

    pub async fn change_role(&mut self, user_id: i64, role: MemberRole) -> ActionOutcome {
        let org = match self.require_org() {
            Ok(org) => org,
            Err(err) => return ActionOutcome::from_error(&err),
        };

        match organizations::update_member_role(&self.app.http, org.id, user_id, role).await {
            Ok(member) => {
                self.app.orgs.refresh_orgs().await;
                self.load().await;
                ActionOutcome::Success(format!("{} is now {}", member.user_name, member.role))
            }
            Err(err) => ActionOutcome::from_error(&err),
        }
    }

    pub async fn remove_member(&mut self, user_id: i64) -> ActionOutcome {
        let org = match self.require_org() {
            Ok(org) => org,
            Err(err) => return ActionOutcome::from_error(&err),
        };

        match organizations::remove_member(&self.app.http, org.id, user_id).await {
            Ok(()) => {
                self.app.orgs.refresh_orgs().await;
                self.load().await;
                ActionOutcome::Success("Member removed".to_string())
            }
            Err(err) => ActionOutcome::from_error(&err),
        }
    }

    fn require_org(&self) -> Result<Organization, ClientError> {
        self.current_org()
            .ok_or_else(|| ClientError::validation("Select an organization first"))
    }
}

impl fmt::Display for OrganizationsPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== Organizations ==")?;

        let orgs = self.app.orgs.organizations();
        let current = self.current_org();
        if orgs.is_empty() {
            writeln!(f, "You do not belong to any organization yet.")?;
        }
        for org in &orgs {
            let marker = if current.as_ref().map(|c| c.id) == Some(org.id) {
                "*"
            } else {
                " "
            };
            writeln!(
                f,
                "{} [{}] {} (since {})",
                marker,
                org.id,
                org.name,
                format_time(&org.created_at)
            )?;
        }

        let Some(current) = current else {
            return Ok(());
        };
        writeln!(f)?;
        writeln!(f, "Members of {}:", current.name)?;
        if !self.members.fmt_pending(f)? {
            return Ok(());
        }
        if let Some(members) = self.members.ready() {
            for m in members {
                writeln!(
                    f,
                    "  [{}] {:<24} {:<32} {:<6} joined {}",
                    m.user_id,
                    m.user_name,
                    m.user_email,
                    m.role,
                    format_time(&m.created_at)
                )?;
            }
        }
        if let Some(invitation) = &self.last_invitation {
            writeln!(
                f,
                "Last invitation: {} ({}) token {}",
                invitation.email, invitation.role, invitation.token
            )?;
        }
        Ok(())
    }
}
