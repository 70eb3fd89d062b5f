//! Pending invitations addressed to the signed-in user.

use std::fmt;

use crate::api::organizations;
use crate::models::Invitation;
use crate::AppState;

use super::forms::require;
use super::{format_time, ActionOutcome, PageState};

pub struct InvitationsPage {
    app: AppState,
    pending: PageState<Vec<Invitation>>,
}

impl InvitationsPage {
    pub fn new(app: AppState) -> Self {
        Self {
            app,
            pending: PageState::Loading,
        }
    }

    pub fn pending(&self) -> &PageState<Vec<Invitation>> {
        &self.pending
    }

    pub async fn load(&mut self) -> &PageState<Vec<Invitation>> {
        self.pending = PageState::Loading;
        self.pending =
            PageState::from_result(organizations::pending_invitations(&self.app.http).await);
        &self.pending
    }

    /// Accept by token, then reload memberships and the pending list.
    pub async fn accept(&mut self, token: &str) -> ActionOutcome {
        if let Err(err) = require(token, "Invitation token") {
            return ActionOutcome::from_error(&err);
        }

        match organizations::accept_invitation(&self.app.http, token.trim()).await {
            Ok(member) => {
                tracing::info!(org_id = member.org_id, "invitation accepted");
                self.app.orgs.refresh_orgs().await;
                self.load().await;
                ActionOutcome::Success(format!(
                    "Joined organization {} as {}",
                    member.org_id, member.role
                ))
            }
            Err(err) => ActionOutcome::from_error(&err),
        }
    }
}

impl fmt::Display for InvitationsPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== Pending invitations ==")?;
        if !self.pending.fmt_pending(f)? {
            return Ok(());
        }
        let Some(pending) = self.pending.ready() else {
            return Ok(());
        };
        if pending.is_empty() {
            return writeln!(f, "No pending invitations.");
        }
        for inv in pending {
            let expires = inv
                .expires_at
                .as_ref()
                .map(format_time)
                .unwrap_or_else(|| "never".to_string());
            writeln!(
                f,
                "  org {:<5} as {:<6} expires {}  token {}",
                inv.org_id, inv.role, expires, inv.token
            )?;
        }
        Ok(())
    }
}
