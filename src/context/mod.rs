//! Organization context.
//!
//! Holds the organizations the signed-in user belongs to and which one is
//! current. The context is created once per session and handed to every page
//! that needs it; the selected id is persisted under [`CURRENT_ORG_KEY`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{watch, Mutex};

use crate::api::organizations;
use crate::errors::{ClientError, ClientResult};
use crate::http::HttpClient;
use crate::models::Organization;
use crate::storage::{LocalStorage, CURRENT_ORG_KEY};

/// Lifecycle of the organization list.
#[derive(Debug, Clone, PartialEq)]
pub enum OrgState {
    /// Nothing fetched yet
    Idle,
    /// Initial fetch in flight
    Loading,
    /// At least one organization; `current` is one of them or none
    Ready {
        organizations: Vec<Organization>,
        current: Option<Organization>,
    },
    /// No organizations, or the fetch failed
    Empty,
}

impl OrgState {
    pub fn organizations(&self) -> &[Organization] {
        match self {
            OrgState::Ready { organizations, .. } => organizations,
            _ => &[],
        }
    }

    pub fn current(&self) -> Option<&Organization> {
        match self {
            OrgState::Ready { current, .. } => current.as_ref(),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, OrgState::Idle | OrgState::Loading)
    }
}

/// Pick the organization to make current after a fetch.
///
/// The stored id wins if it is still in the list, otherwise the first entry,
/// otherwise none.
pub fn restore_selection(
    organizations: &[Organization],
    stored_id: Option<&str>,
) -> Option<Organization> {
    let stored_id = stored_id.and_then(|raw| raw.trim().parse::<i64>().ok());

    stored_id
        .and_then(|id| organizations.iter().find(|org| org.id == id))
        .or_else(|| organizations.first())
        .cloned()
}

pub struct OrgContext {
    http: Arc<HttpClient>,
    storage: Arc<dyn LocalStorage>,
    state: watch::Sender<OrgState>,
    refresh_lock: Mutex<()>,
    /// Bumped after every finished fetch; callers that queued behind a fetch
    /// compare it to decide whether their request was already served.
    completed_refreshes: AtomicU64,
}

impl OrgContext {
    pub fn new(http: Arc<HttpClient>, storage: Arc<dyn LocalStorage>) -> Self {
        let (state, _) = watch::channel(OrgState::Idle);

        Self {
            http,
            storage,
            state,
            refresh_lock: Mutex::new(()),
            completed_refreshes: AtomicU64::new(0),
        }
    }

    /// Run the initial fetch.
    pub async fn init(&self) -> OrgState {
        self.refresh_orgs().await
    }

    pub fn snapshot(&self) -> OrgState {
        self.state.borrow().clone()
    }

    pub fn current_org(&self) -> Option<Organization> {
        self.state.borrow().current().cloned()
    }

    pub fn organizations(&self) -> Vec<Organization> {
        self.state.borrow().organizations().to_vec()
    }

    /// Observe every state transition.
    pub fn subscribe(&self) -> watch::Receiver<OrgState> {
        self.state.subscribe()
    }

    /// Change the current organization. Never touches the network.
    pub fn set_current_org(&self, org_id: Option<i64>) -> ClientResult<()> {
        let selected = match org_id {
            None => None,
            Some(id) => {
                let state = self.state.borrow();
                let found = state.organizations().iter().find(|org| org.id == id).cloned();
                Some(found.ok_or_else(|| {
                    ClientError::validation(format!("Organization {} is not one of yours", id))
                })?)
            }
        };

        self.state.send_if_modified(|state| match state {
            OrgState::Ready { current, .. } => {
                *current = selected.clone();
                true
            }
            _ => false,
        });

        let org_id = selected.as_ref().map(|org| org.id);
        tracing::debug!(?org_id, "current organization changed");
        self.persist(selected.as_ref())
    }

    /// Re-fetch the organization list and restore the selection.
    ///
    /// One fetch runs at a time. A caller that queued behind a running fetch
    /// gets that fetch's result instead of issuing another request.
    pub async fn refresh_orgs(&self) -> OrgState {
        let ticket = self.completed_refreshes.load(Ordering::Acquire);
        let _guard = self.refresh_lock.lock().await;

        if self.completed_refreshes.load(Ordering::Acquire) != ticket {
            tracing::debug!("organization refresh served by a concurrent fetch");
            return self.snapshot();
        }

        self.state.send_if_modified(|state| {
            if matches!(state, OrgState::Idle) {
                *state = OrgState::Loading;
                true
            } else {
                false
            }
        });

        let next = match organizations::mine(&self.http).await {
            Ok(organizations) => self.restore(organizations),
            Err(err) => {
                tracing::warn!("Failed to load organizations: {}", err);
                OrgState::Empty
            }
        };

        self.state.send_replace(next.clone());
        self.completed_refreshes.fetch_add(1, Ordering::AcqRel);
        next
    }

    fn restore(&self, organizations: Vec<Organization>) -> OrgState {
        let stored = self.storage.get(CURRENT_ORG_KEY).unwrap_or_else(|err| {
            tracing::warn!("Cannot read stored organization: {}", err);
            None
        });

        let current = restore_selection(&organizations, stored.as_deref());
        if let Err(err) = self.persist(current.as_ref()) {
            tracing::warn!("Cannot store organization selection: {}", err);
        }

        if organizations.is_empty() {
            OrgState::Empty
        } else {
            OrgState::Ready {
                organizations,
                current,
            }
        }
    }

    fn persist(&self, selected: Option<&Organization>) -> ClientResult<()> {
        match selected {
            Some(org) => self.storage.set(CURRENT_ORG_KEY, &org.id.to_string()),
            None => self.storage.remove(CURRENT_ORG_KEY),
        }
    }
}
