//! Dashboard client for the multi-tenant SaaS admin backend.
//!
//! Typed API wrappers, the organization context, and page view models. The
//! `orgdash` binary hosts the pages in an interactive terminal session.

pub mod api;
pub mod config;
pub mod context;
pub mod errors;
pub mod http;
pub mod models;
pub mod pages;
pub mod shell;
pub mod storage;

use std::sync::Arc;

use config::Config;
use context::OrgContext;
use errors::ClientResult;
use http::HttpClient;
use storage::LocalStorage;

/// Session state handed to every page.
#[derive(Clone)]
pub struct AppState {
    pub http: Arc<HttpClient>,
    pub orgs: Arc<OrgContext>,
}

impl AppState {
    pub fn new(config: &Config, storage: Arc<dyn LocalStorage>) -> ClientResult<Self> {
        let http = Arc::new(HttpClient::new(&config.api_base_url)?);
        let orgs = Arc::new(OrgContext::new(http.clone(), storage));
        Ok(Self { http, orgs })
    }
}
