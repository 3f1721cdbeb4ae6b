//! Swipes Core - session lifecycle and API client for CBORD GET
//!
//! This crate follows a hexagonal layout:
//!
//! - **domain**: Backend payloads (Account, Transaction, ...), envelopes, errors
//! - **ports**: Trait definitions for external dependencies (SessionStore, Transport)
//! - **services**: Envelope client, session state machine, domain operations
//! - **adapters**: Concrete implementations (JSON file store, reqwest transport)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use url::Url;

use adapters::{FileSessionStore, HttpTransport};
use config::Config;
use ports::{SessionStore, Transport};
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult};
pub use domain::{
    Account, Institution, Session, SessionKind, Transaction, TransactionHistory,
    TransactionQuery, TransactionQueryPatch, UserProfile,
};

/// Main context for Swipes operations
///
/// Wires one store and one transport into every service, so all of them
/// observe the same active session.
pub struct SwipesContext {
    pub config: Config,
    pub sessions: Arc<SessionManager>,
    pub institutions: InstitutionService,
    pub commerce: Arc<CommerceService>,
    pub users: UserService,
    pub status: StatusService,
}

impl SwipesContext {
    /// Create a context backed by `data_dir/session.json` and the configured API
    pub fn new(data_dir: &Path) -> Result<Self> {
        let config = Config::load(data_dir)?;

        let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(data_dir));
        let transport: Arc<dyn Transport> = Arc::new(
            HttpTransport::new_with_base_url(&config.base_url, config.timeout)
                .context("Failed to create GET services client")?,
        );

        Self::with_parts(config, store, transport)
    }

    /// Create a context from explicit parts (tests, embedding)
    pub fn with_parts(
        config: Config,
        store: Arc<dyn SessionStore>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let login_base_url = Url::parse(&config.login_base_url)
            .with_context(|| format!("Invalid login base URL: {}", config.login_base_url))?;

        let api = Arc::new(ApiClient::new(transport, Arc::clone(&store)));
        let sessions = Arc::new(
            SessionManager::new(Arc::clone(&api), store, login_base_url)
                .with_temporary_revalidation(config.revalidate_temporary_session),
        );
        let institutions = InstitutionService::new(Arc::clone(&api));
        let commerce = Arc::new(CommerceService::new(Arc::clone(&api)));
        let users = UserService::new(Arc::clone(&api));
        let status = StatusService::new(Arc::clone(&sessions), Arc::clone(&commerce));

        Ok(Self {
            config,
            sessions,
            institutions,
            commerce,
            users,
            status,
        })
    }
}
