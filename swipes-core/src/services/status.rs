//! Status service - session state and balance overview

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::result::Result;
use crate::domain::SessionKind;

use super::commerce::{balance_summary, CommerceService};
use super::session::SessionManager;

/// Status service for the at-a-glance overview
pub struct StatusService {
    sessions: Arc<SessionManager>,
    commerce: Arc<CommerceService>,
}

impl StatusService {
    pub fn new(sessions: Arc<SessionManager>, commerce: Arc<CommerceService>) -> Self {
        Self { sessions, commerce }
    }

    /// Session state, plus balances when a user session is active
    ///
    /// Never creates a session; without a user session no backend call is made.
    pub async fn get_status(&self) -> Result<StatusSummary> {
        let session = self.sessions.active_session().await?;

        let state = match session.as_ref().map(|s| s.kind) {
            None => SessionState::None,
            Some(SessionKind::Temporary) => SessionState::Temporary,
            Some(SessionKind::User) => SessionState::User,
        };

        if state != SessionState::User {
            return Ok(StatusSummary {
                session: state,
                authenticated: false,
                accounts: Vec::new(),
                summary: None,
            });
        }

        let accounts = self.commerce.list_accounts().await?;
        let summary = balance_summary(&accounts);

        Ok(StatusSummary {
            session: state,
            authenticated: true,
            accounts: accounts
                .into_iter()
                .map(|a| AccountSummary {
                    id: a.id,
                    name: a.account_display_name,
                    balance: a.balance,
                })
                .collect(),
            summary: Some(summary),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    None,
    Temporary,
    User,
}

#[derive(Debug, Serialize)]
pub struct StatusSummary {
    pub session: SessionState,
    pub authenticated: bool,
    pub accounts: Vec<AccountSummary>,
    pub summary: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AccountSummary {
    pub id: String,
    pub name: String,
    pub balance: Decimal,
}
