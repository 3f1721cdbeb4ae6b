//! Session lifecycle
//!
//! NoSession -> Temporary (init mints one from the system credentials)
//! Temporary -> User (the user pastes the redirect URL after browser login)
//! User -> NoSession (explicit logout only)
//!
//! A user session is never replaced by a temporary one behind the caller's
//! back. Every store write goes through `write_guard`. Concurrent `init()`
//! calls are single-flight: callers arriving while one is running wait for
//! its outcome, success or failure, instead of starting their own.

use std::sync::{Arc, Mutex as StdMutex, MutexGuard as StdMutexGuard};

use serde::Serialize;
use tokio::sync::{watch, Mutex};
use url::Url;

use crate::domain::result::{Error, Result};
use crate::domain::Session;
use crate::ports::{Endpoint, SessionStore};

use super::api::{ApiClient, SessionMode, NO_PARAMS};

/// Default host serving the institution login pages
pub const CBORD_LOGIN_URL: &str = "https://get.cbord.com";

/// Query parameter carrying the session id on the login redirect
pub const REDIRECT_SESSION_PARAM: &str = "sessionId";

const SYSTEM_USER_NAME: &str = "get_mobile";
const SYSTEM_PASSWORD: &str = "NOTUSED";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthenticateSystemParams {
    system_credentials: SystemCredentials,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SystemCredentials {
    domain: &'static str,
    user_name: &'static str,
    password: &'static str,
}

impl Default for AuthenticateSystemParams {
    fn default() -> Self {
        Self {
            system_credentials: SystemCredentials {
                domain: "",
                user_name: SYSTEM_USER_NAME,
                password: SYSTEM_PASSWORD,
            },
        }
    }
}

/// Outcome of one `init()` run, shared with every caller that waited on it
type InitOutcome = Option<Result<bool>>;

type InFlightSlot = StdMutex<Option<watch::Receiver<InitOutcome>>>;

/// Owns the session state machine
pub struct SessionManager {
    api: Arc<ApiClient>,
    store: Arc<dyn SessionStore>,
    login_base_url: Url,
    revalidate_temporary: bool,
    write_guard: Mutex<()>,
    in_flight: InFlightSlot,
}

/// Empties the in-flight slot when the running `init()` finishes or is dropped
struct ClearInFlight<'a>(&'a InFlightSlot);

impl Drop for ClearInFlight<'_> {
    fn drop(&mut self) {
        *lock_slot(self.0) = None;
    }
}

fn lock_slot(slot: &InFlightSlot) -> StdMutexGuard<'_, Option<watch::Receiver<InitOutcome>>> {
    // The slot only ever holds a receiver; a poisoned lock leaves it usable
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl SessionManager {
    pub fn new(api: Arc<ApiClient>, store: Arc<dyn SessionStore>, login_base_url: Url) -> Self {
        Self {
            api,
            store,
            login_base_url,
            revalidate_temporary: false,
            write_guard: Mutex::new(()),
            in_flight: StdMutex::new(None),
        }
    }

    /// Check a persisted temporary session on `init()` and replace it if
    /// the backend rejects it
    pub fn with_temporary_revalidation(mut self, enabled: bool) -> Self {
        self.revalidate_temporary = enabled;
        self
    }

    /// Make sure some session exists; returns whether it is only temporary
    ///
    /// Safe to call on every start. A persisted session is reused without
    /// any store write; only when none exists is a temporary session minted.
    /// Callers that arrive while another `init()` is running get that run's
    /// outcome; a failed mint is not retried on their behalf.
    pub async fn init(&self) -> Result<bool> {
        loop {
            let (leader, follower) = {
                let mut slot = lock_slot(&self.in_flight);
                match slot.as_ref() {
                    Some(rx) => (None, Some(rx.clone())),
                    None => {
                        let (tx, rx) = watch::channel(None);
                        *slot = Some(rx);
                        (Some(tx), None)
                    }
                }
            };

            if let Some(tx) = leader {
                let clear = ClearInFlight(&self.in_flight);
                let outcome = self.run_init().await;
                drop(clear);
                // Followers may all have gone away already
                let _ = tx.send(Some(outcome.clone()));
                return outcome;
            }

            if let Some(mut rx) = follower {
                let shared = rx.wait_for(Option::is_some).await.ok().and_then(|o| (*o).clone());
                if let Some(outcome) = shared {
                    return outcome;
                }
                // The running init was dropped before finishing; take over
            }
        }
    }

    async fn run_init(&self) -> Result<bool> {
        let _guard = self.write_guard.lock().await;

        match self.store.get().await? {
            Some(session) if session.is_temporary() => {
                if self.revalidate_temporary && !self.temporary_session_is_valid().await? {
                    tracing::info!("persisted temporary session was rejected, minting a new one");
                    self.mint_temporary_session().await?;
                }
                Ok(true)
            }
            Some(_) => Ok(false),
            None => {
                tracing::info!("no persisted session, minting a temporary one");
                self.mint_temporary_session().await?;
                Ok(true)
            }
        }
    }

    /// Authenticate the anonymous system user and return the new session id
    ///
    /// Does not store anything.
    pub async fn create_temporary_session(&self) -> Result<String> {
        let params = AuthenticateSystemParams::default();
        let id: String = self
            .api
            .call(Endpoint::Session, "authenticateSystem", Some(&params), SessionMode::Omit)
            .await?;

        if id.trim().is_empty() {
            return Err(Error::malformed("authenticateSystem returned an empty session id"));
        }
        Ok(id)
    }

    async fn mint_temporary_session(&self) -> Result<()> {
        let id = self.create_temporary_session().await?;
        self.store.put(&Session::temporary(id)).await
    }

    async fn temporary_session_is_valid(&self) -> Result<bool> {
        let lookup: Result<serde_json::Value> = self
            .api
            .call(Endpoint::Institution, "retrieveLookupList", NO_PARAMS, SessionMode::Attach)
            .await;

        match lookup {
            Ok(_) => Ok(true),
            Err(Error::Backend(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Replace the active session
    pub async fn set_active_session(&self, id: &str, is_temporary: bool) -> Result<()> {
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::validation("session id cannot be empty"));
        }

        let session = if is_temporary {
            Session::temporary(id)
        } else {
            Session::user(id)
        };

        let _guard = self.write_guard.lock().await;
        self.store.put(&session).await?;
        tracing::info!(kind = ?session.kind, "active session replaced");
        Ok(())
    }

    /// Log out: forget the session id and its kind
    pub async fn clear_active_session(&self) -> Result<()> {
        let _guard = self.write_guard.lock().await;
        self.store.clear().await?;
        tracing::info!("active session cleared");
        Ok(())
    }

    pub async fn active_session(&self) -> Result<Option<Session>> {
        self.store.get().await
    }

    pub async fn session_token_does_not_exist(&self) -> Result<bool> {
        Ok(self.store.get().await?.is_none())
    }

    /// False when there is no session at all
    pub async fn session_token_is_temporary(&self) -> Result<bool> {
        Ok(self
            .store
            .get()
            .await?
            .map(|s| s.is_temporary())
            .unwrap_or(false))
    }

    /// Browser login page for an institution
    pub fn auth_url(&self, institution_short_name: &str) -> Result<String> {
        auth_url(&self.login_base_url, institution_short_name)
    }

    /// Finish the browser handoff: pull the session id out of the pasted
    /// redirect URL and store it as the user session
    ///
    /// On any parse failure the stored session is left untouched.
    pub async fn complete_login(&self, redirect_url: &str) -> Result<()> {
        let id = session_id_from_validator_url(redirect_url)?.ok_or_else(|| {
            Error::validation(format!(
                "redirect URL has no {} parameter",
                REDIRECT_SESSION_PARAM
            ))
        })?;

        self.set_active_session(&id, false).await
    }
}

/// `{login_base}/{shortName}/full/login.php?mobileapp=1`
pub fn auth_url(login_base_url: &Url, institution_short_name: &str) -> Result<String> {
    let short_name = institution_short_name.trim();
    if short_name.is_empty() {
        return Err(Error::validation("institution short name cannot be empty"));
    }

    let mut url = login_base_url.clone();
    url.path_segments_mut()
        .map_err(|_| Error::Config(format!("login base URL {} cannot have a path", login_base_url)))?
        .pop_if_empty()
        .extend([short_name, "full", "login.php"]);
    url.set_query(Some("mobileapp=1"));
    Ok(url.to_string())
}

/// Extract `sessionId` from the URL the login flow redirected to
///
/// `Ok(None)` when the parameter is absent or empty, a validation error when
/// the text is not a URL at all.
pub fn session_id_from_validator_url(url: &str) -> Result<Option<String>> {
    let parsed = Url::parse(url.trim())
        .map_err(|e| Error::validation(format!("not a valid URL: {}", e)))?;

    Ok(parsed
        .query_pairs()
        .find(|(key, _)| key == REDIRECT_SESSION_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty()))
}
