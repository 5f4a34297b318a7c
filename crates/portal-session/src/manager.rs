//! The process-wide session manager.

use crate::{status, SessionError, SessionStatus};
use portal_gateway::{CredentialGateway, LoginRequest};
use portal_storage::TokenVault;
use portal_types::{GatewayError, Profile, Role};
use std::sync::Mutex;

/// Read-only view of the current session.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    /// Present iff `status` is `Authenticated`.
    pub profile: Option<Profile>,
    /// The tag of `profile` when authenticated.
    pub role: Option<Role>,
    /// Last resolution error, retained until the next resolution attempt.
    pub last_error: Option<GatewayError>,
    /// Resolution generation counter.
    pub epoch: u64,
}

struct SessionState {
    status: SessionStatus,
    /// Last non-`Resolving` status, the rollback target when a resolution
    /// fails transiently.
    settled: SessionStatus,
    /// Profile of the last authenticated settle. Retained internally across
    /// `Resolving` so a transient failure can restore it; public reads only
    /// expose it while `Authenticated`.
    profile: Option<Profile>,
    last_error: Option<GatewayError>,
    epoch: u64,
}

fn transition(state: &mut SessionState, to: SessionStatus) {
    debug_assert!(
        status::is_valid_transition(state.status, to),
        "invalid session transition {:?} -> {:?}",
        state.status,
        to
    );
    state.status = to;
    if to != SessionStatus::Resolving {
        state.settled = to;
    }
}

/// Owns the single source of truth for "who is logged in".
///
/// All async completions are tagged with the epoch current at initiation;
/// a completion whose epoch no longer matches is discarded without touching
/// any state, so a stale "who am I" response can never resurrect a session
/// the user already left.
pub struct SessionManager<G> {
    gateway: G,
    vault: TokenVault,
    state: Mutex<SessionState>,
}

impl<G: CredentialGateway> SessionManager<G> {
    /// Create a session from the token store contents: pending resolution
    /// when a token pair is stored, anonymous otherwise. No network call.
    pub fn new(gateway: G, vault: TokenVault) -> Self {
        let status = match vault.has_tokens() {
            Ok(true) => SessionStatus::Unresolved,
            Ok(false) => SessionStatus::Anonymous,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to read token vault, starting anonymous");
                SessionStatus::Anonymous
            }
        };

        Self {
            gateway,
            vault,
            state: Mutex::new(SessionState {
                status,
                settled: status,
                profile: None,
                last_error: None,
                epoch: 0,
            }),
        }
    }

    /// Resolve the stored identity at startup.
    ///
    /// With no stored tokens this is a no-op: the session stays anonymous
    /// and the gateway is never called.
    pub async fn bootstrap(&self) -> Result<(), SessionError> {
        if !self.vault.has_tokens()? {
            return Ok(());
        }
        self.refresh().await
    }

    /// Re-resolve the current identity against the gateway.
    ///
    /// Outcomes:
    /// - success: authenticated with the decoded profile
    /// - `NoAuth`/`SessionExpired`: tokens and profile cleared, anonymous
    /// - any other error: previous status and profile restored, the error
    ///   recorded as `last_error`
    ///
    /// A completion superseded by a newer session change is discarded
    /// entirely and reported as `SessionError::Superseded`.
    pub async fn refresh(&self) -> Result<(), SessionError> {
        let Some(access_token) = self.vault.access_token()? else {
            let mut state = self.state.lock().unwrap();
            state.epoch += 1;
            state.profile = None;
            state.last_error = None;
            transition(&mut state, SessionStatus::Anonymous);
            return Ok(());
        };

        let epoch = {
            let mut state = self.state.lock().unwrap();
            state.epoch += 1;
            transition(&mut state, SessionStatus::Resolving);
            state.epoch
        };

        let result = self.gateway.whoami(&access_token).await;

        let mut state = self.state.lock().unwrap();
        if state.epoch != epoch {
            tracing::debug!(
                tagged = epoch,
                current = state.epoch,
                "Discarding stale identity resolution"
            );
            return Err(SessionError::Superseded);
        }

        match result {
            Ok(profile) => {
                tracing::info!(role = %profile.role(), account = %profile.id(), "Session resolved");
                state.profile = Some(profile);
                state.last_error = None;
                transition(&mut state, SessionStatus::Authenticated);
                Ok(())
            }
            Err(err) if err.invalidates_session() => {
                tracing::info!(error = %err, "Stored session no longer valid, dropping to anonymous");
                state.profile = None;
                state.last_error = Some(err.clone());
                transition(&mut state, SessionStatus::Anonymous);
                if let Err(storage_err) = self.vault.clear() {
                    tracing::warn!(error = %storage_err, "Failed to clear invalidated tokens");
                }
                Err(SessionError::Gateway(err))
            }
            Err(err) => {
                // Transient failure: keep whatever identity we had.
                tracing::warn!(error = %err, "Identity resolution failed, keeping previous session state");
                state.last_error = Some(err.clone());
                let settled = state.settled;
                transition(&mut state, settled);
                Err(SessionError::Gateway(err))
            }
        }
    }

    /// Log in with role-specific credentials.
    ///
    /// On success the returned token pair is stored atomically and the
    /// session becomes authenticated as the requested role. On failure
    /// nothing is mutated; the error is returned for inline display.
    pub async fn login(&self, request: LoginRequest) -> Result<Profile, SessionError> {
        let epoch = {
            let mut state = self.state.lock().unwrap();
            state.epoch += 1;
            state.epoch
        };

        let outcome = match self.gateway.login(&request).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::debug!(role = %request.role(), error = %err, "Login rejected");
                return Err(SessionError::Gateway(err));
            }
        };

        let mut state = self.state.lock().unwrap();
        if state.epoch != epoch {
            tracing::warn!("Discarding login completion superseded by a newer session change");
            return Err(SessionError::Superseded);
        }

        self.vault.store(&outcome.tokens)?;
        state.profile = Some(outcome.profile.clone());
        state.last_error = None;
        transition(&mut state, SessionStatus::Authenticated);
        Ok(outcome.profile)
    }

    /// Log out, invalidating the current refresh token server-side.
    ///
    /// The local session is cleared before the server call and stays
    /// cleared even if that call fails; the failure is only reported.
    pub async fn logout(&self) -> Result<(), SessionError> {
        self.end_session(false).await
    }

    /// Log out everywhere, invalidating every refresh token issued to the
    /// account. Same local-clear guarantee as `logout`.
    pub async fn logout_all(&self) -> Result<(), SessionError> {
        self.end_session(true).await
    }

    async fn end_session(&self, all_devices: bool) -> Result<(), SessionError> {
        let refresh_token = self.vault.refresh_token()?;

        {
            let mut state = self.state.lock().unwrap();
            state.epoch += 1;
            state.profile = None;
            state.last_error = None;
            transition(&mut state, SessionStatus::Anonymous);
        }
        self.vault.clear()?;

        let Some(refresh_token) = refresh_token else {
            return Ok(());
        };

        let result = if all_devices {
            self.gateway.logout_all(&refresh_token).await
        } else {
            self.gateway.logout(&refresh_token).await
        };

        if let Err(err) = result {
            tracing::warn!(error = %err, "Server-side logout failed; local session already cleared");
            return Err(SessionError::Gateway(err));
        }
        Ok(())
    }

    /// Full read-only view of the current session.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock().unwrap();
        let profile = match state.status {
            SessionStatus::Authenticated => state.profile.clone(),
            _ => None,
        };
        SessionSnapshot {
            status: state.status,
            role: profile.as_ref().map(|p| p.role()),
            profile,
            last_error: state.last_error.clone(),
            epoch: state.epoch,
        }
    }

    /// The resolved profile, when authenticated.
    pub fn current_profile(&self) -> Option<Profile> {
        self.snapshot().profile
    }

    /// The resolved role, when authenticated.
    pub fn current_role(&self) -> Option<Role> {
        self.snapshot().role
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot().status == SessionStatus::Authenticated
    }

    /// True while a resolution is pending. Role-gated pages must not
    /// redirect to the landing route while this holds.
    pub fn is_loading(&self) -> bool {
        self.snapshot().status.is_loading()
    }

    pub fn last_error(&self) -> Option<GatewayError> {
        self.snapshot().last_error
    }

    /// The stored access token, for components making authenticated
    /// requests of their own. The resolved status, not token presence, is
    /// ground truth for whether the user is logged in.
    pub fn access_token(&self) -> Result<Option<String>, SessionError> {
        Ok(self.vault.access_token()?)
    }
}
