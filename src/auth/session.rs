//! The session store: in-memory auth state plus its two durable copies.
//!
//! The store is an explicit, cheaply clonable handle (shared state behind an
//! `Arc`, like `reqwest::Client`); every component that needs session state
//! receives a clone rather than reaching for a global.
//!
//! Durable state lives in two places: the full session snapshot (user, token,
//! authenticated flag) and the side-channel token vault. `hydrate` reads both
//! once at startup and repairs the in-memory token from the vault when the
//! snapshot lost it. Persistence writes are best-effort; a failed write is
//! logged and never surfaced to the caller.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::auth::storage::{FileSnapshotStore, SessionSnapshot, SnapshotStore};
use crate::auth::vault::{KeyringVault, TokenRecord, TokenVault};
use crate::config::Config;
use crate::models::User;

#[derive(Debug, Default)]
struct SessionState {
    user: Option<User>,
    token: Option<String>,
    has_hydrated: bool,
    is_loading: bool,
}

/// Point-in-time view of the session for render-tick consumers.
///
/// Gating decisions go through `is_logged_in`, never through raw token or
/// flag inspection: before hydration the state is indeterminate, not
/// logged out.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub user: Option<User>,
    pub token: Option<String>,
    pub has_hydrated: bool,
    pub is_loading: bool,
}

impl SessionView {
    pub fn is_logged_in(&self) -> bool {
        self.has_hydrated && self.token.is_some()
    }

    pub fn is_view_loading(&self) -> bool {
        !self.has_hydrated || self.is_loading
    }
}

/// Holds the current authentication state and keeps the durable copies in
/// sync. Clone is cheap; all clones share the same state.
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<Mutex<SessionState>>,
    snapshots: Arc<dyn SnapshotStore>,
    vault: Arc<dyn TokenVault>,
}

impl SessionStore {
    pub fn new(snapshots: Arc<dyn SnapshotStore>, vault: Arc<dyn TokenVault>) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState {
                is_loading: true,
                ..SessionState::default()
            })),
            snapshots,
            vault,
        }
    }

    /// Open the store with the platform-default backends: a snapshot file in
    /// the app data directory and the OS keychain for the side-channel token.
    pub fn open(config: &Config) -> anyhow::Result<Self> {
        let data_dir = config.data_dir()?;
        Ok(Self::new(
            Arc::new(FileSnapshotStore::new(data_dir)),
            Arc::new(KeyringVault),
        ))
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ===== Mutations =====

    /// Establish a session: adopt the user and token, write the side-channel
    /// record, persist the snapshot. The token is treated as opaque; no
    /// format validation is performed.
    pub fn login(&self, user: User, token: impl Into<String>) {
        let token = token.into();
        if let Err(err) = self.vault.store(&TokenRecord::new(token.clone())) {
            warn!(error = %err, "Failed to write side-channel token");
        }
        let mut state = self.state();
        state.user = Some(user);
        state.token = Some(token);
        state.is_loading = false;
        self.persist(&state);
        info!("Session established");
    }

    /// Tear the session down: clear user and token, remove the side-channel
    /// record, persist the logged-out snapshot. Idempotent.
    pub fn logout(&self) {
        let mut state = self.state();
        state.user = None;
        state.token = None;
        state.is_loading = false;
        self.persist(&state);
        drop(state);
        if let Err(err) = self.vault.remove() {
            warn!(error = %err, "Failed to remove side-channel token");
        }
        info!("Session cleared");
    }

    /// Hard reset after a credential rejection: clear everything and wipe the
    /// durable copies outright, rather than writing a logged-out snapshot.
    /// Distinct from `logout` because the rejected credential means neither
    /// the in-memory state nor the persisted record can be trusted.
    pub fn force_invalidate(&self) {
        let mut state = self.state();
        state.user = None;
        state.token = None;
        state.is_loading = false;
        drop(state);
        if let Err(err) = self.vault.remove() {
            warn!(error = %err, "Failed to remove side-channel token");
        }
        if let Err(err) = self.snapshots.clear() {
            warn!(error = %err, "Failed to wipe session snapshot");
        }
        warn!("Session force-invalidated");
    }

    /// Field setter used during reconciliation. Not a login substitute: it
    /// does not touch the side-channel vault.
    pub fn set_user(&self, user: Option<User>) {
        let mut state = self.state();
        state.user = user;
        self.persist(&state);
    }

    /// Field setter used during reconciliation. Not a login substitute: it
    /// does not touch the side-channel vault.
    pub fn set_token(&self, token: Option<String>) {
        let mut state = self.state();
        state.token = token;
        self.persist(&state);
    }

    pub fn set_loading(&self, loading: bool) {
        self.state().is_loading = loading;
    }

    // ===== Hydration =====

    /// One-shot restore from durable storage. An unreadable or corrupt
    /// snapshot is treated as "no session", never as a fatal error. After the
    /// snapshot is applied, an empty in-memory token is repaired from the
    /// side-channel vault if a non-expired record survives there; the repair
    /// runs in that direction only. Calling again after completion is a no-op.
    pub async fn hydrate(&self) {
        let mut state = self.state();
        if state.has_hydrated {
            return;
        }

        match self.snapshots.load() {
            Ok(Some(snapshot)) => {
                // The persisted isAuthenticated flag is intentionally ignored;
                // token presence alone decides.
                state.user = snapshot.user;
                state.token = snapshot.token;
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "Session snapshot unreadable, starting logged out");
            }
        }

        if state.token.is_none() {
            match self.vault.load() {
                Ok(Some(record)) if record.is_expired() => {
                    debug!("Side-channel token expired, discarding");
                    if let Err(err) = self.vault.remove() {
                        warn!(error = %err, "Failed to remove expired side-channel token");
                    }
                }
                Ok(Some(record)) => {
                    info!("Recovered bearer token from side-channel vault");
                    state.token = Some(record.token);
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(error = %err, "Side-channel vault unreadable");
                }
            }
        }

        state.has_hydrated = true;
        state.is_loading = false;
        self.persist(&state);
    }

    // ===== Accessors =====

    pub fn token(&self) -> Option<String> {
        self.state().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state().user.clone()
    }

    pub fn has_hydrated(&self) -> bool {
        self.state().has_hydrated
    }

    /// Hydrated and holding a token. The only signal gating decisions may use.
    pub fn is_logged_in(&self) -> bool {
        let state = self.state();
        state.has_hydrated && state.token.is_some()
    }

    /// True while the session state is still indeterminate.
    pub fn is_view_loading(&self) -> bool {
        let state = self.state();
        !state.has_hydrated || state.is_loading
    }

    pub fn view(&self) -> SessionView {
        let state = self.state();
        SessionView {
            user: state.user.clone(),
            token: state.token.clone(),
            has_hydrated: state.has_hydrated,
            is_loading: state.is_loading,
        }
    }

    /// Best-effort snapshot write; failures are logged, never propagated.
    fn persist(&self, state: &SessionState) {
        let snapshot = SessionSnapshot {
            user: state.user.clone(),
            token: state.token.clone(),
            is_authenticated: state.token.is_some(),
        };
        if let Err(err) = self.snapshots.save(&snapshot) {
            warn!(error = %err, "Failed to persist session snapshot");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
