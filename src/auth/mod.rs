//! Authentication: session state, durable credential storage, route guarding.
//!
//! This module provides:
//! - `SessionStore`: the injectable session service (login, logout, hydration,
//!   side-channel reconciliation, forced invalidation)
//! - `RouteGuard`: the per-mount state machine gating protected surfaces
//! - storage seams for the session snapshot and the side-channel token vault
//! - the OAuth redirect completion flow
//!
//! The bearer token is durably stored twice: in the session snapshot and in a
//! 30-day side-channel vault record used to repair a lost snapshot.

pub mod guard;
pub mod oauth;
pub mod session;
pub mod storage;
pub mod vault;

pub use guard::{GuardRender, GuardState, RouteGuard};
pub use oauth::complete_oauth_login;
pub use session::{SessionStore, SessionView};
pub use storage::{FileSnapshotStore, MemorySnapshotStore, SessionSnapshot, SnapshotStore};
pub use vault::{KeyringVault, MemoryVault, TokenRecord, TokenVault};
