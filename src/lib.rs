//! jotter-core - client core for the Jotter notes app.
//!
//! This crate is the headless core a frontend mounts on: it owns the
//! authentication session (in-memory state, durable snapshot, side-channel
//! token vault), the route guard deciding whether protected surfaces may
//! render, and the HTTP client for the notes server.
//!
//! The intended startup order: load `Config`, open the `SessionStore`,
//! `hydrate()` it once, then hand `SessionStore` clones to the `ApiClient`
//! and one `RouteGuard` per protected route. Consumers gate rendering on the
//! store's derived view only; pre-hydration state is indeterminate, not
//! logged out.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod nav;

pub use api::{ApiClient, ApiError};
pub use auth::{
    complete_oauth_login, GuardRender, GuardState, RouteGuard, SessionStore, SessionView,
};
pub use config::Config;
pub use models::{ApiResponse, Note, NoteDraft, User};
pub use nav::{Navigator, HOME_ROUTE, LOGIN_ROUTE};
