//! HTTP client module for the Jotter notes server.
//!
//! This module provides the `ApiClient` for both server surfaces: the
//! unauthenticated `/auth/*` flows and the bearer-authenticated `/api/*`
//! notes resources.
//!
//! A 401 from the protected surface force-invalidates the session and
//! hard-navigates to the login surface.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
