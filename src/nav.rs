//! Navigation seam between the core and whatever frontend hosts it.
//!
//! The core performs two kinds of navigation: ordinary client-side route
//! pushes (route guard redirects, post-login redirects) and hard location
//! replacement when a rejected credential forces the session down. Frontends
//! implement `Navigator` over their router; tests use `RecordingNavigator`.

use std::sync::{Mutex, PoisonError};

/// Route of the login surface, the target of every auth redirect.
pub const LOGIN_ROUTE: &str = "/auth/login";

/// Route of the notes list, the landing page after a successful login.
pub const HOME_ROUTE: &str = "/";

pub trait Navigator: Send + Sync {
    /// Client-side navigation; the app shell stays alive.
    fn push(&self, route: &str);

    /// Hard navigation that tears down the app shell, used when in-memory
    /// state can no longer be trusted.
    fn replace(&self, route: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKind {
    Push,
    Replace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEvent {
    pub kind: NavKind,
    pub route: String,
}

/// Records navigations instead of performing them.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    events: Mutex<Vec<NavEvent>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<NavEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Routes of recorded client-side pushes, in order.
    pub fn pushes(&self) -> Vec<String> {
        self.routes_of(NavKind::Push)
    }

    /// Routes of recorded hard replacements, in order.
    pub fn replaces(&self) -> Vec<String> {
        self.routes_of(NavKind::Replace)
    }

    fn routes_of(&self, kind: NavKind) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.route)
            .collect()
    }

    fn record(&self, kind: NavKind, route: &str) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(NavEvent {
                kind,
                route: route.to_string(),
            });
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, route: &str) {
        self.record(NavKind::Push, route);
    }

    fn replace(&self, route: &str) {
        self.record(NavKind::Replace, route);
    }
}
