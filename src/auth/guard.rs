//! Route guard for protected surfaces.
//!
//! One guard is mounted per protected route. Each render tick it is handed
//! the current session view and answers with what to render; the redirect to
//! the login surface is a side effect the guard performs itself, exactly once
//! per fall into the unauthenticated state, so re-renders can never cause a
//! redirect loop.

use std::sync::Arc;

use tracing::debug;

use crate::auth::session::SessionView;
use crate::nav::{Navigator, LOGIN_ROUTE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Hydration has not completed; the session is indeterminate.
    Pending,
    /// Hydrated without a valid session; a redirect has been issued.
    Unauthenticated,
    /// Hydrated with a valid session.
    Authenticated,
}

/// What the host should render this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardRender {
    Loading,
    Content,
}

pub struct RouteGuard {
    state: GuardState,
    redirected: bool,
    navigator: Arc<dyn Navigator>,
}

impl RouteGuard {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self {
            state: GuardState::Pending,
            redirected: false,
            navigator,
        }
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Evaluate the guard against the current session view.
    ///
    /// Pre-hydration views always yield `Loading`: an indeterminate session
    /// is never treated as logged out. Once unauthenticated, the guard stays
    /// unauthenticated and keeps rendering `Loading` until it is unmounted;
    /// logging back in goes through a fresh mount after the login redirect.
    pub fn evaluate(&mut self, view: &SessionView) -> GuardRender {
        match self.state {
            GuardState::Pending => {
                if !view.has_hydrated {
                    return GuardRender::Loading;
                }
                if view.is_logged_in() {
                    self.state = GuardState::Authenticated;
                    self.render_authenticated(view)
                } else {
                    self.enter_unauthenticated();
                    GuardRender::Loading
                }
            }
            GuardState::Authenticated => {
                if !view.is_logged_in() {
                    self.enter_unauthenticated();
                    return GuardRender::Loading;
                }
                self.render_authenticated(view)
            }
            GuardState::Unauthenticated => GuardRender::Loading,
        }
    }

    fn render_authenticated(&self, view: &SessionView) -> GuardRender {
        if view.is_view_loading() {
            GuardRender::Loading
        } else {
            GuardRender::Content
        }
    }

    fn enter_unauthenticated(&mut self) {
        self.state = GuardState::Unauthenticated;
        if !self.redirected {
            self.redirected = true;
            debug!(route = LOGIN_ROUTE, "Guard redirecting to login");
            self.navigator.push(LOGIN_ROUTE);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
