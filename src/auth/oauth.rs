//! Completion of the external OAuth redirect.
//!
//! The provider hands the browser back to us with a bearer token in the URL
//! query. The token is exchanged for a profile via the unauthenticated
//! profile endpoint, and only then does the session log in.

use anyhow::{Context, Result};
use tracing::warn;

use crate::api::ApiClient;
use crate::auth::SessionStore;
use crate::models::User;
use crate::nav::{Navigator, HOME_ROUTE, LOGIN_ROUTE};

/// Query parameter the provider redirect carries the token in
const TOKEN_PARAM: &str = "token";

/// Finish an OAuth login from the provider redirect URL.
///
/// On success the session holds the new user and token and the navigator is
/// pushed home. Any failure (missing token, rejected exchange) pushes back to
/// the login surface and returns the error for the frontend to surface.
pub async fn complete_oauth_login(
    client: &ApiClient,
    session: &SessionStore,
    navigator: &dyn Navigator,
    redirect_url: &str,
) -> Result<User> {
    let Some(token) = extract_token(redirect_url) else {
        warn!("OAuth redirect arrived without a token");
        navigator.push(LOGIN_ROUTE);
        anyhow::bail!("OAuth redirect did not carry a token");
    };

    match client.fetch_profile(&token).await {
        Ok(user) => {
            session.login(user.clone(), token);
            navigator.push(HOME_ROUTE);
            Ok(user)
        }
        Err(err) => {
            warn!(error = %err, "OAuth profile exchange failed");
            navigator.push(LOGIN_ROUTE);
            Err(err).context("Failed to exchange OAuth token for a profile")
        }
    }
}

fn extract_token(redirect_url: &str) -> Option<String> {
    let url = reqwest::Url::parse(redirect_url).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == TOKEN_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::storage::MemorySnapshotStore;
    use crate::auth::vault::MemoryVault;
    use crate::config::Config;
    use crate::nav::RecordingNavigator;
    use std::sync::Arc;

    #[test]
    fn test_extract_token_from_query() {
        let url = "https://app.example.com/auth/google/success?token=tok_9&state=x";
        assert_eq!(extract_token(url).as_deref(), Some("tok_9"));
    }

    #[test]
    fn test_extract_token_missing_or_empty() {
        assert!(extract_token("https://app.example.com/auth/google/success").is_none());
        assert!(extract_token("https://app.example.com/?token=").is_none());
        assert!(extract_token("not a url").is_none());
    }

    fn fixtures() -> (ApiClient, SessionStore, Arc<RecordingNavigator>) {
        let session = SessionStore::new(
            Arc::new(MemorySnapshotStore::new()),
            Arc::new(MemoryVault::new()),
        );
        let nav = Arc::new(RecordingNavigator::new());
        // Nothing listens on this port; profile fetches fail fast.
        let config = Config {
            server_url: Some("http://127.0.0.1:9".to_string()),
            ..Config::default()
        };
        let client = ApiClient::new(&config, session.clone(), nav.clone()).unwrap();
        (client, session, nav)
    }

    #[tokio::test]
    async fn test_missing_token_redirects_to_login() {
        let (client, session, nav) = fixtures();
        let result = complete_oauth_login(
            &client,
            &session,
            nav.as_ref(),
            "https://app.example.com/auth/google/success",
        )
        .await;

        assert!(result.is_err());
        assert_eq!(nav.pushes(), vec![LOGIN_ROUTE]);
        assert!(session.token().is_none());
    }

    #[tokio::test]
    async fn test_failed_exchange_redirects_to_login() {
        let (client, session, nav) = fixtures();
        let result = complete_oauth_login(
            &client,
            &session,
            nav.as_ref(),
            "https://app.example.com/auth/google/success?token=tok_9",
        )
        .await;

        assert!(result.is_err());
        assert_eq!(nav.pushes(), vec![LOGIN_ROUTE]);
        assert!(session.token().is_none());
    }
}
