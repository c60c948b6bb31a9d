use std::sync::{Mutex, PoisonError};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use keyring::Entry;
use serde::{Deserialize, Serialize};

/// Keyring service name for the side-channel token entry
const SERVICE_NAME: &str = "jotter";

/// Keyring account name under which the bearer token is stored
const TOKEN_ACCOUNT: &str = "token";

/// Side-channel token lifetime in days.
/// Matches the server's long-lived session window.
const TOKEN_TTL_DAYS: i64 = 30;

/// Durable copy of the bearer token, kept independently of the session
/// snapshot as a backstop in case the snapshot is lost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub token: String,
    pub stored_at: DateTime<Utc>,
}

impl TokenRecord {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            stored_at: Utc::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        let expiry = self.stored_at + Duration::days(TOKEN_TTL_DAYS);
        Utc::now() > expiry
    }
}

/// Storage seam for the side-channel token record.
///
/// `remove` must be idempotent: removing an absent record is not an error.
pub trait TokenVault: Send + Sync {
    fn store(&self, record: &TokenRecord) -> Result<()>;
    fn load(&self) -> Result<Option<TokenRecord>>;
    fn remove(&self) -> Result<()>;
}

/// Side-channel vault backed by the OS keychain.
pub struct KeyringVault;

impl KeyringVault {
    fn entry() -> Result<Entry> {
        Entry::new(SERVICE_NAME, TOKEN_ACCOUNT).context("Failed to create keyring entry")
    }
}

impl TokenVault for KeyringVault {
    fn store(&self, record: &TokenRecord) -> Result<()> {
        let contents = serde_json::to_string(record)?;
        Self::entry()?
            .set_password(&contents)
            .context("Failed to store token in keychain")
    }

    fn load(&self) -> Result<Option<TokenRecord>> {
        match Self::entry()?.get_password() {
            Ok(contents) => {
                let record = serde_json::from_str(&contents)
                    .context("Failed to parse keychain token record")?;
                Ok(Some(record))
            }
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(err).context("Failed to read token from keychain"),
        }
    }

    fn remove(&self) -> Result<()> {
        match Self::entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(err).context("Failed to delete token from keychain"),
        }
    }
}

/// In-memory vault for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryVault {
    record: Mutex<Option<TokenRecord>>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the vault with an existing record, bypassing `store`.
    pub fn with_record(record: TokenRecord) -> Self {
        Self {
            record: Mutex::new(Some(record)),
        }
    }
}

impl TokenVault for MemoryVault {
    fn store(&self, record: &TokenRecord) -> Result<()> {
        *self.record.lock().unwrap_or_else(PoisonError::into_inner) = Some(record.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<TokenRecord>> {
        Ok(self
            .record
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn remove(&self) -> Result<()> {
        *self.record.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_record_is_not_expired() {
        let record = TokenRecord::new("tok_1");
        assert!(!record.is_expired());
    }

    #[test]
    fn test_record_expires_after_ttl() {
        let mut record = TokenRecord::new("tok_1");
        record.stored_at = Utc::now() - Duration::days(TOKEN_TTL_DAYS + 1);
        assert!(record.is_expired());
    }

    #[test]
    fn test_record_on_last_day_still_valid() {
        let mut record = TokenRecord::new("tok_1");
        record.stored_at = Utc::now() - Duration::days(TOKEN_TTL_DAYS - 1);
        assert!(!record.is_expired());
    }

    #[test]
    fn test_memory_vault_store_load_remove() {
        let vault = MemoryVault::new();
        assert!(vault.load().unwrap().is_none());

        vault.store(&TokenRecord::new("tok_2")).unwrap();
        assert_eq!(vault.load().unwrap().unwrap().token, "tok_2");

        vault.remove().unwrap();
        assert!(vault.load().unwrap().is_none());
        // Removing again is a no-op, not an error.
        vault.remove().unwrap();
    }
}
