//! API key storage: plaintext, OS keyring, or environment override
//!
//! A profile's `api_key` is either the key itself or a reference of the
//! form `keyring:<entry>`. References are only resolvable with the
//! `secure-storage` feature.

use std::env;

use tracing::debug;

use super::error::{ConfigError, Result};

/// Prefix marking a value stored in the OS keyring
pub const KEYRING_PREFIX: &str = "keyring:";

/// Keyring service under which entries are stored
#[cfg(feature = "secure-storage")]
pub const SERVICE_NAME: &str = "neonctl";

/// Backend new credentials are written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStorage {
    #[cfg(feature = "secure-storage")]
    Keyring,
    Plaintext,
}

/// Reads and writes profile credentials
#[derive(Debug, Clone)]
pub struct CredentialStore {
    storage: CredentialStorage,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore {
    /// Keyring when the feature is on and the platform has one, plaintext otherwise
    pub fn new() -> Self {
        #[cfg(feature = "secure-storage")]
        {
            if keyring::Entry::new(SERVICE_NAME, "__probe__").is_ok() {
                return Self::with_storage(CredentialStorage::Keyring);
            }
        }
        Self::with_storage(CredentialStorage::Plaintext)
    }

    pub fn with_storage(storage: CredentialStorage) -> Self {
        Self { storage }
    }

    /// Persist `value` and return what should be written to the config file
    pub fn store_credential(&self, key: &str, value: &str) -> Result<String> {
        match self.storage {
            #[cfg(feature = "secure-storage")]
            CredentialStorage::Keyring => {
                keyring_entry(key)?.set_password(value).map_err(|e| {
                    ConfigError::KeyringError(format!("Failed to store '{key}' in keyring: {e}"))
                })?;
                Ok(format!("{KEYRING_PREFIX}{key}"))
            }
            CredentialStorage::Plaintext => {
                debug!("Storing '{}' as plaintext", key);
                Ok(value.to_string())
            }
        }
    }

    /// Resolve a stored value
    ///
    /// Order: the environment variable `env_var` (when given and set), then
    /// the keyring for `keyring:` references, then the value itself.
    pub fn get_credential(&self, value: &str, env_var: Option<&str>) -> Result<String> {
        if let Some(var) = env_var
            && let Ok(from_env) = env::var(var)
        {
            debug!("Using {} from the environment", var);
            return Ok(from_env);
        }

        match value.strip_prefix(KEYRING_PREFIX) {
            Some(entry) => Self::read_keyring(entry),
            None => Ok(value.to_string()),
        }
    }

    #[cfg(feature = "secure-storage")]
    fn read_keyring(entry: &str) -> Result<String> {
        keyring_entry(entry)?.get_password().map_err(|e| {
            ConfigError::KeyringError(format!("Failed to read '{entry}' from keyring: {e}"))
        })
    }

    #[cfg(not(feature = "secure-storage"))]
    fn read_keyring(entry: &str) -> Result<String> {
        Err(ConfigError::CredentialError(format!(
            "'{entry}' is a keyring reference but the secure-storage feature is not enabled"
        )))
    }

    /// Remove a keyring entry; a missing entry is not an error
    pub fn delete_credential(&self, key: &str) -> Result<()> {
        match self.storage {
            #[cfg(feature = "secure-storage")]
            CredentialStorage::Keyring => match keyring_entry(key)?.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
                Err(e) => Err(ConfigError::KeyringError(format!(
                    "Failed to delete '{key}' from keyring: {e}"
                ))),
            },
            CredentialStorage::Plaintext => {
                debug!("No keyring backend, nothing to delete for '{}'", key);
                Ok(())
            }
        }
    }

    pub fn is_keyring_reference(value: &str) -> bool {
        value.starts_with(KEYRING_PREFIX)
    }

    pub fn storage_backend(&self) -> &'static str {
        match self.storage {
            #[cfg(feature = "secure-storage")]
            CredentialStorage::Keyring => "keyring",
            CredentialStorage::Plaintext => "plaintext",
        }
    }
}

#[cfg(feature = "secure-storage")]
fn keyring_entry(key: &str) -> Result<keyring::Entry> {
    keyring::Entry::new(SERVICE_NAME, key).map_err(|e| ConfigError::KeyringError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plaintext_value_returned_as_is() {
        let store = CredentialStore::with_storage(CredentialStorage::Plaintext);
        assert_eq!(store.get_credential("napi_plain", None).unwrap(), "napi_plain");
        assert_eq!(store.store_credential("default", "napi_plain").unwrap(), "napi_plain");
        assert_eq!(store.storage_backend(), "plaintext");
    }

    #[test]
    #[serial_test::serial]
    fn test_env_var_override() {
        unsafe {
            env::set_var("NEONCTL_TEST_CREDENTIAL", "from-env");
        }

        let store = CredentialStore::new();
        let result = store
            .get_credential("from-config", Some("NEONCTL_TEST_CREDENTIAL"))
            .unwrap();
        assert_eq!(result, "from-env");

        unsafe {
            env::remove_var("NEONCTL_TEST_CREDENTIAL");
        }
    }

    #[test]
    fn test_keyring_reference_detection() {
        assert!(CredentialStore::is_keyring_reference("keyring:neon-default"));
        assert!(!CredentialStore::is_keyring_reference("napi_abc"));
        assert!(!CredentialStore::is_keyring_reference(""));
    }

    #[cfg(not(feature = "secure-storage"))]
    #[test]
    fn test_keyring_reference_without_feature_fails() {
        let store = CredentialStore::new();
        let err = store.get_credential("keyring:neon-default", None).unwrap_err();
        assert!(err.to_string().contains("secure-storage"));
    }

    #[cfg(feature = "secure-storage")]
    #[test]
    #[ignore = "Requires keyring service to be available"]
    fn test_keyring_round_trip() {
        let store = CredentialStore::with_storage(CredentialStorage::Keyring);
        let reference = store.store_credential("neonctl-test", "napi_secret").unwrap();
        assert_eq!(reference, "keyring:neonctl-test");
        assert_eq!(store.get_credential(&reference, None).unwrap(), "napi_secret");
        store.delete_credential("neonctl-test").unwrap();
    }
}
