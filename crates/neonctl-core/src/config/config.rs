//! Profile configuration stored as TOML
//!
//! ```toml
//! default_profile = "work"
//!
//! [profiles.work]
//! api_key = "${NEON_WORK_KEY}"
//! org_id = "org-quiet-frog-123"
//!
//! [profiles.staging]
//! api_key = "keyring:neon-staging"
//! api_url = "https://console.stage.neon.tech/api/v2/"
//! timeout_secs = 60
//! ```

#[cfg(target_os = "macos")]
use directories::BaseDirs;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use neon_api::DEFAULT_BASE_URL;

use super::credential::{CredentialStore, KEYRING_PREFIX};
use super::error::{ConfigError, Result};

/// Environment variable overriding a profile's API key
pub const API_KEY_ENV: &str = "NEON_API_KEY";

/// Environment variable overriding a profile's API URL
pub const API_URL_ENV: &str = "NEON_API_URL";

/// Top-level configuration file
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Profile used when none is named explicitly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    /// Profile name to settings
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

/// Connection settings for one Neon account
#[derive(Serialize, Deserialize, Clone, PartialEq)]
pub struct Profile {
    /// API key, or a `keyring:` reference
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Organization applied to project listings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    /// Request timeout override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl std::fmt::Debug for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let api_key = if CredentialStore::is_keyring_reference(&self.api_key) {
            self.api_key.as_str()
        } else {
            "***"
        };
        f.debug_struct("Profile")
            .field("api_key", &api_key)
            .field("api_url", &self.api_url)
            .field("org_id", &self.org_id)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_api_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Profile {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: default_api_url(),
            org_id: None,
            timeout_secs: None,
        }
    }

    /// Resolve the API key and URL through the credential store
    ///
    /// With `use_env` set, `NEON_API_KEY` and `NEON_API_URL` win over the
    /// stored values.
    pub fn resolve_credentials(&self, use_env: bool) -> Result<(String, String)> {
        let store = CredentialStore::new();
        let (key_env, url_env) = if use_env {
            (Some(API_KEY_ENV), Some(API_URL_ENV))
        } else {
            (None, None)
        };

        let api_key = store.get_credential(&self.api_key, key_env).map_err(|e| {
            ConfigError::CredentialError(format!("Failed to resolve API key: {e}"))
        })?;
        let api_url = store.get_credential(&self.api_url, url_env).map_err(|e| {
            ConfigError::CredentialError(format!("Failed to resolve API URL: {e}"))
        })?;

        Ok((api_key, api_url))
    }
}

impl Config {
    /// Profile to use: explicit name, then `default_profile`, then the first
    /// profile by name
    pub fn resolve_profile(&self, explicit_profile: Option<&str>) -> Result<String> {
        if let Some(name) = explicit_profile {
            return Ok(name.to_string());
        }

        if let Some(ref default) = self.default_profile {
            return Ok(default.clone());
        }

        self.list_profiles()
            .first()
            .map(|(name, _)| (*name).clone())
            .ok_or_else(|| ConfigError::NoProfiles {
                suggestion: format!(
                    "Add a [profiles.<name>] section to {} or set {}.",
                    Self::config_path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|_| "the config file".to_string()),
                    API_KEY_ENV
                ),
            })
    }

    /// Look up a profile by name
    pub fn profile(&self, name: &str) -> Result<&Profile> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound {
                name: name.to_string(),
            })
    }

    /// Load configuration from the standard location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from `config_path`; a missing file yields an empty config
    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::LoadError {
            path: config_path.display().to_string(),
            source: e,
        })?;

        let config: Config = toml::from_str(&Self::expand_env_vars(&content))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)
    }

    /// Write to `config_path`, creating parent directories
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::SaveError {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(config_path, content).map_err(|e| ConfigError::SaveError {
            path: config_path.display().to_string(),
            source: e,
        })?;

        Ok(())
    }

    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Remove a profile, clearing `default_profile` if it pointed there
    pub fn remove_profile(&mut self, name: &str) -> Option<Profile> {
        if self.default_profile.as_deref() == Some(name) {
            self.default_profile = None;
        }
        self.profiles.remove(name)
    }

    /// Add a profile whose API key is first written to `store`
    ///
    /// With keyring storage the profile keeps a `keyring:neon-<name>`
    /// reference instead of the key.
    pub fn add_profile_with_credential(
        &mut self,
        name: &str,
        mut profile: Profile,
        store: &CredentialStore,
    ) -> Result<()> {
        if !CredentialStore::is_keyring_reference(&profile.api_key) {
            profile.api_key = store.store_credential(&format!("neon-{name}"), &profile.api_key)?;
        }
        self.set_profile(name.to_string(), profile);
        Ok(())
    }

    /// Remove a profile and the keyring entry its API key points to
    pub fn remove_profile_with_credential(
        &mut self,
        name: &str,
        store: &CredentialStore,
    ) -> Result<Option<Profile>> {
        let removed = self.remove_profile(name);
        if let Some(entry) = removed
            .as_ref()
            .and_then(|profile| profile.api_key.strip_prefix(KEYRING_PREFIX))
        {
            store.delete_credential(entry)?;
        }
        Ok(removed)
    }

    /// All profiles sorted by name
    pub fn list_profiles(&self) -> Vec<(&String, &Profile)> {
        let mut profiles: Vec<_> = self.profiles.iter().collect();
        profiles.sort_by_key(|(name, _)| *name);
        profiles
    }

    /// Path of the configuration file
    ///
    /// On macOS `~/.config/neonctl/config.toml` is preferred when that
    /// directory exists; otherwise the platform location is used
    /// (`~/.config/neonctl/config.toml` on Linux, `%APPDATA%\neon\neonctl\config`
    /// on Windows).
    pub fn config_path() -> Result<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            if let Some(base_dirs) = BaseDirs::new() {
                let linux_style = base_dirs.home_dir().join(".config").join("neonctl");
                if linux_style.exists() {
                    return Ok(linux_style.join("config.toml"));
                }
            }
        }

        let proj_dirs =
            ProjectDirs::from("tech", "neon", "neonctl").ok_or(ConfigError::ConfigDirError)?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Expand `${VAR}` and `${VAR:-default}`; unset variables are left as written
    fn expand_env_vars(content: &str) -> String {
        shellexpand::env_with_context_no_errors(content, |var| std::env::var(var).ok())
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CredentialStorage;
    use pretty_assertions::assert_eq;

    fn profile(key: &str) -> Profile {
        Profile::new(key)
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        let mut work = profile("napi_work");
        work.org_id = Some("org-1".to_string());
        config.set_profile("work".to_string(), work);
        config.default_profile = Some("work".to_string());

        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(config, deserialized);
        assert!(!serialized.contains("timeout_secs"));
    }

    #[test]
    fn test_api_url_defaults_to_production() {
        let config: Config = toml::from_str(
            r#"
[profiles.only]
api_key = "napi_x"
"#,
        )
        .unwrap();

        assert_eq!(config.profiles["only"].api_url, DEFAULT_BASE_URL);
        assert_eq!(config.profiles["only"].timeout_secs, None);
    }

    #[test]
    fn test_profile_debug_hides_plain_key() {
        let plain = format!("{:?}", profile("napi_secret"));
        assert!(!plain.contains("napi_secret"));

        let reference = format!("{:?}", profile("keyring:neon-work"));
        assert!(reference.contains("keyring:neon-work"));
    }

    #[test]
    #[serial_test::serial]
    fn test_env_var_expansion() {
        unsafe {
            std::env::set_var("NEONCTL_TEST_KEY", "napi_expanded");
        }

        let content = r#"
[profiles.test]
api_key = "${NEONCTL_TEST_KEY}"
"#;
        let expanded = Config::expand_env_vars(content);
        assert!(expanded.contains("napi_expanded"));

        unsafe {
            std::env::remove_var("NEONCTL_TEST_KEY");
        }
    }

    #[test]
    #[serial_test::serial]
    fn test_env_var_expansion_with_defaults() {
        unsafe {
            std::env::remove_var("NEONCTL_UNSET_URL");
        }

        let content = r#"api_url = "${NEONCTL_UNSET_URL:-https://console.neon.tech/api/v2/}""#;
        let expanded = Config::expand_env_vars(content);
        assert_eq!(expanded, r#"api_url = "https://console.neon.tech/api/v2/""#);

        let untouched = Config::expand_env_vars(r#"api_key = "${NEONCTL_UNSET_URL}""#);
        assert_eq!(untouched, r#"api_key = "${NEONCTL_UNSET_URL}""#);
    }

    #[test]
    fn test_profile_resolution_order() {
        let mut config = Config::default();
        config.set_profile("zeta".to_string(), profile("z"));
        config.set_profile("alpha".to_string(), profile("a"));

        // First by name
        assert_eq!(config.resolve_profile(None).unwrap(), "alpha");

        config.default_profile = Some("zeta".to_string());
        assert_eq!(config.resolve_profile(None).unwrap(), "zeta");

        // Explicit always wins, even if unknown
        assert_eq!(config.resolve_profile(Some("other")).unwrap(), "other");
        assert!(matches!(
            config.profile("other"),
            Err(ConfigError::ProfileNotFound { .. })
        ));
    }

    #[test]
    fn test_no_profiles_error() {
        let err = Config::default().resolve_profile(None).unwrap_err();
        assert!(matches!(err, ConfigError::NoProfiles { .. }));
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[test]
    fn test_remove_default_profile_clears_default() {
        let mut config = Config::default();
        config.set_profile("work".to_string(), profile("k"));
        config.default_profile = Some("work".to_string());

        assert!(config.remove_profile("work").is_some());
        assert!(config.default_profile.is_none());
        assert!(config.remove_profile("work").is_none());
    }

    #[test]
    #[serial_test::serial]
    fn test_resolve_credentials_env_override() {
        unsafe {
            std::env::set_var(API_KEY_ENV, "napi_from_env");
            std::env::remove_var(API_URL_ENV);
        }

        let stored = profile("napi_stored");
        assert_eq!(
            stored.resolve_credentials(true).unwrap(),
            ("napi_from_env".to_string(), DEFAULT_BASE_URL.to_string())
        );
        assert_eq!(stored.resolve_credentials(false).unwrap().0, "napi_stored");

        unsafe {
            std::env::remove_var(API_KEY_ENV);
        }
    }

    #[test]
    fn test_profile_credentials_go_through_store() {
        let store = CredentialStore::with_storage(CredentialStorage::Plaintext);
        let mut config = Config::default();

        config.add_profile_with_credential("work", Profile::new("napi_work"), &store).unwrap();
        config
            .add_profile_with_credential("staging", Profile::new("keyring:neon-staging"), &store)
            .unwrap();
        config.default_profile = Some("staging".to_string());

        assert_eq!(config.profiles["work"].api_key, "napi_work");
        assert_eq!(config.profiles["staging"].api_key, "keyring:neon-staging");

        let removed = config.remove_profile_with_credential("staging", &store).unwrap();
        assert_eq!(removed.map(|p| p.api_key).as_deref(), Some("keyring:neon-staging"));
        assert!(config.default_profile.is_none());
        assert!(config.remove_profile_with_credential("staging", &store).unwrap().is_none());
    }
}
