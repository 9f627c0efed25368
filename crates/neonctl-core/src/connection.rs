//! Building authenticated [`NeonClient`]s from profiles

use std::path::PathBuf;
use std::time::Duration;

use neon_api::params::ListProjectsParams;
use neon_api::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, NeonClient};
use tracing::{debug, info, trace};

use crate::config::{API_KEY_ENV, API_URL_ENV, Config, ConfigError, CredentialStore, Profile};
use crate::error::Result;

/// User agent for clients built here
pub const NEONCTL_USER_AGENT: &str = concat!("neonctl/", env!("CARGO_PKG_VERSION"));

/// Creates clients from the loaded configuration
#[derive(Debug, Clone)]
pub struct ConnectionManager {
    pub config: Config,
    pub config_path: Option<PathBuf>,
}

impl ConnectionManager {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            config_path: None,
        }
    }

    /// Manager bound to an explicit config file
    ///
    /// With an explicit path, `NEON_API_KEY` and `NEON_API_URL` are ignored.
    pub fn with_config_path(config: Config, config_path: Option<PathBuf>) -> Self {
        Self {
            config,
            config_path,
        }
    }

    /// Write the configuration back where it came from
    pub fn save_config(&self) -> Result<()> {
        match self.config_path {
            Some(ref path) => self.config.save_to_path(path)?,
            None => self.config.save()?,
        }
        Ok(())
    }

    fn use_env_vars(&self) -> bool {
        self.config_path.is_none()
    }

    /// `NEON_API_KEY` when it stands in for a profile entirely
    ///
    /// That is the case only when no profile was named and none are
    /// configured.
    fn env_only_api_key(&self, profile_name: Option<&str>) -> Option<String> {
        if !self.use_env_vars() || profile_name.is_some() || !self.config.profiles.is_empty() {
            return None;
        }
        std::env::var(API_KEY_ENV).ok()
    }

    /// Client for `profile_name` (or the resolved default profile)
    ///
    /// A complete set of environment credentials needs no profile at all;
    /// otherwise environment values override the profile's.
    pub fn create_client(&self, profile_name: Option<&str>) -> Result<NeonClient> {
        debug!("Creating Neon client");
        trace!("Profile name: {:?}", profile_name);

        let use_env_vars = self.use_env_vars();
        debug!(
            "Config path: {:?}, use_env_vars: {}",
            self.config_path, use_env_vars
        );
        if !use_env_vars {
            info!("Config file given explicitly, ignoring environment variables");
        }

        let (api_key, api_url, timeout) = match self.env_only_api_key(profile_name) {
            Some(key) => {
                info!("Using Neon credentials from environment variables");
                let url = std::env::var(API_URL_ENV)
                    .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
                (key, url, DEFAULT_TIMEOUT)
            }
            None => {
                let resolved = self.config.resolve_profile(profile_name)?;
                info!("Using Neon profile: {}", resolved);
                let profile = self.config.profile(&resolved)?;
                let (key, url) = profile.resolve_credentials(use_env_vars)?;
                let timeout = profile
                    .timeout_secs
                    .map(Duration::from_secs)
                    .unwrap_or(DEFAULT_TIMEOUT);
                (key, url, timeout)
            }
        };

        let api_url = validate_url(&api_url)?;
        info!("Connecting to Neon API: {}", api_url);
        trace!("API key present ({} chars)", api_key.len());

        let config = ClientConfig::new(api_key)
            .with_base_url(api_url)
            .with_user_agent(NEONCTL_USER_AGENT);
        let client = NeonClient::with_config(config, timeout)?;

        debug!("Neon client created successfully");
        Ok(client)
    }

    /// Project listing scoped to the profile's organization, if it has one
    ///
    /// Environment-only credentials carry no organization.
    pub fn project_list_params(&self, profile_name: Option<&str>) -> Result<ListProjectsParams> {
        let params = ListProjectsParams::new();
        if self.env_only_api_key(profile_name).is_some() {
            return Ok(params);
        }

        let resolved = self.config.resolve_profile(profile_name)?;
        let profile = self.config.profile(&resolved)?;
        Ok(match profile.org_id {
            Some(ref org_id) => params.with_org_id(org_id.clone()),
            None => params,
        })
    }

    /// Store `profile` under `name`, moving its API key into `store`, and save
    pub fn save_profile(
        &mut self,
        name: &str,
        profile: Profile,
        store: &CredentialStore,
    ) -> Result<()> {
        self.config.add_profile_with_credential(name, profile, store)?;
        info!("Saved Neon profile: {} ({})", name, store.storage_backend());
        self.save_config()
    }

    /// Remove the profile `name` and its stored key, then save
    pub fn delete_profile(&mut self, name: &str, store: &CredentialStore) -> Result<()> {
        if self.config.remove_profile_with_credential(name, store)?.is_none() {
            return Err(ConfigError::ProfileNotFound {
                name: name.to_string(),
            }
            .into());
        }
        info!("Removed Neon profile: {}", name);
        self.save_config()
    }
}

fn validate_url(raw: &str) -> std::result::Result<String, ConfigError> {
    url::Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    Ok(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://console.neon.tech/api/v2/").is_ok());
        let err = validate_url("console.neon.tech").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn test_project_list_params_uses_org() {
        let mut config = Config::default();
        let mut profile = Profile::new("napi_x");
        profile.org_id = Some("org-1".to_string());
        config.set_profile("work".to_string(), profile);
        config.set_profile("personal".to_string(), Profile::new("napi_y"));

        let manager = ConnectionManager::new(config);

        let work = manager.project_list_params(Some("work")).unwrap();
        assert_eq!(work.to_query().build(), "?org_id=org-1");

        let personal = manager.project_list_params(Some("personal")).unwrap();
        assert_eq!(personal.to_query().build(), "");
    }

    #[test]
    fn test_unknown_profile_is_config_error() {
        let manager = ConnectionManager::with_config_path(
            Config::default(),
            Some(PathBuf::from("/tmp/neonctl-test/config.toml")),
        );
        let err = manager.create_client(Some("missing")).unwrap_err();
        assert!(err.is_config());
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_trace_logs_never_include_key_material() {
        let mut config = Config::default();
        config.set_profile("work".to_string(), Profile::new("napi_supersecret"));
        let manager = ConnectionManager::with_config_path(
            config,
            Some(PathBuf::from("/tmp/neonctl-test/config.toml")),
        );

        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(logs.clone())
            .finish();
        let result = tracing::subscriber::with_default(subscriber, || {
            manager.create_client(Some("work"))
        });
        assert!(result.is_ok());

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("API key present (16 chars)"), "{output}");
        assert!(!output.contains("napi_sup"), "{output}");
    }
}
