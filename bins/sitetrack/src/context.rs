//! Per-invocation settings shared by the commands
//!
//! Backend settings resolve in order: `--api-url`, environment variables,
//! config file, built-in defaults.

use anyhow::{Context, Result};
use clap::ValueEnum;
use sitetrack_api_client::{ClientConfig, Credentials, Environment, SiteTrackClient};
use sitetrack_core::config::{ApiConfig, Config};
use sitetrack_core::credentials::CredentialStore;
use std::path::Path;
use std::time::Duration;

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable
    Text,
    /// JSON document
    Json,
    /// GeoJSON feature collection (site listings)
    #[value(name = "geojson")]
    GeoJson,
}

/// Loaded config plus everything derived from it
pub struct AppContext {
    pub config: Config,
    pub client_config: ClientConfig,
    pub format: OutputFormat,
}

impl AppContext {
    /// Load the config file and resolve backend settings
    pub fn load(config_path: Option<&Path>, api_url: Option<&str>, format: OutputFormat) -> Result<Self> {
        let config = Config::load(config_path)?;
        let client_config = resolve_client_config(
            &config.schema.api,
            |key| std::env::var(key).ok(),
            api_url,
        )?;

        Ok(Self {
            config,
            client_config,
            format,
        })
    }

    /// HTTP client for the resolved backend
    pub fn client(&self) -> Result<SiteTrackClient> {
        Ok(SiteTrackClient::with_config(self.client_config.clone())?)
    }

    /// Token store at the configured or default location
    pub fn credential_store(&self) -> Result<CredentialStore> {
        match &self.config.schema.session.credentials_path {
            Some(path) => Ok(CredentialStore::at(path)),
            None => Ok(CredentialStore::default_location()?),
        }
    }

    /// Stored credentials, if logged in
    pub fn credentials(&self) -> Result<Option<Credentials>> {
        Ok(self.credential_store()?.load()?.map(Credentials::bearer))
    }

    /// Stored credentials, failing with a login hint when absent
    pub fn require_credentials(&self) -> Result<Credentials> {
        Ok(Credentials::bearer(self.credential_store()?.require()?))
    }

    /// Explicit project, else the configured default
    pub fn project(&self, explicit: Option<i64>) -> Option<i64> {
        explicit.or(self.config.schema.session.default_project)
    }
}

/// Merge file settings, environment variables and the command-line override
pub fn resolve_client_config(
    api: &ApiConfig,
    env: impl Fn(&str) -> Option<String>,
    api_url: Option<&str>,
) -> Result<ClientConfig> {
    let environment = env("SITETRACK_ENV")
        .or_else(|| api.environment.clone())
        .map_or(Environment::Production, |name| Environment::parse(&name));

    let base_url = api_url
        .map(String::from)
        .or_else(|| env("SITETRACK_API_URL"))
        .or_else(|| api.base_url.clone())
        .unwrap_or_else(|| environment.default_base_url().to_string());

    let timeout_secs = match env("SITETRACK_TIMEOUT_SECS") {
        Some(raw) => Some(
            raw.parse::<u64>()
                .with_context(|| format!("SITETRACK_TIMEOUT_SECS is not a number: {raw}"))?,
        ),
        None => api.timeout_secs,
    };

    let mut config = ClientConfig {
        base_url,
        timeout: None,
        environment,
    };
    if let Some(secs) = timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    config.validate()?;
    Ok(config)
}
