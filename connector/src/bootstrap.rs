//! Process bootstrap: environment lookup and logging setup.
//!
//! The core client only ever sees an explicit `ClientConfig`. This module is
//! where that config is assembled from explicit values, falling back to the
//! `TRANSSMART_*` environment variables, once per process.

use std::env;
use std::path::PathBuf;

use tracing::debug;
use tracing_subscriber::EnvFilter;
use transsmart_core::{ApiError, ApiResult, ClientConfig, Credentials};

pub const ENV_ACCOUNT: &str = "TRANSSMART_ACCOUNT";
pub const ENV_USERNAME: &str = "TRANSSMART_USERNAME";
pub const ENV_PASSWORD: &str = "TRANSSMART_PASSWORD";
pub const ENV_BASE_URL: &str = "TRANSSMART_BASE_URL";
pub const ENV_API_VERSION: &str = "TRANSSMART_API_VERSION";

/// Explicit values that take precedence over the environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub account: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub base_url: Option<String>,
    pub version: Option<String>,
}

/// Load a `.env` file from the current directory or its parents, if any.
pub fn load_dotenv() -> Option<PathBuf> {
    let path = dotenvy::dotenv().ok();
    if let Some(path) = &path {
        debug!(path = %path.display(), "loaded .env");
    }
    path
}

/// Build a config purely from the environment.
pub fn config_from_env() -> ApiResult<ClientConfig> {
    config_with_overrides(Overrides::default())
}

/// Build a config from `overrides`, reading unset values from the environment.
pub fn config_with_overrides(overrides: Overrides) -> ApiResult<ClientConfig> {
    resolve(overrides, |name| env::var(name).ok())
}

fn resolve(
    overrides: Overrides,
    lookup: impl Fn(&str) -> Option<String>,
) -> ApiResult<ClientConfig> {
    let required = |value: Option<String>, name: &str| {
        value
            .or_else(|| lookup(name))
            .ok_or_else(|| ApiError::config(format!("{name} is not set")))
    };
    let credentials = Credentials {
        account: required(overrides.account, ENV_ACCOUNT)?,
        username: required(overrides.username, ENV_USERNAME)?,
        password: required(overrides.password, ENV_PASSWORD)?,
    };

    let mut config = ClientConfig::new(credentials);
    if let Some(base_url) = overrides.base_url.or_else(|| lookup(ENV_BASE_URL)) {
        config = config.with_base_url(base_url);
    }
    if let Some(version) = overrides.version.or_else(|| lookup(ENV_API_VERSION)) {
        config = config.with_version(version);
    }
    config.validate()?;
    Ok(config)
}

/// Install a stderr `tracing` subscriber honouring `RUST_LOG` (default `warn`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed by an embedding application.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
