use crate::error::{KernelError, KernelErrorExt};
use autoapi_domain::settings::Settings;
use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::info;

/// Prefix of environment overrides, e.g. `AUTOAPI__AUTO_API__DEFAULT_HTTP_VERB=GET`.
pub const ENV_PREFIX: &str = "AUTOAPI";

/// File stem looked up when no settings path is given.
pub const DEFAULT_SETTINGS_FILE: &str = "autoapi";

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// This function implements a layered configuration strategy:
/// 1. **Base File**: Loads settings from `path`; the format follows the file extension
///    (`.toml`, `.json`, `.yaml`). An explicit path must exist. Without a path the
///    `autoapi` file in the working directory is used when present.
/// 2. **Environment Overrides**: Overlays values from environment variables prefixed with `AUTOAPI__`.
///    Nested structures are accessed using double underscores (e.g., `AUTOAPI__LOGGING__LEVEL` maps to `logging.level`).
///
/// # Errors
/// Returns [`KernelError::Config`] if:
/// * The specified configuration file cannot be found or parsed.
/// * The merged values do not match the structure of type `T`.
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, KernelError>
where
    T: DeserializeOwned,
{
    load_layered(path, None)
}

/// [`load_config`] for the application [`Settings`].
///
/// # Errors
/// See [`load_config`].
pub fn load_settings(path: Option<impl AsRef<Path>>) -> Result<Settings, KernelError> {
    load_config::<Settings>(path)
}

/// `env` replaces the process environment when set.
fn load_layered<T>(
    path: Option<impl AsRef<Path>>,
    env: Option<config::Map<String, String>>,
) -> Result<T, KernelError>
where
    T: DeserializeOwned,
{
    let file = match &path {
        Some(p) => {
            info!("Loading config from {}", p.as_ref().display());
            File::from(p.as_ref()).required(true)
        }
        None => {
            info!("Loading optional config '{DEFAULT_SETTINGS_FILE}'");
            File::with_name(DEFAULT_SETTINGS_FILE).required(false)
        }
    };

    let config = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .source(env),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
