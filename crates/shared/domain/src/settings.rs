use crate::constants::{
    DEFAULT_ACTION_POSTFIXES, DEFAULT_API_PREFIX, DEFAULT_BODY_BINDING_IGNORED_TYPES,
    DEFAULT_HTTP_VERB, DEFAULT_SERVICE_POSTFIXES,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::ops::Deref;
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level settings file.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SettingsInner {
    pub auto_api: ConventionSettings,
    pub logging: LoggingSettings,
}

/// Thin Arc-wrapped settings for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(flatten, default)]
    inner: Arc<SettingsInner>,
}

impl Deref for Settings {
    type Target = SettingsInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<SettingsInner> for Settings {
    fn from(inner: SettingsInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

/// Raw convention settings as written in the `[auto_api]` section.
///
/// These values are unchecked. The engine validates them once when it builds its
/// immutable configuration; with `enable = false` every value here is ignored and the
/// built-in defaults apply.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConventionSettings {
    pub enable: bool,
    pub default_area_name: Option<String>,
    pub default_http_verb: String,
    pub default_api_prefix: Option<String>,
    pub module_filter_prefix: Option<String>,
    pub remove_service_postfixes: Option<Vec<String>>,
    pub remove_action_postfixes: Vec<String>,
    pub body_binding_ignored_types: Vec<String>,
    /// Extra leading-word to verb entries merged over the default table.
    pub http_verbs: BTreeMap<String, String>,
}

/// Logging knobs for the binaries.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub env_filter: Option<String>,
    pub json: bool,
    pub path: Option<PathBuf>,
}

// --- Default ---

impl Default for ConventionSettings {
    fn default() -> Self {
        Self {
            enable: false,
            default_area_name: None,
            default_http_verb: DEFAULT_HTTP_VERB.to_owned(),
            default_api_prefix: Some(DEFAULT_API_PREFIX.to_owned()),
            module_filter_prefix: None,
            remove_service_postfixes: Some(to_owned_vec(DEFAULT_SERVICE_POSTFIXES)),
            remove_action_postfixes: to_owned_vec(DEFAULT_ACTION_POSTFIXES),
            body_binding_ignored_types: to_owned_vec(DEFAULT_BODY_BINDING_IGNORED_TYPES),
            http_verbs: BTreeMap::new(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self { level: "info".to_owned(), env_filter: None, json: false, path: None }
    }
}

fn to_owned_vec(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}
