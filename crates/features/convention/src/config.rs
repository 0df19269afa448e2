//! # Convention Configuration
//!
//! [`ConventionConfig`] is built once, validated, and then frozen: it is an `Arc`-backed
//! value with read-only accessors, cheap to clone into every engine run. Two ways in:
//!
//! * [`ConventionConfig::builder`] for programmatic setup (defaults match the settings
//!   defaults; only the module filter usually needs to be set).
//! * [`ConventionConfig::from_settings`] for the `[auto_api]` settings section.

use crate::error::{ConventionError, ConventionErrorExt};
use autoapi_domain::constants::{
    DEFAULT_ACTION_POSTFIXES, DEFAULT_API_PREFIX, DEFAULT_BODY_BINDING_IGNORED_TYPES,
    DEFAULT_HTTP_VERB, DEFAULT_HTTP_VERBS, DEFAULT_SERVICE_POSTFIXES,
};
use autoapi_domain::http::HttpMethod;
use autoapi_domain::settings::ConventionSettings;
use fxhash::FxHashMap;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug)]
struct ConventionConfigInner {
    default_http_verb: HttpMethod,
    api_prefix: Option<String>,
    default_area: Option<String>,
    module_filter_prefix: Option<String>,
    service_postfixes: Vec<String>,
    action_postfixes: Vec<String>,
    http_verbs: FxHashMap<String, HttpMethod>,
    body_binding_ignored_types: Vec<String>,
}

/// Immutable, validated engine configuration.
#[derive(Debug, Clone)]
pub struct ConventionConfig {
    inner: Arc<ConventionConfigInner>,
}

impl ConventionConfig {
    #[must_use = "The builder must be configured before it can be used to build the config."]
    pub fn builder() -> ConventionConfigBuilder {
        ConventionConfigBuilder::default()
    }

    /// Builds the configuration from the `[auto_api]` settings section.
    ///
    /// With `enable = false` the section is ignored and built-in defaults apply.
    ///
    /// # Errors
    /// * [`ConventionError::InvalidConfiguration`] if the section is enabled but has an
    ///   empty `default_http_verb` or no `remove_service_postfixes`.
    /// * [`ConventionError::HttpMethod`] if a configured verb is unknown.
    pub fn from_settings(settings: &ConventionSettings) -> Result<Self, ConventionError> {
        if !settings.enable {
            debug!("auto_api settings disabled, using built-in conventions");
            return Self::builder().build();
        }

        let Some(service_postfixes) = &settings.remove_service_postfixes else {
            return Err(ConventionError::InvalidConfiguration {
                message: "remove_service_postfixes must be set".into(),
                context: Some("auto_api".into()),
            });
        };

        let mut builder = Self::builder()
            .default_http_verb(settings.default_http_verb.clone())
            .api_prefix(settings.default_api_prefix.clone().unwrap_or_default())
            .default_area(settings.default_area_name.clone().unwrap_or_default())
            .module_filter_prefix(settings.module_filter_prefix.clone().unwrap_or_default())
            .service_postfixes(service_postfixes.iter().cloned())
            .action_postfixes(settings.remove_action_postfixes.iter().cloned())
            .body_binding_ignored_types(settings.body_binding_ignored_types.iter().cloned());
        for (word, verb) in &settings.http_verbs {
            builder = builder.http_verb(word.clone(), verb.clone());
        }

        builder.build()
    }

    #[must_use]
    pub fn default_http_verb(&self) -> HttpMethod {
        self.inner.default_http_verb
    }

    #[must_use]
    pub fn api_prefix(&self) -> Option<&str> {
        self.inner.api_prefix.as_deref()
    }

    #[must_use]
    pub fn default_area(&self) -> Option<&str> {
        self.inner.default_area.as_deref()
    }

    #[must_use]
    pub fn module_filter_prefix(&self) -> Option<&str> {
        self.inner.module_filter_prefix.as_deref()
    }

    #[must_use]
    pub fn service_postfixes(&self) -> &[String] {
        &self.inner.service_postfixes
    }

    #[must_use]
    pub fn action_postfixes(&self) -> &[String] {
        &self.inner.action_postfixes
    }

    #[must_use]
    pub fn body_binding_ignored_types(&self) -> &[String] {
        &self.inner.body_binding_ignored_types
    }

    /// The verb table sorted by word.
    #[must_use]
    pub fn http_verbs(&self) -> Vec<(&str, HttpMethod)> {
        let mut verbs: Vec<_> =
            self.inner.http_verbs.iter().map(|(word, verb)| (word.as_str(), *verb)).collect();
        verbs.sort_unstable();
        verbs
    }

    /// Looks up a leading word in the verb table, ignoring case.
    #[must_use]
    pub fn verb_for(&self, word: &str) -> Option<HttpMethod> {
        self.inner.http_verbs.get(&word.to_lowercase()).copied()
    }

    /// The verb for a leading word, falling back to the default verb.
    #[must_use]
    pub fn resolve_verb(&self, word: &str) -> HttpMethod {
        self.verb_for(word).unwrap_or(self.inner.default_http_verb)
    }
}

/// Collects raw values; nothing is validated until [`ConventionConfigBuilder::build`].
#[derive(Debug, Clone)]
pub struct ConventionConfigBuilder {
    default_http_verb: String,
    api_prefix: String,
    default_area: String,
    module_filter_prefix: String,
    service_postfixes: Vec<String>,
    action_postfixes: Vec<String>,
    http_verbs: Vec<(String, String)>,
    body_binding_ignored_types: Vec<String>,
}

impl Default for ConventionConfigBuilder {
    fn default() -> Self {
        Self {
            default_http_verb: DEFAULT_HTTP_VERB.to_owned(),
            api_prefix: DEFAULT_API_PREFIX.to_owned(),
            default_area: String::new(),
            module_filter_prefix: String::new(),
            service_postfixes: owned(DEFAULT_SERVICE_POSTFIXES),
            action_postfixes: owned(DEFAULT_ACTION_POSTFIXES),
            http_verbs: DEFAULT_HTTP_VERBS
                .iter()
                .map(|(word, verb)| ((*word).to_owned(), (*verb).to_owned()))
                .collect(),
            body_binding_ignored_types: owned(DEFAULT_BODY_BINDING_IGNORED_TYPES),
        }
    }
}

impl ConventionConfigBuilder {
    /// Verb used when an action name starts with no known word.
    #[must_use]
    pub fn default_http_verb(mut self, verb: impl Into<String>) -> Self {
        self.default_http_verb = verb.into();
        self
    }

    /// First route segment for every generated route. Empty disables the prefix.
    #[must_use]
    pub fn api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    /// Version/area segment used when a service does not pin its own. Empty disables it.
    #[must_use]
    pub fn default_area(mut self, area: impl Into<String>) -> Self {
        self.default_area = area.into();
        self
    }

    /// Only modules whose name starts with this prefix are scanned. Empty scans all.
    #[must_use]
    pub fn module_filter_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.module_filter_prefix = prefix.into();
        self
    }

    /// Replaces the ordered list of postfixes stripped from service type names.
    #[must_use]
    pub fn service_postfixes(mut self, postfixes: impl IntoIterator<Item = String>) -> Self {
        self.service_postfixes = postfixes.into_iter().collect();
        self
    }

    /// Replaces the ordered list of postfixes stripped from method names.
    #[must_use]
    pub fn action_postfixes(mut self, postfixes: impl IntoIterator<Item = String>) -> Self {
        self.action_postfixes = postfixes.into_iter().collect();
        self
    }

    /// Adds or overrides one verb-table entry.
    #[must_use]
    pub fn http_verb(mut self, word: impl Into<String>, verb: impl Into<String>) -> Self {
        self.http_verbs.push((word.into(), verb.into()));
        self
    }

    /// Drops every verb-table entry, including the defaults.
    #[must_use]
    pub fn clear_http_verbs(mut self) -> Self {
        self.http_verbs.clear();
        self
    }

    /// Replaces the set of types never bound from the request body.
    #[must_use]
    pub fn body_binding_ignored_types(mut self, types: impl IntoIterator<Item = String>) -> Self {
        self.body_binding_ignored_types = types.into_iter().collect();
        self
    }

    /// Validates the collected values and freezes them.
    ///
    /// # Errors
    /// * [`ConventionError::InvalidConfiguration`] for an empty default verb, an empty
    ///   postfix, an empty verb-table word or an empty ignored type name.
    /// * [`ConventionError::HttpMethod`] for a verb that is not an HTTP method.
    pub fn build(self) -> Result<ConventionConfig, ConventionError> {
        let default_http_verb = parse_verb(&self.default_http_verb, "default_http_verb")?;

        ensure_no_blank(&self.service_postfixes, "remove_service_postfixes")?;
        ensure_no_blank(&self.action_postfixes, "remove_action_postfixes")?;
        ensure_no_blank(&self.body_binding_ignored_types, "body_binding_ignored_types")?;

        let mut http_verbs = FxHashMap::default();
        for (word, verb) in &self.http_verbs {
            let key = word.trim().to_lowercase();
            if key.is_empty() {
                return Err(ConventionError::invalid_configuration(
                    "verb table words must not be empty",
                ));
            }
            http_verbs.insert(key, parse_verb(verb, "http_verbs")?);
        }

        let config = ConventionConfigInner {
            default_http_verb,
            api_prefix: non_blank(self.api_prefix),
            default_area: non_blank(self.default_area),
            module_filter_prefix: non_blank(self.module_filter_prefix),
            service_postfixes: self.service_postfixes,
            action_postfixes: self.action_postfixes,
            http_verbs,
            body_binding_ignored_types: self.body_binding_ignored_types,
        };
        debug!(
            default_verb = %config.default_http_verb,
            prefix = config.api_prefix.as_deref().unwrap_or(""),
            area = config.default_area.as_deref().unwrap_or(""),
            verbs = config.http_verbs.len(),
            "Convention config frozen"
        );

        Ok(ConventionConfig { inner: Arc::new(config) })
    }
}

fn parse_verb(raw: &str, field: &'static str) -> Result<HttpMethod, ConventionError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ConventionError::invalid_configuration(format!("{field} must not be empty")));
    }
    HttpMethod::from_str(raw).context(format!("{field} = '{raw}'"))
}

fn ensure_no_blank(values: &[String], field: &'static str) -> Result<(), ConventionError> {
    if values.iter().any(|v| v.trim().is_empty()) {
        return Err(ConventionError::invalid_configuration(format!(
            "{field} must not contain empty entries"
        )));
    }
    Ok(())
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}
