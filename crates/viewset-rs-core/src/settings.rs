//! Settings for viewset-rs.
//!
//! This module provides the [`Settings`] struct and [`LazySettings`], a
//! globally-accessible, lazily-initialized settings instance. Viewsets read the
//! URL-name separator from here when they are constructed.

use std::collections::HashMap;
use std::sync::OnceLock;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// The separator placed between a viewset's URL-name prefix and a view name.
pub const DEFAULT_URLNAME_SEPARATOR: &str = "-";

/// The complete set of viewset settings.
///
/// # Examples
///
/// ```
/// use viewset_rs_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.urlname_separator, "-");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Whether debug mode is enabled. Selects the pretty log format.
    pub debug: bool,
    /// The log level filter (e.g. "info", "debug", "viewset_rs_views=trace").
    pub log_level: String,
    /// Default separator between a URL-name prefix and a view name.
    pub urlname_separator: String,
    /// Custom settings that don't fit into the above categories.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: "info".to_string(),
            urlname_separator: DEFAULT_URLNAME_SEPARATOR.to_string(),
            extra: HashMap::new(),
        }
    }
}

static DEFAULT_SETTINGS: Lazy<Settings> = Lazy::new(Settings::default);

/// A lazily-initialized, globally-accessible settings container.
///
/// Call [`configure`](LazySettings::configure) once at startup, then use
/// [`get`](LazySettings::get) or [`current`](LazySettings::current).
pub struct LazySettings {
    inner: OnceLock<Settings>,
}

impl Default for LazySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl LazySettings {
    /// Creates a new, unconfigured `LazySettings`.
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Configures the global settings. Must be called exactly once.
    ///
    /// # Panics
    ///
    /// Panics if settings have already been configured.
    pub fn configure(&self, settings: Settings) {
        self.inner
            .set(settings)
            .expect("Settings have already been configured");
    }

    /// Returns a reference to the configured settings.
    ///
    /// # Panics
    ///
    /// Panics if settings have not been configured.
    pub fn get(&self) -> &Settings {
        self.inner
            .get()
            .expect("Settings have not been configured. Call SETTINGS.configure() first.")
    }

    /// Returns the configured settings, or the defaults when none were configured.
    pub fn current(&self) -> &Settings {
        self.inner
            .get()
            .unwrap_or_else(|| Lazy::force(&DEFAULT_SETTINGS))
    }

    /// Returns `true` if settings have been configured.
    pub fn is_configured(&self) -> bool {
        self.inner.get().is_some()
    }
}

/// The global settings instance.
pub static SETTINGS: LazySettings = LazySettings::new();
