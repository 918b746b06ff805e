//! System check messages.
//!
//! Checks inspect configuration and report problems as [`CheckMessage`]s
//! instead of failing. Viewsets run their own checks (see
//! `viewset_rs_views::ViewSet::check`); this module holds the message types
//! and the settings-level checks.
//!
//! ## Examples
//!
//! ```
//! use viewset_rs_core::checks::{check_settings, CheckLevel};
//! use viewset_rs_core::settings::Settings;
//!
//! let settings = Settings {
//!     urlname_separator: String::new(),
//!     ..Settings::default()
//! };
//! let messages = check_settings(&settings);
//! assert_eq!(messages[0].level, CheckLevel::Warning);
//! ```

use std::fmt;

use crate::settings::Settings;

/// Severity level for a check message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckLevel {
    /// Debugging information.
    Debug = 0,
    /// Informational message.
    Info = 1,
    /// A potential problem.
    Warning = 2,
    /// A definite problem that should be fixed.
    Error = 3,
    /// A critical error that prevents the application from running.
    Critical = 4,
}

impl fmt::Display for CheckLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A diagnostic message produced by a system check.
#[derive(Debug, Clone)]
pub struct CheckMessage {
    /// The severity level.
    pub level: CheckLevel,
    /// The human-readable message describing the issue.
    pub msg: String,
    /// An optional hint on how to fix the issue.
    pub hint: Option<String>,
    /// The object (viewset, view, setting) that has the issue.
    pub obj: Option<String>,
    /// A unique identifier for this check message (e.g. "viewsets.E001").
    pub id: Option<String>,
}

impl CheckMessage {
    /// Creates a new `CheckMessage` with the given level and details.
    pub fn new(
        level: CheckLevel,
        msg: impl Into<String>,
        hint: Option<&str>,
        obj: Option<&str>,
        id: Option<&str>,
    ) -> Self {
        Self {
            level,
            msg: msg.into(),
            hint: hint.map(String::from),
            obj: obj.map(String::from),
            id: id.map(String::from),
        }
    }

    /// Creates a warning-level message.
    pub fn warning(msg: impl Into<String>, hint: Option<&str>, obj: Option<&str>, id: Option<&str>) -> Self {
        Self::new(CheckLevel::Warning, msg, hint, obj, id)
    }

    /// Creates an error-level message.
    pub fn error(msg: impl Into<String>, hint: Option<&str>, obj: Option<&str>, id: Option<&str>) -> Self {
        Self::new(CheckLevel::Error, msg, hint, obj, id)
    }

    /// Returns `true` if this is a warning or higher severity.
    pub fn is_serious(&self) -> bool {
        self.level >= CheckLevel::Warning
    }
}

impl fmt::Display for CheckMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref id) = self.id {
            write!(f, "({id}) ")?;
        }
        write!(f, "{}: {}", self.level, self.msg)?;
        if let Some(ref hint) = self.hint {
            write!(f, "\n\tHINT: {hint}")?;
        }
        if let Some(ref obj) = self.obj {
            write!(f, "\n\tObject: {obj}")?;
        }
        Ok(())
    }
}

/// Checks the settings themselves.
///
/// An empty `urlname_separator` glues prefixes straight onto view names
/// (`crudread` instead of `crud-read`), which is almost never intended.
pub fn check_settings(settings: &Settings) -> Vec<CheckMessage> {
    let mut messages = Vec::new();
    if settings.urlname_separator.is_empty() {
        messages.push(CheckMessage::warning(
            "urlname_separator is empty; prefixed URL names will run into view names.",
            Some("Set urlname_separator to a non-empty string such as \"-\"."),
            Some("urlname_separator"),
            Some("viewsets.W002"),
        ));
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_level_ordering() {
        assert!(CheckLevel::Debug < CheckLevel::Info);
        assert!(CheckLevel::Warning < CheckLevel::Error);
        assert!(CheckLevel::Error < CheckLevel::Critical);
    }

    #[test]
    fn test_check_message_display() {
        let msg = CheckMessage::error(
            "Pattern does not compile",
            Some("Fix the regex."),
            Some("CrudSet.read"),
            Some("viewsets.E001"),
        );
        let s = msg.to_string();
        assert!(s.starts_with("(viewsets.E001) ERROR: Pattern does not compile"));
        assert!(s.contains("HINT: Fix the regex."));
        assert!(s.contains("Object: CrudSet.read"));
    }

    #[test]
    fn test_check_message_is_serious() {
        assert!(CheckMessage::warning("w", None, None, None).is_serious());
        assert!(!CheckMessage::new(CheckLevel::Info, "i", None, None, None).is_serious());
    }

    #[test]
    fn test_check_settings_default_is_clean() {
        assert!(check_settings(&Settings::default()).is_empty());
    }

    #[test]
    fn test_check_settings_empty_separator() {
        let settings = Settings {
            urlname_separator: String::new(),
            ..Settings::default()
        };
        let messages = check_settings(&settings);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id.as_deref(), Some("viewsets.W002"));
    }
}
