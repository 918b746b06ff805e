//! Core error types for viewset-rs.
//!
//! Two layers of errors exist:
//!
//! - [`ViewError`] is raised by a view class while it is being constructed from
//!   keyword arguments (an unexpected keyword, a missing one, a bad value).
//! - [`ViewSetError`] is raised by a viewset. Construction failures of a view
//!   are wrapped into [`ViewSetError::ViewInstantiation`] so the message names
//!   both the viewset and the view, while the original [`ViewError`] stays
//!   reachable through [`std::error::Error::source`].

use thiserror::Error;

/// An error raised while constructing a view from keyword arguments.
///
/// # Examples
///
/// ```
/// use viewset_rs_core::error::ViewError;
///
/// let err = ViewError::UnexpectedKwarg {
///     view: "DetailView".into(),
///     kwarg: "viewset".into(),
/// };
/// assert!(err.to_string().contains("invalid keyword 'viewset'"));
/// ```
#[derive(Error, Debug)]
pub enum ViewError {
    /// A keyword was passed that the view class does not declare.
    #[error(
        "{view}() received an invalid keyword '{kwarg}'. as_view only accepts \
         arguments that are already attributes of the view"
    )]
    UnexpectedKwarg {
        /// The name of the view class.
        view: String,
        /// The offending keyword.
        kwarg: String,
    },

    /// A keyword the view needs was not supplied.
    #[error("{view}() missing required keyword '{kwarg}'")]
    MissingKwarg {
        /// The name of the view class.
        view: String,
        /// The missing keyword.
        kwarg: String,
    },

    /// A keyword was supplied with a value of the wrong kind.
    #[error("keyword '{kwarg}' must be {expected}")]
    InvalidKwarg {
        /// The keyword.
        kwarg: String,
        /// A description of the expected value.
        expected: String,
    },

    /// The view is improperly configured.
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    /// Any other failure raised by a view constructor.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// The primary error type for viewsets.
#[derive(Error, Debug)]
pub enum ViewSetError {
    /// No view in the viewset carries the requested name.
    #[error("Cannot find viewset view named {0}")]
    ViewNotFound(String),

    /// The view class of a named view failed to construct.
    #[error("Cannot instantiate viewset view \"{viewset}.{view}\". The error was: {source}")]
    ViewInstantiation {
        /// The name of the viewset type.
        viewset: String,
        /// The name of the view inside the viewset.
        view: String,
        /// The failure raised by the view class.
        #[source]
        source: ViewError,
    },

    /// The URL pattern of a named view is not a valid regular expression.
    #[error("Invalid URL pattern '{pattern}' for viewset view \"{view}\": {source}")]
    InvalidPattern {
        /// The name of the view inside the viewset.
        view: String,
        /// The pattern as declared.
        pattern: String,
        /// The regex compilation failure.
        #[source]
        source: regex::Error,
    },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A convenience type alias for `Result<T, ViewSetError>`.
pub type ViewSetResult<T> = Result<T, ViewSetError>;

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_view_not_found_display() {
        let err = ViewSetError::ViewNotFound("detail".into());
        assert_eq!(err.to_string(), "Cannot find viewset view named detail");
    }

    #[test]
    fn test_view_instantiation_names_viewset_and_view() {
        let err = ViewSetError::ViewInstantiation {
            viewset: "CrudSet".into(),
            view: "update".into(),
            source: ViewError::MissingKwarg {
                view: "UpdateView".into(),
                kwarg: "model".into(),
            },
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Cannot instantiate viewset view \"CrudSet.update\"."));
        assert!(msg.contains("missing required keyword 'model'"));
    }

    #[test]
    fn test_view_instantiation_keeps_source() {
        let err = ViewSetError::ViewInstantiation {
            viewset: "CrudSet".into(),
            view: "read".into(),
            source: ViewError::ImproperlyConfigured("no template".into()),
        };
        let source = err.source().expect("source should be kept");
        assert_eq!(source.to_string(), "Improperly configured: no template");
    }

    #[test]
    fn test_invalid_pattern_display() {
        let regex_err = regex::Regex::new("(").unwrap_err();
        let err = ViewSetError::InvalidPattern {
            view: "broken".into(),
            pattern: "(".into(),
            source: regex_err,
        };
        assert!(err.to_string().contains("Invalid URL pattern '(' for viewset view \"broken\""));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_view_error_other_is_transparent() {
        let boxed: Box<dyn std::error::Error + Send + Sync> = "database unavailable".into();
        let err = ViewError::from(boxed);
        assert_eq!(err.to_string(), "database unavailable");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ViewSetError = io_err.into();
        assert!(err.to_string().contains("file missing"));
    }
}
