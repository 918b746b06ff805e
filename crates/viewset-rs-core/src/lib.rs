//! # viewset-rs-core
//!
//! Core types, settings, and error types for the viewset-rs crates.
//! This crate has no view or routing dependencies and provides the foundation
//! for the other crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Viewset settings and global configuration
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`logging`] - Tracing-based logging integration
//! - [`checks`] - Diagnostic messages produced by system checks

pub mod checks;
pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use checks::{CheckLevel, CheckMessage};
pub use error::{ViewError, ViewSetError, ViewSetResult};
pub use settings::{Settings, SETTINGS};
