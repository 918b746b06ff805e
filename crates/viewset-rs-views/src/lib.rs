//! # viewset-rs-views
//!
//! Viewsets group several class-based views into one reusable unit. Each view
//! is wrapped in a [`NamedView`](named::NamedView) that gives it a name, an
//! optional URL pattern, and construction kwargs. A viewset resolves those
//! kwargs, constructs the views, and compiles them into URL descriptors with
//! prefixed names.
//!
//! ## Modules
//!
//! - [`named`] - Named views and the `named_view` / `url_view` constructors
//! - [`registry`] - Declaration collection and the ordered view registry
//! - [`kwargs`] - Keyword arguments passed to view classes
//! - [`viewset`] - The `ViewSet` trait and `GenericViewSet`
//! - [`model`] - Model references and `ModelViewSet`
//! - [`urls`] - URL descriptors and the lazy `UrlPatterns` iterator
//! - [`utils`] - The `viewset_view` adapter
//! - [`views`] - View functions, the `View` trait, and view classes

pub mod kwargs;
pub mod model;
pub mod named;
pub mod registry;
pub mod urls;
pub mod utils;
pub mod views;
pub mod viewset;

pub use kwargs::{KwargValue, ViewKwargs, MODEL_KWARG, VIEWSET_KWARG};
pub use model::{ModelRef, ModelViewSet};
pub use named::{named_view, url_view, NamedView};
pub use registry::{class_views, DeclareViews, ViewDeclarations, ViewRegistry};
pub use urls::{UrlPatterns, ViewSetUrl};
pub use utils::{viewset_view, ViewSetView};
pub use views::{FunctionViewClass, View, ViewClass, ViewFunction, ViewInit, ViewType};
pub use viewset::{GenericViewSet, ViewSet, ViewSetHandle, ViewSetState};
