//! # viewset-rs
//!
//! Declarative viewsets: group class-based views under names, give them URL
//! patterns, and compile them into routable URL descriptors.
//!
//! This is the meta-crate that re-exports the sub-crates. Depend on it to get
//! everything, or on the individual crates for finer-grained control.
//!
//! ```
//! use viewset_rs::prelude::*;
//! use axum::response::IntoResponse;
//!
//! fn page(name: &str) -> FunctionViewClass {
//!     FunctionViewClass::new(name, &[], |_kwargs| {
//!         Ok(view_function(|_request: HttpRequest| async { "page".into_response() }))
//!     })
//! }
//!
//! struct Articles;
//!
//! impl DeclareViews for Articles {
//!     fn declare_views(views: &mut ViewDeclarations) {
//!         views
//!             .declare("list", url_view("^$", page("ListView")))
//!             .declare("read", url_view(r"^(?P<pk>[0-9]+)/$", page("DetailView")));
//!     }
//! }
//!
//! let articles = GenericViewSet::<Articles>::with_prefix("article");
//! let names: Vec<String> = articles
//!     .urlpatterns()
//!     .unwrap()
//!     .iter()
//!     .map(|url| url.name().to_string())
//!     .collect();
//! assert_eq!(names, ["article-list", "article-read"]);
//! ```

/// Settings, errors, logging, and checks.
pub use viewset_rs_core as core;

/// Named views, viewsets, and URL compilation.
pub use viewset_rs_views as views;

pub use async_trait;
pub use axum;
pub use serde_json;
pub use tracing;

/// The types needed to declare and use viewsets.
pub mod prelude {
    pub use viewset_rs_core::{ViewError, ViewSetError, ViewSetResult, SETTINGS};
    pub use viewset_rs_views::named::{named_view, url_view, NamedView};
    pub use viewset_rs_views::registry::{DeclareViews, ViewDeclarations};
    pub use viewset_rs_views::views::{
        view_function, FunctionViewClass, HttpRequest, HttpResponse, View, ViewClass,
        ViewFunction, ViewInit, ViewType,
    };
    pub use viewset_rs_views::{
        viewset_view, GenericViewSet, KwargValue, ModelRef, ModelViewSet, ViewKwargs, ViewSet,
        ViewSetHandle, ViewSetState, ViewSetUrl,
    };
}
