//! Viewsets: containers for multiple named views.
//!
//! A viewset owns a copy of its type's [`ViewRegistry`] plus a URL-name
//! prefix and separator. The [`ViewSet`] trait provides the lookup, kwargs
//! resolution, instantiation, and URL compilation on top of that state; its
//! hooks can be overridden per type.
//!
//! ```
//! use async_trait::async_trait;
//! use axum::response::IntoResponse;
//! use viewset_rs_core::ViewError;
//! use viewset_rs_views::kwargs::ViewKwargs;
//! use viewset_rs_views::named::url_view;
//! use viewset_rs_views::registry::{DeclareViews, ViewDeclarations};
//! use viewset_rs_views::viewset::{GenericViewSet, ViewSet};
//! use viewset_rs_views::views::{HttpRequest, HttpResponse, View, ViewInit, ViewType};
//!
//! struct DetailView;
//!
//! #[async_trait]
//! impl View for DetailView {
//!     async fn get(&self, _request: HttpRequest) -> HttpResponse {
//!         "detail".into_response()
//!     }
//! }
//!
//! impl ViewInit for DetailView {
//!     const ATTRIBUTES: &'static [&'static str] = &[];
//!
//!     fn from_kwargs(_kwargs: ViewKwargs) -> Result<Self, ViewError> {
//!         Ok(Self)
//!     }
//! }
//!
//! struct CrudSet;
//!
//! impl DeclareViews for CrudSet {
//!     fn declare_views(views: &mut ViewDeclarations) {
//!         views.declare(
//!             "read_view",
//!             url_view(r"^(?P<pk>[0-9]+)/read/$", ViewType::<DetailView>::new()).with_name("detail"),
//!         );
//!     }
//! }
//!
//! let crud = GenericViewSet::<CrudSet>::with_prefix("crud");
//! let urls = crud.urlpatterns().unwrap();
//! assert_eq!(urls[0].name(), "crud-detail");
//! assert_eq!(urls[0].route(), r"^(?P<pk>[0-9]+)/read/$");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use regex::Regex;
use viewset_rs_core::checks::CheckMessage;
use viewset_rs_core::logging::viewset_span;
use viewset_rs_core::{ViewSetError, ViewSetResult, SETTINGS};

use crate::kwargs::{KwargValue, ViewKwargs, VIEWSET_KWARG};
use crate::named::NamedView;
use crate::registry::{class_views, DeclareViews, ViewRegistry};
use crate::urls::{UrlPatterns, ViewSetUrl};
use crate::views::view_class::short_type_name;
use crate::views::ViewFunction;

/// A closure that supplies the kwargs for one view by name.
pub type KwargsOverride = Arc<dyn Fn(&NamedView) -> ViewKwargs + Send + Sync>;

/// Builds a URL name from an optional prefix, a separator, and a view name.
pub fn build_urlname(prefix: Option<&str>, separator: &str, view_name: &str) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}{separator}{view_name}"),
        _ => view_name.to_string(),
    }
}

/// The per-instance state of a viewset.
#[derive(Clone)]
pub struct ViewSetState {
    class_name: String,
    views: ViewRegistry,
    urlname_prefix: Option<String>,
    urlname_separator: String,
    kwargs_overrides: HashMap<String, KwargsOverride>,
}

impl ViewSetState {
    /// Creates the state for a viewset of type `D`.
    ///
    /// The views are copied from `D`'s declarations and the separator is
    /// taken from the global settings.
    pub fn new<D: DeclareViews>(urlname_prefix: Option<&str>) -> Self {
        Self {
            class_name: short_type_name::<D>().to_string(),
            views: class_views::<D>(),
            urlname_prefix: urlname_prefix.map(String::from),
            urlname_separator: SETTINGS.current().urlname_separator.clone(),
            kwargs_overrides: HashMap::new(),
        }
    }

    /// Replaces the URL-name separator.
    #[must_use]
    pub fn with_separator(mut self, separator: &str) -> Self {
        self.urlname_separator = separator.to_string();
        self
    }

    /// Supplies the kwargs for the view named `view_name` through `f`.
    ///
    /// When set, the kwargs stored on that named view are not used.
    #[must_use]
    pub fn override_view_kwargs<F>(mut self, view_name: &str, f: F) -> Self
    where
        F: Fn(&NamedView) -> ViewKwargs + Send + Sync + 'static,
    {
        self.kwargs_overrides
            .insert(view_name.to_string(), Arc::new(f));
        self
    }

    /// Returns the name of the viewset type.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Returns the views of this viewset.
    pub const fn views(&self) -> &ViewRegistry {
        &self.views
    }

    /// Returns the views of this viewset for modification.
    pub fn views_mut(&mut self) -> &mut ViewRegistry {
        &mut self.views
    }

    /// Returns the URL-name prefix, if set.
    pub fn urlname_prefix(&self) -> Option<&str> {
        self.urlname_prefix.as_deref()
    }

    /// Returns the URL-name separator.
    pub fn urlname_separator(&self) -> &str {
        &self.urlname_separator
    }

    /// Returns the kwargs override registered for `view_name`.
    pub fn kwargs_override(&self, view_name: &str) -> Option<&KwargsOverride> {
        self.kwargs_overrides.get(view_name)
    }
}

impl fmt::Debug for ViewSetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewSetState")
            .field("class_name", &self.class_name)
            .field("views", &self.views.keys().collect::<Vec<_>>())
            .field("urlname_prefix", &self.urlname_prefix)
            .field("urlname_separator", &self.urlname_separator)
            .field(
                "kwargs_overrides",
                &self.kwargs_overrides.keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[derive(Debug)]
struct HandleInner {
    class_name: String,
    views: ViewRegistry,
    urlname_prefix: Option<String>,
    urlname_separator: String,
}

/// A shared snapshot of a viewset, injected into views that accept `viewset`.
///
/// Views use it to look up their siblings and to build their URL names.
#[derive(Clone, Debug)]
pub struct ViewSetHandle {
    inner: Arc<HandleInner>,
}

impl ViewSetHandle {
    /// Takes a snapshot of `state`.
    pub fn new(state: &ViewSetState) -> Self {
        Self {
            inner: Arc::new(HandleInner {
                class_name: state.class_name.clone(),
                views: state.views.clone(),
                urlname_prefix: state.urlname_prefix.clone(),
                urlname_separator: state.urlname_separator.clone(),
            }),
        }
    }

    /// Returns the name of the viewset type.
    pub fn class_name(&self) -> &str {
        &self.inner.class_name
    }

    /// Returns the views of the viewset.
    pub fn views(&self) -> &ViewRegistry {
        &self.inner.views
    }

    /// Returns the URL-name prefix, if set.
    pub fn urlname_prefix(&self) -> Option<&str> {
        self.inner.urlname_prefix.as_deref()
    }

    /// Finds a view by name.
    pub fn get_view(&self, name: &str) -> ViewSetResult<&NamedView> {
        self.inner
            .views
            .find_by_name(name)
            .ok_or_else(|| ViewSetError::ViewNotFound(name.to_string()))
    }

    /// Returns the URL name the viewset gives to the view named `view_name`.
    pub fn urlname(&self, view_name: &str) -> String {
        build_urlname(
            self.urlname_prefix(),
            &self.inner.urlname_separator,
            view_name,
        )
    }
}

/// A container for multiple named views.
///
/// Implementors only provide access to their [`ViewSetState`]; everything
/// else has a default that can be overridden.
pub trait ViewSet: Send + Sync {
    /// Returns the viewset state.
    fn state(&self) -> &ViewSetState;

    /// Returns the viewset state for modification.
    fn state_mut(&mut self) -> &mut ViewSetState;

    /// Returns the views of this viewset, in declaration order.
    fn views(&self) -> &ViewRegistry {
        self.state().views()
    }

    /// Returns the name of the viewset type.
    fn class_name(&self) -> &str {
        self.state().class_name()
    }

    /// Returns the URL-name prefix, if set.
    fn urlname_prefix(&self) -> Option<&str> {
        self.state().urlname_prefix()
    }

    /// Returns the URL-name separator.
    fn urlname_separator(&self) -> &str {
        self.state().urlname_separator()
    }

    /// Adds `named_view` under `attribute`, replacing any existing entry.
    ///
    /// Only this instance is affected.
    fn add_view(&mut self, named_view: NamedView, attribute: &str) {
        tracing::debug!(viewset = self.class_name(), attribute, "adding viewset view");
        self.state_mut().views_mut().insert(attribute, named_view);
    }

    /// Finds a view by its name (not by the attribute it is registered under).
    fn get_view(&self, name: &str) -> ViewSetResult<&NamedView> {
        self.views()
            .find_by_name(name)
            .ok_or_else(|| ViewSetError::ViewNotFound(name.to_string()))
    }

    /// Returns kwargs every view of this viewset starts from. Empty by default.
    fn get_view_default_kwargs(&self, _view: &NamedView) -> ViewKwargs {
        ViewKwargs::new()
    }

    /// Returns replacement kwargs for one view, usually matched on its name.
    ///
    /// When this returns `Some`, the kwargs stored on the named view are
    /// ignored. The default consults the overrides registered with
    /// [`ViewSetState::override_view_kwargs`].
    fn get_named_view_kwargs(&self, view: &NamedView) -> Option<ViewKwargs> {
        let name = view.name()?;
        self.state().kwargs_override(name).map(|f| f(view))
    }

    /// Returns a snapshot of this viewset for injection into views.
    fn handle(&self) -> ViewSetHandle {
        ViewSetHandle::new(self.state())
    }

    /// Compiles the kwargs passed to the view class of `view`.
    ///
    /// 1. [`get_view_default_kwargs`](Self::get_view_default_kwargs).
    /// 2. [`get_named_view_kwargs`](Self::get_named_view_kwargs) if it returns
    ///    `Some`, otherwise the kwargs stored on the named view.
    /// 3. The viewset itself under `viewset`, but only if the view class
    ///    accepts that keyword. Other view classes reject unknown keywords.
    fn get_view_kwargs(&self, view: &NamedView) -> ViewKwargs {
        let mut kwargs = self.get_view_default_kwargs(view);

        match self.get_named_view_kwargs(view) {
            Some(overrides) => kwargs.update(overrides),
            None => kwargs.update(view.get_view_kwargs().clone()),
        }

        if view.view().accepts_viewset() {
            kwargs.insert(VIEWSET_KWARG, KwargValue::ViewSet(self.handle()));
        }
        kwargs
    }

    /// Constructs the view function of `view`.
    fn get_view_instance(&self, view: &NamedView) -> ViewSetResult<ViewFunction> {
        let kwargs = self.get_view_kwargs(view);
        let view_name = view.name().unwrap_or_default();
        view.view().as_view(kwargs).map_err(|source| {
            tracing::error!(
                viewset = self.class_name(),
                view = view_name,
                error = %source,
                "cannot instantiate viewset view"
            );
            ViewSetError::ViewInstantiation {
                viewset: self.class_name().to_string(),
                view: view_name.to_string(),
                source,
            }
        })
    }

    /// Returns the URL name of `view`: `prefix + separator + name`, or just the name.
    fn get_view_urlname(&self, view: &NamedView) -> String {
        build_urlname(
            self.urlname_prefix(),
            self.urlname_separator(),
            view.name().unwrap_or_default(),
        )
    }

    /// Lazily compiles a URL pattern for every view that has a URL, in order.
    ///
    /// Each view is constructed only when the iterator reaches it.
    fn get_urls(&self) -> UrlPatterns<'_, Self>
    where
        Self: Sized,
    {
        UrlPatterns::new(self)
    }

    /// Compiles all URL patterns, stopping at the first failure.
    fn urlpatterns(&self) -> ViewSetResult<Vec<ViewSetUrl>> {
        let _span = viewset_span(self.class_name()).entered();
        UrlPatterns::new(self).collect()
    }

    /// Reports configuration problems without constructing any view.
    ///
    /// - `viewsets.E001`: a URL pattern is not a valid regular expression.
    /// - `viewsets.W001`: several views share a name; only the first one is
    ///   found by [`get_view`](Self::get_view).
    fn check(&self) -> Vec<CheckMessage> {
        let mut messages = Vec::new();
        let mut seen: HashMap<&str, &str> = HashMap::new();

        for (attribute, view) in self.views().iter() {
            let obj = format!("{}.{attribute}", self.class_name());
            if let Some(url) = view.url() {
                if let Err(e) = Regex::new(url) {
                    messages.push(CheckMessage::error(
                        format!("URL pattern '{url}' is not a valid regular expression: {e}"),
                        Some("Fix the pattern passed to url_view()."),
                        Some(&obj),
                        Some("viewsets.E001"),
                    ));
                }
            }
            let name = view.name().unwrap_or(attribute);
            if let Some(first) = seen.get(name) {
                messages.push(CheckMessage::warning(
                    format!("View name '{name}' is already used by attribute '{first}'."),
                    Some("Give each view a distinct name."),
                    Some(&obj),
                    Some("viewsets.W001"),
                ));
            } else {
                seen.insert(name, attribute);
            }
        }
        messages
    }
}

/// A plain viewset whose views are declared by `D`.
pub struct GenericViewSet<D> {
    state: ViewSetState,
    _marker: PhantomData<fn() -> D>,
}

impl<D: DeclareViews> GenericViewSet<D> {
    /// Creates a viewset without a URL-name prefix.
    pub fn new() -> Self {
        Self::from_state(ViewSetState::new::<D>(None))
    }

    /// Creates a viewset whose URL names are prefixed with `prefix`.
    pub fn with_prefix(prefix: &str) -> Self {
        Self::from_state(ViewSetState::new::<D>(Some(prefix)))
    }

    /// Creates a viewset from prepared state.
    pub const fn from_state(state: ViewSetState) -> Self {
        Self {
            state,
            _marker: PhantomData,
        }
    }
}

impl<D: DeclareViews> Default for GenericViewSet<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> fmt::Debug for GenericViewSet<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericViewSet")
            .field("state", &self.state)
            .finish()
    }
}

impl<D: DeclareViews> ViewSet for GenericViewSet<D> {
    fn state(&self) -> &ViewSetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ViewSetState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::response::IntoResponse;
    use viewset_rs_core::ViewError;

    use super::*;
    use crate::named::{named_view, url_view};
    use crate::registry::ViewDeclarations;
    use crate::views::{view_function, FunctionViewClass, HttpRequest};

    fn page(name: &str, attributes: &[&str]) -> FunctionViewClass {
        FunctionViewClass::new(name, attributes, |_kwargs| {
            Ok(view_function(|_request: HttpRequest| async {
                "page".into_response()
            }))
        })
    }

    struct SimpleViewSet;

    impl DeclareViews for SimpleViewSet {
        fn declare_views(views: &mut ViewDeclarations) {
            views
                .declare("read", url_view(r"^(?P<pk>[0-9]+)/read/$", page("DetailView", &[])))
                .declare(
                    "update",
                    url_view(r"^(?P<pk>[0-9]+)/update/$", page("UpdateView", &["template_name"]))
                        .with_kwarg("template_name", "update.html"),
                )
                .declare("help", named_view(page("HelpView", &[])).with_name("manual"));
        }
    }

    #[test]
    fn test_instance_copies_class_views() {
        let viewset = GenericViewSet::<SimpleViewSet>::new();
        assert_eq!(
            viewset.views().keys().collect::<Vec<_>>(),
            ["read", "update", "help"]
        );
        assert_eq!(viewset.class_name(), "SimpleViewSet");
    }

    #[test]
    fn test_add_view_only_affects_instance() {
        let mut viewset = GenericViewSet::<SimpleViewSet>::new();
        viewset.add_view(url_view("^new/$", page("CreateView", &[])), "create");
        assert_eq!(viewset.views().get("create").unwrap().name(), Some("create"));

        let other = GenericViewSet::<SimpleViewSet>::new();
        assert!(!other.views().contains("create"));
        assert!(!class_views::<SimpleViewSet>().contains("create"));
    }

    #[test]
    fn test_add_view_overwrites_silently() {
        let mut viewset = GenericViewSet::<SimpleViewSet>::new();
        viewset.add_view(url_view("^r/$", page("OtherView", &[])), "read");
        assert_eq!(viewset.views().len(), 3);
        assert_eq!(viewset.views().get("read").unwrap().url(), Some("^r/$"));
    }

    #[test]
    fn test_get_view_by_name() {
        let viewset = GenericViewSet::<SimpleViewSet>::new();
        assert_eq!(viewset.get_view("manual").unwrap().view().class_name(), "HelpView");
    }

    #[test]
    fn test_get_view_ignores_attribute_key() {
        let viewset = GenericViewSet::<SimpleViewSet>::new();
        let err = viewset.get_view("help").unwrap_err();
        assert_eq!(err.to_string(), "Cannot find viewset view named help");
    }

    #[test]
    fn test_view_kwargs_default_to_stored_kwargs() {
        let viewset = GenericViewSet::<SimpleViewSet>::new();
        let view = viewset.get_view("update").unwrap();
        let kwargs = viewset.get_view_kwargs(view);
        assert_eq!(kwargs.get_str("template_name"), Some("update.html"));
        assert!(kwargs.viewset().is_none());
    }

    #[test]
    fn test_override_replaces_stored_kwargs() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let state = ViewSetState::new::<SimpleViewSet>(None).override_view_kwargs(
            "update",
            move |_view| {
                counter.fetch_add(1, Ordering::SeqCst);
                ViewKwargs::new().with("template_name", "custom_update.html")
            },
        );
        let viewset = GenericViewSet::<SimpleViewSet>::from_state(state);
        let view = viewset.get_view("update").unwrap();
        let kwargs = viewset.get_view_kwargs(view);
        assert_eq!(kwargs.get_str("template_name"), Some("custom_update.html"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_viewset_injected_only_when_accepted() {
        let mut viewset = GenericViewSet::<SimpleViewSet>::with_prefix("crud");
        viewset.add_view(
            url_view("^nav/$", page("NavView", &["viewset"])),
            "nav",
        );
        let nav = viewset.get_view("nav").unwrap();
        let kwargs = viewset.get_view_kwargs(nav);
        let handle = kwargs.viewset().expect("viewset should be injected");
        assert_eq!(handle.class_name(), "SimpleViewSet");
        assert_eq!(handle.urlname("read"), "crud-read");
        assert!(handle.get_view("nav").is_ok());

        let read = viewset.get_view("read").unwrap();
        assert!(!viewset.get_view_kwargs(read).contains_key("viewset"));
    }

    #[test]
    fn test_get_view_instance_wraps_errors() {
        let mut viewset = GenericViewSet::<SimpleViewSet>::new();
        viewset.add_view(
            url_view("^x/$", page("StrictView", &[])).with_kwarg("colour", "red"),
            "strict",
        );
        let view = viewset.get_view("strict").unwrap();
        let err = viewset.get_view_instance(view).err().expect("should fail");
        match &err {
            ViewSetError::ViewInstantiation { viewset, view, source } => {
                assert_eq!(viewset, "SimpleViewSet");
                assert_eq!(view, "strict");
                assert!(matches!(source, ViewError::UnexpectedKwarg { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("invalid keyword 'colour'"));
    }

    #[test]
    fn test_urlname_with_and_without_prefix() {
        let plain = GenericViewSet::<SimpleViewSet>::new();
        let read = plain.get_view("read").unwrap();
        assert_eq!(plain.get_view_urlname(read), "read");

        let prefixed = GenericViewSet::<SimpleViewSet>::with_prefix("article");
        assert_eq!(prefixed.get_view_urlname(read), "article-read");

        let custom = GenericViewSet::<SimpleViewSet>::from_state(
            ViewSetState::new::<SimpleViewSet>(Some("article")).with_separator(":"),
        );
        assert_eq!(custom.get_view_urlname(read), "article:read");
    }

    #[test]
    fn test_build_urlname_empty_prefix() {
        assert_eq!(build_urlname(Some(""), "-", "read"), "read");
        assert_eq!(build_urlname(None, "-", "read"), "read");
    }

    struct BrokenPatterns;

    impl DeclareViews for BrokenPatterns {
        fn declare_views(views: &mut ViewDeclarations) {
            views
                .declare("ok", url_view("^ok/$", page("OkView", &[])))
                .declare("bad", url_view("^(unclosed/$", page("BadView", &[])))
                .declare("twin", named_view(page("TwinView", &[])).with_name("ok"));
        }
    }

    #[test]
    fn test_check_reports_problems() {
        let viewset = GenericViewSet::<BrokenPatterns>::new();
        let messages = viewset.check();
        let ids: Vec<_> = messages.iter().filter_map(|m| m.id.as_deref()).collect();
        assert_eq!(ids, ["viewsets.E001", "viewsets.W001"]);
        assert_eq!(messages[0].obj.as_deref(), Some("BrokenPatterns.bad"));
    }

    #[test]
    fn test_check_clean_viewset() {
        assert!(GenericViewSet::<SimpleViewSet>::new().check().is_empty());
    }
}
