//! Named views: declarative wrappers around view classes.
//!
//! A [`NamedView`] pairs a view class with a logical name, an optional URL
//! pattern, and the keyword arguments used to construct it. Contrary to the
//! name it is not a view itself. Named views with a URL pattern (built with
//! [`url_view`]) are routable; the others only live in the viewset so they
//! can be looked up by name.
//!
//! Every named view takes a number from a process-wide counter when it is
//! created. Viewsets sort their own declarations by that number, so views
//! keep the order in which they were written.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::kwargs::{KwargValue, ViewKwargs};
use crate::views::ViewClass;

static CREATION_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A view class wrapped with a name, an optional URL, and construction kwargs.
#[derive(Clone)]
pub struct NamedView {
    view: Arc<dyn ViewClass>,
    name: Option<String>,
    url: Option<String>,
    view_kwargs: ViewKwargs,
    creation_counter: u64,
}

impl NamedView {
    /// Wraps `view` without a URL.
    pub fn new<V: ViewClass + 'static>(view: V) -> Self {
        Self {
            view: Arc::new(view),
            name: None,
            url: None,
            view_kwargs: ViewKwargs::new(),
            creation_counter: CREATION_COUNTER.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Wraps `view` and attaches the URL pattern `url`.
    pub fn with_url<V: ViewClass + 'static>(url: &str, view: V) -> Self {
        let mut named = Self::new(view);
        named.url = Some(url.to_string());
        named
    }

    /// Sets the name. Without one, the attribute it is declared under is used.
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Replaces the construction kwargs.
    #[must_use]
    pub fn with_kwargs(mut self, kwargs: ViewKwargs) -> Self {
        self.view_kwargs = kwargs;
        self
    }

    /// Adds a single construction kwarg.
    #[must_use]
    pub fn with_kwarg(mut self, key: &str, value: impl Into<KwargValue>) -> Self {
        self.view_kwargs.insert(key, value);
        self
    }

    /// Returns the wrapped view class.
    pub fn view(&self) -> &Arc<dyn ViewClass> {
        &self.view
    }

    /// Returns the name, if one was given or backfilled.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the URL pattern, if any.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Returns `true` if the named view carries a URL pattern.
    pub const fn is_routable(&self) -> bool {
        self.url.is_some()
    }

    /// Returns the kwargs stored on the named view.
    pub const fn get_view_kwargs(&self) -> &ViewKwargs {
        &self.view_kwargs
    }

    /// Returns the position of this named view in creation order.
    pub const fn creation_counter(&self) -> u64 {
        self.creation_counter
    }

    /// Uses `attribute` as the name unless a name is already set.
    pub(crate) fn set_default_name(&mut self, attribute: &str) {
        if self.name.as_deref().map_or(true, str::is_empty) {
            self.name = Some(attribute.to_string());
        }
    }
}

impl fmt::Display for NamedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_routable() { "URLView" } else { "NamedView" };
        write!(
            f,
            "<{kind}: {} ({})>",
            self.name().unwrap_or("None"),
            self.view.class_name()
        )
    }
}

impl fmt::Debug for NamedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedView")
            .field("view", &self.view.class_name())
            .field("name", &self.name)
            .field("url", &self.url)
            .field("view_kwargs", &self.view_kwargs)
            .field("creation_counter", &self.creation_counter)
            .finish()
    }
}

/// Wraps `view` in a [`NamedView`] without a URL.
pub fn named_view<V: ViewClass + 'static>(view: V) -> NamedView {
    NamedView::new(view)
}

/// Wraps `view` in a routable [`NamedView`] with the URL pattern `url`.
///
/// # Examples
///
/// ```
/// use axum::response::IntoResponse;
/// use viewset_rs_views::named::url_view;
/// use viewset_rs_views::views::{view_function, FunctionViewClass, HttpRequest};
///
/// let detail = FunctionViewClass::new("DetailView", &[], |_kwargs| {
///     Ok(view_function(|_request: HttpRequest| async { "detail".into_response() }))
/// });
/// let read = url_view(r"^(?P<pk>[0-9]+)/read/$", detail).with_name("read");
/// assert_eq!(read.to_string(), "<URLView: read (DetailView)>");
/// ```
pub fn url_view<V: ViewClass + 'static>(url: &str, view: V) -> NamedView {
    NamedView::with_url(url, view)
}
