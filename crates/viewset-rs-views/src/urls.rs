//! URL descriptors produced by viewsets.
//!
//! [`UrlPatterns`] walks a viewset's views in order and yields one
//! [`ViewSetUrl`] per routable view: the compiled pattern, the constructed
//! view function, and the prefixed URL name. Views are only constructed as
//! the iterator advances.

use std::fmt;

use regex::Regex;
use viewset_rs_core::{ViewSetError, ViewSetResult};

use crate::named::NamedView;
use crate::views::ViewFunction;
use crate::viewset::ViewSet;

/// A single routable URL: pattern, view, and name.
#[derive(Clone)]
pub struct ViewSetUrl {
    regex: Regex,
    view: ViewFunction,
    name: String,
}

impl ViewSetUrl {
    /// Creates a URL descriptor from its parts.
    pub fn new(regex: Regex, view: ViewFunction, name: impl Into<String>) -> Self {
        Self {
            regex,
            view,
            name: name.into(),
        }
    }

    /// Returns the pattern as declared.
    pub fn route(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns the compiled pattern.
    pub const fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Returns the constructed view function.
    pub const fn view(&self) -> &ViewFunction {
        &self.view
    }

    /// Returns the URL name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for ViewSetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewSetUrl")
            .field("route", &self.route())
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A lazy iterator over the URL descriptors of a viewset.
pub struct UrlPatterns<'a, V: ViewSet + ?Sized> {
    viewset: &'a V,
    views: indexmap::map::Values<'a, String, NamedView>,
}

impl<'a, V: ViewSet + ?Sized> UrlPatterns<'a, V> {
    /// Starts iterating over the views of `viewset`.
    pub fn new(viewset: &'a V) -> Self {
        Self {
            viewset,
            views: viewset.views().values(),
        }
    }

    fn compile(&self, named: &NamedView, url: &str) -> ViewSetResult<ViewSetUrl> {
        let view = self.viewset.get_view_instance(named)?;
        let regex = Regex::new(url).map_err(|source| ViewSetError::InvalidPattern {
            view: named.name().unwrap_or_default().to_string(),
            pattern: url.to_string(),
            source,
        })?;
        let name = self.viewset.get_view_urlname(named);
        tracing::trace!(route = url, name = %name, "compiled viewset url");
        Ok(ViewSetUrl::new(regex, view, name))
    }
}

impl<V: ViewSet + ?Sized> Iterator for UrlPatterns<'_, V> {
    type Item = ViewSetResult<ViewSetUrl>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let named = self.views.next()?;
            if let Some(url) = named.url() {
                return Some(self.compile(named, url));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::response::IntoResponse;

    use super::*;
    use crate::named::{named_view, url_view};
    use crate::registry::{DeclareViews, ViewDeclarations};
    use crate::views::{view_function, FunctionViewClass, HttpRequest};
    use crate::viewset::GenericViewSet;

    static BUILDS: AtomicUsize = AtomicUsize::new(0);

    fn counted(name: &str) -> FunctionViewClass {
        FunctionViewClass::new(name, &[], |_kwargs| {
            BUILDS.fetch_add(1, Ordering::SeqCst);
            Ok(view_function(|_request: HttpRequest| async {
                "ok".into_response()
            }))
        })
    }

    struct Mixed;

    impl DeclareViews for Mixed {
        fn declare_views(views: &mut ViewDeclarations) {
            views
                .declare("list", url_view("^$", counted("ListView")))
                .declare("helper", named_view(counted("HelperView")))
                .declare("read", url_view(r"^(?P<pk>[0-9]+)/read/$", counted("DetailView")));
        }
    }

    #[test]
    fn test_only_routable_views_yield_urls() {
        let viewset = GenericViewSet::<Mixed>::with_prefix("mixed");
        let urls = viewset.urlpatterns().unwrap();
        let names: Vec<_> = urls.iter().map(ViewSetUrl::name).collect();
        assert_eq!(names, ["mixed-list", "mixed-read"]);
        assert_eq!(urls[1].route(), r"^(?P<pk>[0-9]+)/read/$");
    }

    struct Lazy;

    impl DeclareViews for Lazy {
        fn declare_views(views: &mut ViewDeclarations) {
            views
                .declare("first", url_view("^first/$", counted("FirstView")))
                .declare("second", url_view("^second/$", counted("SecondView")));
        }
    }

    #[test]
    fn test_views_are_built_on_demand() {
        let viewset = GenericViewSet::<Lazy>::new();
        let mut urls = viewset.get_urls();
        let before = BUILDS.load(Ordering::SeqCst);
        let first = urls.next().unwrap().unwrap();
        assert_eq!(first.name(), "first");
        assert!(BUILDS.load(Ordering::SeqCst) > before);
    }

    struct BadPattern;

    impl DeclareViews for BadPattern {
        fn declare_views(views: &mut ViewDeclarations) {
            views.declare("broken", url_view("^(?P<pk>[0-9+/$", counted("BrokenView")));
        }
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let viewset = GenericViewSet::<BadPattern>::new();
        let err = viewset.urlpatterns().unwrap_err();
        assert!(matches!(
            err,
            ViewSetError::InvalidPattern { ref view, .. } if view == "broken"
        ));
    }

    #[test]
    fn test_debug_omits_view() {
        let view = view_function(|_request: HttpRequest| async { "ok".into_response() });
        let url = ViewSetUrl::new(Regex::new("^$").unwrap(), view, "list");
        let debug = format!("{url:?}");
        assert!(debug.contains("\"list\""));
        assert!(debug.contains(".."));
    }
}
