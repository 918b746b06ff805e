//! Helpers for using existing views inside viewsets.

use std::fmt;

use viewset_rs_core::ViewError;

use crate::kwargs::{ViewKwargs, VIEWSET_KWARG};
use crate::views::{ViewClass, ViewFunction};

/// A view class that additionally accepts the `viewset` keyword.
///
/// Created by [`viewset_view`].
#[derive(Clone)]
pub struct ViewSetView<V> {
    inner: V,
}

impl<V: ViewClass> ViewSetView<V> {
    /// Returns the wrapped view class.
    pub const fn inner(&self) -> &V {
        &self.inner
    }
}

impl<V: ViewClass> fmt::Debug for ViewSetView<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ViewSetView")
            .field(&self.inner.class_name())
            .finish()
    }
}

impl<V: ViewClass> ViewClass for ViewSetView<V> {
    fn class_name(&self) -> &str {
        self.inner.class_name()
    }

    fn accepts(&self, kwarg: &str) -> bool {
        kwarg == VIEWSET_KWARG || self.inner.accepts(kwarg)
    }

    fn build(&self, kwargs: ViewKwargs) -> Result<ViewFunction, ViewError> {
        self.inner.build(kwargs)
    }
}

/// Lets `view` receive the viewset that constructs it.
///
/// A viewset only injects itself into view classes that accept the `viewset`
/// keyword. Wrapping a view class with this helper makes it accept that
/// keyword; everything else is forwarded to the wrapped class, which can read
/// the injected value with [`ViewKwargs::viewset`].
///
/// # Examples
///
/// ```
/// use axum::response::IntoResponse;
/// use viewset_rs_views::utils::viewset_view;
/// use viewset_rs_views::views::{view_function, FunctionViewClass, HttpRequest, ViewClass};
///
/// let nav = FunctionViewClass::new("NavView", &[], |kwargs| {
///     let links = kwargs.viewset().map(|viewset| viewset.urlname("list"));
///     Ok(view_function(move |_request: HttpRequest| {
///         let links = links.clone().unwrap_or_default();
///         async move { links.into_response() }
///     }))
/// });
/// let wrapped = viewset_view(nav);
/// assert!(wrapped.accepts_viewset());
/// ```
pub fn viewset_view<V: ViewClass>(view: V) -> ViewSetView<V> {
    ViewSetView { inner: view }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::response::IntoResponse;

    use super::*;
    use crate::named::url_view;
    use crate::registry::{DeclareViews, ViewDeclarations};
    use crate::views::{view_function, FunctionViewClass, HttpRequest};
    use crate::viewset::{GenericViewSet, ViewSet};

    fn nav_view() -> FunctionViewClass {
        FunctionViewClass::new("NavView", &["title"], |kwargs| {
            let viewset = kwargs
                .viewset()
                .map(|handle| handle.class_name().to_string())
                .unwrap_or_default();
            Ok(view_function(move |_request: HttpRequest| {
                let viewset = viewset.clone();
                async move { viewset.into_response() }
            }))
        })
    }

    #[test]
    fn test_wrapper_accepts_viewset_and_inner_kwargs() {
        let wrapped = viewset_view(nav_view());
        assert!(wrapped.accepts("viewset"));
        assert!(wrapped.accepts("title"));
        assert!(!wrapped.accepts("colour"));
        assert_eq!(wrapped.class_name(), "NavView");
        assert!(!nav_view().accepts_viewset());
    }

    struct NavSet;

    impl DeclareViews for NavSet {
        fn declare_views(views: &mut ViewDeclarations) {
            views.declare("nav", url_view("^nav/$", viewset_view(nav_view())));
        }
    }

    #[tokio::test]
    async fn test_wrapped_view_receives_viewset() {
        let viewset = GenericViewSet::<NavSet>::new();
        let nav = viewset.get_view("nav").unwrap();
        let view = viewset.get_view_instance(nav).ok().expect("should build");
        let response = view(http::Request::new(Body::empty())).await;
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"NavSet");
    }
}
