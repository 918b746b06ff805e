//! Class-based views.
//!
//! This module provides the [`View`] trait: HTTP method dispatch with default
//! handlers that answer 405 Method Not Allowed. A viewset never calls these
//! handlers itself; it only turns views into [`ViewFunction`]s through
//! [`View::as_view`] and hands them to the router.

use std::sync::Arc;

use async_trait::async_trait;
use axum::response::IntoResponse;
use http::header::{HeaderValue, ALLOW};
use http::{Method, StatusCode};

use super::function::{BoxFuture, HttpRequest, HttpResponse, ViewFunction};

/// The base trait for class-based views.
///
/// Override the specific HTTP method handlers (e.g. `get`, `post`) to
/// implement the view logic.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use axum::response::IntoResponse;
/// use viewset_rs_views::views::class_based::View;
/// use viewset_rs_views::views::function::{HttpRequest, HttpResponse};
///
/// struct MyView;
///
/// #[async_trait]
/// impl View for MyView {
///     async fn get(&self, _request: HttpRequest) -> HttpResponse {
///         "Hello from MyView!".into_response()
///     }
/// }
/// ```
#[async_trait]
pub trait View: Send + Sync {
    /// Returns the list of HTTP methods this view allows.
    fn allowed_methods(&self) -> Vec<Method> {
        vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::HEAD,
            Method::OPTIONS,
        ]
    }

    /// Dispatches the request to the appropriate HTTP method handler.
    async fn dispatch(&self, request: HttpRequest) -> HttpResponse {
        match *request.method() {
            Method::GET => self.get(request).await,
            Method::POST => self.post(request).await,
            Method::PUT => self.put(request).await,
            Method::PATCH => self.patch(request).await,
            Method::DELETE => self.delete(request).await,
            Method::HEAD => self.head(request).await,
            Method::OPTIONS => self.options(request).await,
            _ => self.http_method_not_allowed(request).await,
        }
    }

    /// Handles GET requests. Returns 405 by default.
    async fn get(&self, request: HttpRequest) -> HttpResponse {
        self.http_method_not_allowed(request).await
    }

    /// Handles POST requests. Returns 405 by default.
    async fn post(&self, request: HttpRequest) -> HttpResponse {
        self.http_method_not_allowed(request).await
    }

    /// Handles PUT requests. Returns 405 by default.
    async fn put(&self, request: HttpRequest) -> HttpResponse {
        self.http_method_not_allowed(request).await
    }

    /// Handles PATCH requests. Returns 405 by default.
    async fn patch(&self, request: HttpRequest) -> HttpResponse {
        self.http_method_not_allowed(request).await
    }

    /// Handles DELETE requests. Returns 405 by default.
    async fn delete(&self, request: HttpRequest) -> HttpResponse {
        self.http_method_not_allowed(request).await
    }

    /// Handles HEAD requests. Delegates to `get` by default.
    async fn head(&self, request: HttpRequest) -> HttpResponse {
        self.get(request).await
    }

    /// Handles OPTIONS requests. Returns the list of allowed methods.
    async fn options(&self, _request: HttpRequest) -> HttpResponse {
        with_allow_header(StatusCode::OK.into_response(), &self.allowed_methods())
    }

    /// Returns a 405 Method Not Allowed response with the allowed methods header.
    async fn http_method_not_allowed(&self, _request: HttpRequest) -> HttpResponse {
        with_allow_header(
            StatusCode::METHOD_NOT_ALLOWED.into_response(),
            &self.allowed_methods(),
        )
    }

    /// Converts this view into a [`ViewFunction`].
    #[allow(clippy::wrong_self_convention)]
    fn as_view(self) -> ViewFunction
    where
        Self: Sized + 'static,
    {
        let view = Arc::new(self);
        Arc::new(move |request: HttpRequest| -> BoxFuture {
            let view = Arc::clone(&view);
            Box::pin(async move { view.dispatch(request).await })
        })
    }
}

fn with_allow_header(mut response: HttpResponse, methods: &[Method]) -> HttpResponse {
    let method_strs: Vec<&str> = methods.iter().map(Method::as_str).collect();
    if let Ok(value) = HeaderValue::from_str(&method_strs.join(", ")) {
        response.headers_mut().insert(ALLOW, value);
    }
    response
}
