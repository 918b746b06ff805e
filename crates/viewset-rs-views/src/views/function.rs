//! View functions: the constructed, routable form of a view.
//!
//! Every view class eventually produces a [`ViewFunction`], an async handler
//! from request to response. Route descriptors carry these.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// The request type handed to views.
pub type HttpRequest = axum::extract::Request;

/// The response type produced by views.
pub type HttpResponse = axum::response::Response;

/// A boxed future that resolves to an [`HttpResponse`].
pub type BoxFuture = Pin<Box<dyn Future<Output = HttpResponse> + Send>>;

/// The type for an async view function.
///
/// Wrapped in an `Arc` so the same constructed view can be shared between
/// route descriptors and across threads.
pub type ViewFunction = Arc<dyn Fn(HttpRequest) -> BoxFuture + Send + Sync>;

/// Wraps an async closure into a [`ViewFunction`].
///
/// # Examples
///
/// ```
/// use axum::response::IntoResponse;
/// use viewset_rs_views::views::function::{view_function, HttpRequest};
///
/// let view = view_function(|_request: HttpRequest| async { "Hello!".into_response() });
/// ```
pub fn view_function<F, Fut>(f: F) -> ViewFunction
where
    F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HttpResponse> + Send + 'static,
{
    Arc::new(move |request: HttpRequest| -> BoxFuture { Box::pin(f(request)) })
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::response::IntoResponse;

    use super::*;

    #[tokio::test]
    async fn test_view_function_is_callable() {
        let view = view_function(|request: HttpRequest| async move {
            format!("path={}", request.uri().path()).into_response()
        });
        let request = http::Request::builder()
            .uri("/crud/1/read/")
            .body(Body::empty())
            .unwrap();
        let response = view(request).await;
        assert_eq!(response.status(), http::StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"path=/crud/1/read/");
    }

    #[tokio::test]
    async fn test_view_function_clones_share_handler() {
        let view = view_function(|_request: HttpRequest| async { "shared".into_response() });
        let clone = Arc::clone(&view);
        let response = clone(http::Request::new(Body::empty())).await;
        assert_eq!(response.status(), http::StatusCode::OK);
        assert_eq!(Arc::strong_count(&view), 2);
    }
}
