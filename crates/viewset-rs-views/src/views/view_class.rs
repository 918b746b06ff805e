//! View classes: the things a named view wraps.
//!
//! A [`ViewClass`] knows which keyword arguments it accepts and how to build a
//! [`ViewFunction`] from them. Passing a keyword it does not accept fails
//! construction with [`ViewError::UnexpectedKwarg`], which is why a viewset
//! only injects itself into view classes that accept the `viewset` keyword.
//!
//! There are two ready-made ways to get a view class:
//!
//! - [`ViewType<T>`] for a struct implementing [`View`] and [`ViewInit`].
//! - [`FunctionViewClass`] for a closure that builds the view function.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use viewset_rs_core::ViewError;

use super::class_based::View;
use super::function::ViewFunction;
use crate::kwargs::{ViewKwargs, VIEWSET_KWARG};

/// A constructible view type.
pub trait ViewClass: Send + Sync {
    /// The name of the view class, used in error messages and `Display` output.
    fn class_name(&self) -> &str;

    /// Returns `true` if the view class accepts `kwarg` at construction time.
    fn accepts(&self, kwarg: &str) -> bool;

    /// Builds the view function from already-validated kwargs.
    fn build(&self, kwargs: ViewKwargs) -> Result<ViewFunction, ViewError>;

    /// Validates `kwargs` against [`accepts`](Self::accepts) and builds the view.
    #[allow(clippy::wrong_self_convention)]
    fn as_view(&self, kwargs: ViewKwargs) -> Result<ViewFunction, ViewError> {
        if let Some(kwarg) = kwargs.keys().find(|key| !self.accepts(key)) {
            return Err(ViewError::UnexpectedKwarg {
                view: self.class_name().to_string(),
                kwarg: kwarg.to_string(),
            });
        }
        self.build(kwargs)
    }

    /// Returns `true` if a viewset may inject itself into this view class.
    fn accepts_viewset(&self) -> bool {
        self.accepts(VIEWSET_KWARG)
    }
}

impl<V: ViewClass + ?Sized> ViewClass for Arc<V> {
    fn class_name(&self) -> &str {
        (**self).class_name()
    }

    fn accepts(&self, kwarg: &str) -> bool {
        (**self).accepts(kwarg)
    }

    fn build(&self, kwargs: ViewKwargs) -> Result<ViewFunction, ViewError> {
        (**self).build(kwargs)
    }

    fn as_view(&self, kwargs: ViewKwargs) -> Result<ViewFunction, ViewError> {
        (**self).as_view(kwargs)
    }
}

/// A view that can be constructed from keyword arguments.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use axum::response::IntoResponse;
/// use viewset_rs_core::ViewError;
/// use viewset_rs_views::kwargs::ViewKwargs;
/// use viewset_rs_views::views::{HttpRequest, HttpResponse, View, ViewInit};
///
/// struct Greeting {
///     text: String,
/// }
///
/// #[async_trait]
/// impl View for Greeting {
///     async fn get(&self, _request: HttpRequest) -> HttpResponse {
///         self.text.clone().into_response()
///     }
/// }
///
/// impl ViewInit for Greeting {
///     const ATTRIBUTES: &'static [&'static str] = &["text"];
///
///     fn from_kwargs(kwargs: ViewKwargs) -> Result<Self, ViewError> {
///         let text = kwargs.get_str("text").unwrap_or("hello").to_string();
///         Ok(Self { text })
///     }
/// }
/// ```
pub trait ViewInit: View + Sized + 'static {
    /// The keyword arguments [`from_kwargs`](Self::from_kwargs) understands.
    const ATTRIBUTES: &'static [&'static str];

    /// Constructs the view from its keyword arguments.
    fn from_kwargs(kwargs: ViewKwargs) -> Result<Self, ViewError>;
}

/// The [`ViewClass`] of a [`ViewInit`] view struct.
pub struct ViewType<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T: ViewInit> ViewType<T> {
    /// Creates the view class for `T`, named after the type.
    pub fn new() -> Self {
        Self {
            name: short_type_name::<T>(),
            _marker: PhantomData,
        }
    }

    /// Creates the view class for `T` under an explicit name.
    pub const fn named(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }
}

impl<T: ViewInit> Default for ViewType<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ViewType<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ViewType<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ViewType").field(&self.name).finish()
    }
}

impl<T: ViewInit> ViewClass for ViewType<T> {
    fn class_name(&self) -> &str {
        self.name
    }

    fn accepts(&self, kwarg: &str) -> bool {
        T::ATTRIBUTES.iter().any(|attribute| *attribute == kwarg)
    }

    fn build(&self, kwargs: ViewKwargs) -> Result<ViewFunction, ViewError> {
        Ok(T::from_kwargs(kwargs)?.as_view())
    }
}

type ViewFactory = dyn Fn(ViewKwargs) -> Result<ViewFunction, ViewError> + Send + Sync;

/// A [`ViewClass`] backed by a closure.
///
/// # Examples
///
/// ```
/// use axum::response::IntoResponse;
/// use viewset_rs_views::views::{view_function, FunctionViewClass, HttpRequest};
///
/// let index = FunctionViewClass::new("IndexView", &["greeting"], |kwargs| {
///     let greeting = kwargs.get_str("greeting").unwrap_or("hi").to_string();
///     Ok(view_function(move |_request: HttpRequest| {
///         let greeting = greeting.clone();
///         async move { greeting.into_response() }
///     }))
/// });
/// ```
#[derive(Clone)]
pub struct FunctionViewClass {
    name: String,
    attributes: Vec<String>,
    factory: Arc<ViewFactory>,
}

impl FunctionViewClass {
    /// Creates a view class named `name` that accepts `attributes`.
    pub fn new<F>(name: &str, attributes: &[&str], factory: F) -> Self
    where
        F: Fn(ViewKwargs) -> Result<ViewFunction, ViewError> + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            attributes: attributes.iter().map(|a| (*a).to_string()).collect(),
            factory: Arc::new(factory),
        }
    }
}

impl fmt::Debug for FunctionViewClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionViewClass")
            .field("name", &self.name)
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}

impl ViewClass for FunctionViewClass {
    fn class_name(&self) -> &str {
        &self.name
    }

    fn accepts(&self, kwarg: &str) -> bool {
        self.attributes.iter().any(|a| a == kwarg)
    }

    fn build(&self, kwargs: ViewKwargs) -> Result<ViewFunction, ViewError> {
        (self.factory)(kwargs)
    }
}

/// Returns the last path segment of a type name, without generic arguments.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
