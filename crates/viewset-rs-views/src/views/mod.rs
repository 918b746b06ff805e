//! View types used by viewsets.
//!
//! - [`function`] - View functions, the constructed form of every view
//! - [`class_based`] - The `View` trait with HTTP method dispatch
//! - [`view_class`] - View classes: kwargs validation and construction

pub mod class_based;
pub mod function;
pub mod view_class;

pub use class_based::View;
pub use function::{view_function, BoxFuture, HttpRequest, HttpResponse, ViewFunction};
pub use view_class::{FunctionViewClass, ViewClass, ViewInit, ViewType};
