//! Keyword arguments passed to view classes at construction time.
//!
//! [`ViewKwargs`] is an insertion-ordered map from keyword to [`KwargValue`].
//! Plain configuration travels as JSON values; the two values a viewset
//! injects on its own, the model and the viewset itself, have dedicated
//! variants so views can read them back without downcasting.

use std::fmt;

use indexmap::IndexMap;
use viewset_rs_core::ViewError;

use crate::model::ModelRef;
use crate::viewset::ViewSetHandle;

/// The keyword under which a viewset injects itself.
pub const VIEWSET_KWARG: &str = "viewset";

/// The keyword under which a model-bound viewset injects its model.
pub const MODEL_KWARG: &str = "model";

/// A single keyword argument value.
#[derive(Clone)]
pub enum KwargValue {
    /// Plain configuration data.
    Value(serde_json::Value),
    /// A reference to a domain model.
    Model(ModelRef),
    /// The viewset that constructs the view.
    ViewSet(ViewSetHandle),
}

impl KwargValue {
    /// Returns the JSON value, if this is plain data.
    pub const fn as_value(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the string, if this is a JSON string.
    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(serde_json::Value::as_str)
    }

    /// Returns the model reference, if this is a model.
    pub const fn as_model(&self) -> Option<&ModelRef> {
        match self {
            Self::Model(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the viewset handle, if this is a viewset.
    pub const fn as_viewset(&self) -> Option<&ViewSetHandle> {
        match self {
            Self::ViewSet(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Debug for KwargValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Model(m) => f.debug_tuple("Model").field(m).finish(),
            Self::ViewSet(v) => f.debug_tuple("ViewSet").field(&v.class_name()).finish(),
        }
    }
}

impl From<serde_json::Value> for KwargValue {
    fn from(value: serde_json::Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for KwargValue {
    fn from(value: &str) -> Self {
        Self::Value(serde_json::Value::String(value.to_string()))
    }
}

impl From<String> for KwargValue {
    fn from(value: String) -> Self {
        Self::Value(serde_json::Value::String(value))
    }
}

impl From<bool> for KwargValue {
    fn from(value: bool) -> Self {
        Self::Value(serde_json::Value::Bool(value))
    }
}

impl From<i64> for KwargValue {
    fn from(value: i64) -> Self {
        Self::Value(serde_json::Value::from(value))
    }
}

impl From<ModelRef> for KwargValue {
    fn from(value: ModelRef) -> Self {
        Self::Model(value)
    }
}

impl From<ViewSetHandle> for KwargValue {
    fn from(value: ViewSetHandle) -> Self {
        Self::ViewSet(value)
    }
}

/// An insertion-ordered map of keyword arguments.
///
/// # Examples
///
/// ```
/// use viewset_rs_views::kwargs::ViewKwargs;
///
/// let kwargs = ViewKwargs::new()
///     .with("template_name", "post_detail.html")
///     .with("paginate", true);
/// assert_eq!(kwargs.get_str("template_name"), Some("post_detail.html"));
/// assert_eq!(kwargs.keys().collect::<Vec<_>>(), ["template_name", "paginate"]);
/// ```
#[derive(Clone, Default, Debug)]
pub struct ViewKwargs {
    inner: IndexMap<String, KwargValue>,
}

impl ViewKwargs {
    /// Creates an empty set of kwargs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a keyword argument, builder-style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<KwargValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a keyword argument, returning the previous value for that key.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<KwargValue>,
    ) -> Option<KwargValue> {
        self.inner.insert(key.into(), value.into())
    }

    /// Merges `other` into `self`; keys in `other` win.
    pub fn update(&mut self, other: Self) {
        self.inner.extend(other.inner);
    }

    /// Removes a keyword argument.
    pub fn remove(&mut self, key: &str) -> Option<KwargValue> {
        self.inner.shift_remove(key)
    }

    /// Returns the value for `key`.
    pub fn get(&self, key: &str) -> Option<&KwargValue> {
        self.inner.get(key)
    }

    /// Returns the string value for `key`, if it is a JSON string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(KwargValue::as_str)
    }

    /// Returns the JSON value for `key`, if it is plain data.
    pub fn get_value(&self, key: &str) -> Option<&serde_json::Value> {
        self.get(key).and_then(KwargValue::as_value)
    }

    /// Returns the injected model, if any.
    pub fn model(&self) -> Option<&ModelRef> {
        self.get(MODEL_KWARG).and_then(KwargValue::as_model)
    }

    /// Returns the injected viewset, if any.
    pub fn viewset(&self) -> Option<&ViewSetHandle> {
        self.get(VIEWSET_KWARG).and_then(KwargValue::as_viewset)
    }

    /// Returns the string value for `key` or a [`ViewError`] naming `view`.
    pub fn require_str(&self, view: &str, key: &str) -> Result<&str, ViewError> {
        match self.get(key) {
            None => Err(ViewError::MissingKwarg {
                view: view.to_string(),
                kwarg: key.to_string(),
            }),
            Some(value) => value.as_str().ok_or_else(|| ViewError::InvalidKwarg {
                kwarg: key.to_string(),
                expected: "a string".to_string(),
            }),
        }
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Iterates over the keywords in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    /// Iterates over `(keyword, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &KwargValue)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of keyword arguments.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if there are no keyword arguments.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ViewKwargs
where
    K: Into<String>,
    V: Into<KwargValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for ViewKwargs {
    type Item = (String, KwargValue);
    type IntoIter = indexmap::map::IntoIter<String, KwargValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}
