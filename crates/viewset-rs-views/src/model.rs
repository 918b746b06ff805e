//! Model-bound viewsets.
//!
//! A [`ModelViewSet`] carries a [`ModelRef`] and hands it to every view class
//! that accepts the `model` keyword, so generic CRUD views can share one
//! declaration and be pointed at different models.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use viewset_rs_core::ViewSetError;

use crate::kwargs::{KwargValue, ViewKwargs, MODEL_KWARG};
use crate::named::NamedView;
use crate::registry::DeclareViews;
use crate::viewset::{ViewSet, ViewSetState};

/// A reference to a domain model, identified by app label and model name.
///
/// # Examples
///
/// ```
/// use viewset_rs_views::model::ModelRef;
///
/// let post: ModelRef = "blog.Post".parse().unwrap();
/// assert_eq!(post.app_label(), "blog");
/// assert_eq!(post.label_lower(), "blog.post");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelRef {
    app_label: String,
    model_name: String,
}

impl ModelRef {
    /// Creates a model reference.
    pub fn new(app_label: &str, model_name: &str) -> Self {
        Self {
            app_label: app_label.to_string(),
            model_name: model_name.to_string(),
        }
    }

    /// Returns the app label.
    pub fn app_label(&self) -> &str {
        &self.app_label
    }

    /// Returns the model name.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Returns `app_label.ModelName`.
    pub fn label(&self) -> String {
        format!("{}.{}", self.app_label, self.model_name)
    }

    /// Returns the label in lowercase.
    pub fn label_lower(&self) -> String {
        self.label().to_lowercase()
    }
}

impl fmt::Display for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.app_label, self.model_name)
    }
}

impl FromStr for ModelRef {
    type Err = ViewSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('.') {
            Some((app_label, model_name))
                if !app_label.is_empty() && !model_name.is_empty() && !model_name.contains('.') =>
            {
                Ok(Self::new(app_label, model_name))
            }
            _ => Err(ViewSetError::ConfigurationError(format!(
                "model reference '{s}' must be of the form 'app_label.ModelName'"
            ))),
        }
    }
}

/// A viewset bound to a model, with views declared by `D`.
pub struct ModelViewSet<D> {
    state: ViewSetState,
    model: ModelRef,
    _marker: PhantomData<fn() -> D>,
}

impl<D: DeclareViews> ModelViewSet<D> {
    /// Creates a viewset for `model` without a URL-name prefix.
    pub fn new(model: ModelRef) -> Self {
        Self::from_state(ViewSetState::new::<D>(None), model)
    }

    /// Creates a viewset for `model` whose URL names are prefixed with `prefix`.
    pub fn with_prefix(model: ModelRef, prefix: &str) -> Self {
        Self::from_state(ViewSetState::new::<D>(Some(prefix)), model)
    }

    /// Creates a viewset for `model` from prepared state.
    pub const fn from_state(state: ViewSetState, model: ModelRef) -> Self {
        Self {
            state,
            model,
            _marker: PhantomData,
        }
    }

    /// Returns the model this viewset is bound to.
    pub const fn model(&self) -> &ModelRef {
        &self.model
    }
}

impl<D> fmt::Debug for ModelViewSet<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelViewSet")
            .field("model", &self.model)
            .field("state", &self.state)
            .finish()
    }
}

impl<D: DeclareViews> ViewSet for ModelViewSet<D> {
    fn state(&self) -> &ViewSetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ViewSetState {
        &mut self.state
    }

    fn get_view_default_kwargs(&self, view: &NamedView) -> ViewKwargs {
        let mut kwargs = ViewKwargs::new();
        if view.view().accepts(MODEL_KWARG) {
            kwargs.insert(MODEL_KWARG, KwargValue::Model(self.model.clone()));
        }
        kwargs
    }
}
