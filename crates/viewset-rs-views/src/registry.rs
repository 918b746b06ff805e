//! Declaration collection and the ordered view registry.
//!
//! A viewset type lists its views in [`DeclareViews::declare_views`]. The
//! first time the views of a type are needed, [`class_views`] runs that
//! declaration, puts inherited views first, appends the type's own views in
//! creation order, and caches the resulting [`ViewRegistry`] for the type.
//! Callers always get a clone of the cached registry, so a viewset instance
//! can add views without touching its type, its parent, or its siblings.
//!
//! # Examples
//!
//! ```
//! use axum::response::IntoResponse;
//! use viewset_rs_views::named::url_view;
//! use viewset_rs_views::registry::{class_views, DeclareViews, ViewDeclarations};
//! use viewset_rs_views::views::{view_function, FunctionViewClass, HttpRequest};
//!
//! fn page(name: &str) -> FunctionViewClass {
//!     FunctionViewClass::new(name, &[], |_kwargs| {
//!         Ok(view_function(|_request: HttpRequest| async { "page".into_response() }))
//!     })
//! }
//!
//! struct Pages;
//!
//! impl DeclareViews for Pages {
//!     fn declare_views(views: &mut ViewDeclarations) {
//!         views
//!             .declare("home", url_view("^$", page("HomeView")))
//!             .declare("about", url_view("^about/$", page("AboutView")));
//!     }
//! }
//!
//! let registry = class_views::<Pages>();
//! assert_eq!(registry.keys().collect::<Vec<_>>(), ["home", "about"]);
//! ```

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use indexmap::IndexMap;

use crate::named::NamedView;

/// An ordered mapping from attribute name to [`NamedView`].
///
/// Inserting under an existing attribute replaces the entry in place.
#[derive(Clone, Default, Debug)]
pub struct ViewRegistry {
    views: IndexMap<String, NamedView>,
}

impl ViewRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `named_view` under `attribute`, returning the entry it replaced.
    ///
    /// The attribute becomes the view's name unless it already has one.
    pub fn insert(&mut self, attribute: &str, mut named_view: NamedView) -> Option<NamedView> {
        named_view.set_default_name(attribute);
        let previous = self.views.insert(attribute.to_string(), named_view);
        if previous.is_some() {
            tracing::debug!(attribute, "replaced viewset view");
        }
        previous
    }

    /// Returns the entry registered under `attribute`.
    pub fn get(&self, attribute: &str) -> Option<&NamedView> {
        self.views.get(attribute)
    }

    /// Returns the first entry whose name is `name`.
    pub fn find_by_name(&self, name: &str) -> Option<&NamedView> {
        self.views.values().find(|view| view.name() == Some(name))
    }

    /// Returns `true` if an entry is registered under `attribute`.
    pub fn contains(&self, attribute: &str) -> bool {
        self.views.contains_key(attribute)
    }

    /// Removes the entry registered under `attribute`, keeping the order of the rest.
    pub fn remove(&mut self, attribute: &str) -> Option<NamedView> {
        self.views.shift_remove(attribute)
    }

    /// Iterates over attribute names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.views.keys().map(String::as_str)
    }

    /// Iterates over the named views in order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, NamedView> {
        self.views.values()
    }

    /// Iterates over `(attribute, named view)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NamedView)> {
        self.views.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Returns `true` if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Copies every entry of `other` into `self`, in `other`'s order.
    fn merge(&mut self, other: &Self) {
        for (attribute, view) in &other.views {
            self.insert(attribute, view.clone());
        }
    }
}

/// Declares the views of a viewset type.
pub trait DeclareViews: 'static {
    /// Lists this type's views, and the types it inherits views from.
    fn declare_views(views: &mut ViewDeclarations);
}

/// Collects the declarations of one viewset type.
#[derive(Default)]
pub struct ViewDeclarations {
    inherited: ViewRegistry,
    declared: Vec<(String, NamedView)>,
}

impl ViewDeclarations {
    /// Inherits every view of `P`. Inherited views come before declared ones.
    ///
    /// Inheriting from several types merges them in call order; a later parent
    /// replaces same-named attributes of an earlier one in place.
    pub fn inherit<P: DeclareViews>(&mut self) -> &mut Self {
        self.inherited.merge(&class_views::<P>());
        self
    }

    /// Declares `view` under `attribute`.
    pub fn declare(&mut self, attribute: &str, view: NamedView) -> &mut Self {
        self.declared.push((attribute.to_string(), view));
        self
    }

    /// Builds the registry: inherited views, then declared views by creation order.
    pub fn finish(self) -> ViewRegistry {
        let Self {
            mut inherited,
            mut declared,
        } = self;
        declared.sort_by_key(|(_, view)| view.creation_counter());
        for (attribute, view) in declared {
            inherited.insert(&attribute, view);
        }
        inherited
    }
}

fn class_registries() -> &'static RwLock<HashMap<TypeId, ViewRegistry>> {
    static REGISTRIES: OnceLock<RwLock<HashMap<TypeId, ViewRegistry>>> = OnceLock::new();
    REGISTRIES.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Returns a copy of the views declared by `D`, including inherited ones.
///
/// The declaration runs once per type; later calls clone the cached registry.
pub fn class_views<D: DeclareViews>() -> ViewRegistry {
    let type_id = TypeId::of::<D>();
    if let Some(registry) = class_registries()
        .read()
        .expect("viewset registry lock poisoned")
        .get(&type_id)
    {
        return registry.clone();
    }

    // The lock is released here: declaring may resolve parent types.
    let mut declarations = ViewDeclarations::default();
    D::declare_views(&mut declarations);
    let registry = declarations.finish();
    tracing::debug!(
        viewset = std::any::type_name::<D>(),
        views = registry.len(),
        "collected viewset views"
    );

    class_registries()
        .write()
        .expect("viewset registry lock poisoned")
        .entry(type_id)
        .or_insert(registry)
        .clone()
}
