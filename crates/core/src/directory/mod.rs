//! Hierarchical naming directory.
//!
//! A directory maps local names to [`Binding`]s. Bindings are kept in a
//! sharded concurrent map, so operations on one name are serialized while
//! different names proceed in parallel, and a directory can be shared across
//! request handlers behind an `Arc`.

mod binding;
mod tree;

pub use binding::{Binding, BindingFilter, Callback};
pub use tree::{DirectoryId, DirectoryNode, DirectoryTree};

use dashmap::DashMap;
use naming_api::{ContainerResult, NamingError, NamingResult, Object};
use std::any::Any;
use std::sync::Arc;

pub struct NamingDirectory {
    id: DirectoryId,
    parent: Option<DirectoryId>,
    name: String,
    /// Names from the root down to this directory, fixed at creation.
    path: Vec<String>,
    scheme: String,
    tree: Arc<DirectoryTree>,
    bindings: DashMap<String, Arc<Binding>>,
}

impl NamingDirectory {
    /// Create a root directory with its own tree.
    pub fn new(name: impl Into<String>, scheme: impl Into<String>) -> Self {
        Self::with_tree(Arc::new(DirectoryTree::new()), name, scheme)
    }

    /// Create a root directory registered in an existing tree.
    pub fn with_tree(
        tree: Arc<DirectoryTree>,
        name: impl Into<String>,
        scheme: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let id = tree.register(None, &name);
        Self {
            id,
            parent: None,
            path: vec![name.clone()],
            name,
            scheme: scheme.into(),
            tree,
            bindings: DashMap::new(),
        }
    }

    pub fn id(&self) -> DirectoryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Id the parent had when this directory was created. The parent may
    /// since have been dropped.
    pub fn parent(&self) -> Option<DirectoryId> {
        self.parent
    }

    pub fn tree(&self) -> &Arc<DirectoryTree> {
        &self.tree
    }

    /// Qualified name, e.g. `php:global/example/env`.
    pub fn identifier(&self) -> String {
        format!("{}:{}", self.scheme, self.path.join("/"))
    }

    pub fn bind<T: Any + Send + Sync>(&self, name: &str, value: T) {
        self.bind_binding(name, Binding::value(value));
    }

    /// Bind an already shared object without wrapping it again.
    pub fn bind_object(&self, name: &str, value: Object) {
        self.bind_binding(name, Binding::Value(value));
    }

    pub fn bind_callback<F>(&self, name: &str, callback: F, args: Vec<Object>)
    where
        F: Fn(&[Object]) -> ContainerResult<Object> + Send + Sync + 'static,
    {
        self.bind_binding(name, Binding::factory(callback, args));
    }

    pub fn bind_binding(&self, name: &str, binding: Binding) {
        tracing::trace!(
            "Binding {} in {} (factory: {})",
            name,
            self.identifier(),
            binding.is_factory()
        );
        self.bindings.insert(name.to_string(), Arc::new(binding));
    }

    /// Resolve `name`: values are returned as bound, factories are invoked
    /// with their bound arguments followed by `args`.
    pub fn search(&self, name: &str, args: &[Object]) -> NamingResult<Object> {
        // Snapshot under the shard lock, invoke after releasing it.
        let binding = self.snapshot(name)?;
        binding.resolve(args).map_err(|source| NamingError::Callback {
            name: name.to_string(),
            source,
        })
    }

    pub fn search_as<T: Any + Send + Sync>(&self, name: &str, args: &[Object]) -> NamingResult<Arc<T>> {
        self.search(name, args)?
            .downcast::<T>()
            .map_err(|_| NamingError::TypeMismatch {
                name: name.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    /// The raw binding under `name`; factories are not invoked.
    pub fn get(&self, name: &str) -> NamingResult<Binding> {
        self.snapshot(name).map(|binding| (*binding).clone())
    }

    pub fn remove(&self, name: &str) -> Option<Binding> {
        self.bindings
            .remove(name)
            .map(|(_, binding)| (*binding).clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.bindings.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Create a child directory holding a copy of the bindings `filter`
    /// accepts. The copy is detached: later changes on either side are not
    /// visible to the other.
    pub fn create_subdirectory(&self, name: &str, filter: &BindingFilter) -> NamingDirectory {
        let id = self.tree.register(Some(self.id), name);
        let bindings = DashMap::new();
        for entry in self.bindings.iter() {
            if filter.accepts(entry.key()) {
                bindings.insert(entry.key().clone(), entry.value().clone());
            }
        }

        let mut path = self.path.clone();
        path.push(name.to_string());

        let subdirectory = NamingDirectory {
            id,
            parent: Some(self.id),
            name: name.to_string(),
            path,
            scheme: self.scheme.clone(),
            tree: self.tree.clone(),
            bindings,
        };
        tracing::debug!(
            "Created subdirectory {} with {} bindings",
            subdirectory.identifier(),
            subdirectory.len()
        );
        subdirectory
    }

    fn snapshot(&self, name: &str) -> NamingResult<Arc<Binding>> {
        self.bindings
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| NamingError::NotFound {
                name: name.to_string(),
            })
    }
}

impl std::fmt::Debug for NamingDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamingDirectory")
            .field("id", &self.id)
            .field("identifier", &self.identifier())
            .field("bindings", &self.names())
            .finish()
    }
}

impl Drop for NamingDirectory {
    fn drop(&mut self) {
        self.tree.unregister(self.id);
    }
}
