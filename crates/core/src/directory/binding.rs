use naming_api::{ContainerResult, Object};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// A deferred value, invoked with the bound arguments followed by the
/// arguments of the search.
pub type Callback = Arc<dyn Fn(&[Object]) -> ContainerResult<Object> + Send + Sync>;

#[derive(Clone)]
pub enum Binding {
    Value(Object),
    Factory { callback: Callback, args: Vec<Object> },
}

impl Binding {
    pub fn value<T: std::any::Any + Send + Sync>(value: T) -> Self {
        Binding::Value(Arc::new(value))
    }

    pub fn factory<F>(callback: F, args: Vec<Object>) -> Self
    where
        F: Fn(&[Object]) -> ContainerResult<Object> + Send + Sync + 'static,
    {
        Binding::Factory {
            callback: Arc::new(callback),
            args,
        }
    }

    pub fn is_factory(&self) -> bool {
        matches!(self, Binding::Factory { .. })
    }

    pub fn as_value(&self) -> Option<&Object> {
        match self {
            Binding::Value(value) => Some(value),
            Binding::Factory { .. } => None,
        }
    }

    pub fn as_callback(&self) -> Option<&Callback> {
        match self {
            Binding::Value(_) => None,
            Binding::Factory { callback, .. } => Some(callback),
        }
    }

    pub(crate) fn resolve(&self, call_args: &[Object]) -> ContainerResult<Object> {
        match self {
            Binding::Value(value) => Ok(value.clone()),
            Binding::Factory { callback, args } => {
                let mut merged = Vec::with_capacity(args.len() + call_args.len());
                merged.extend(args.iter().cloned());
                merged.extend(call_args.iter().cloned());
                callback(&merged)
            }
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Value(_) => f.write_str("Binding::Value(..)"),
            Binding::Factory { args, .. } => f
                .debug_struct("Binding::Factory")
                .field("args", &args.len())
                .finish_non_exhaustive(),
        }
    }
}

/// Which bindings a new subdirectory copies from its parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BindingFilter {
    #[default]
    All,
    Include(HashSet<String>),
    Exclude(HashSet<String>),
}

impl BindingFilter {
    pub fn include<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BindingFilter::Include(names.into_iter().map(Into::into).collect())
    }

    pub fn exclude<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BindingFilter::Exclude(names.into_iter().map(Into::into).collect())
    }

    pub fn accepts(&self, name: &str) -> bool {
        match self {
            BindingFilter::All => true,
            BindingFilter::Include(names) => names.contains(name),
            BindingFilter::Exclude(names) => !names.contains(name),
        }
    }
}
