use crate::container::BoxError;
use std::fmt;

/// The pipeline step a [`NamingError`] was raised from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Parse,
    Dispatch,
    Delegate,
    Directory,
    Config,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Parse => "parse",
            Stage::Dispatch => "dispatch",
            Stage::Delegate => "delegate",
            Stage::Directory => "directory",
            Stage::Config => "config",
        };
        f.write_str(label)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NamingError {
    #[error("Invalid resource identifier {0:?}: a non-empty name is required")]
    InvalidName(String),
    #[error("Malformed resource identifier {name:?}: can't tokenize {fragment:?}")]
    MalformedIdentifier { fragment: String, name: String },
    #[error("Resource identifier {name:?} doesn't name a bean class")]
    MissingClassName { name: String },
    #[error("Invalid value {value:?} for property {key:?}")]
    InvalidProperty { key: String, value: String },
    #[error("Can't lookup enterprise bean with identifier {name:?}: neither local nor remote")]
    AmbiguousScope { name: String },
    #[error("Local lookup of {name:?} requires an application context, but none is available")]
    MissingApplicationContext { name: String },
    #[error("No {interface} connection factory configured to lookup {name:?}")]
    NoConnectionFactory {
        name: String,
        interface: &'static str,
    },
    #[error("Bean container failed to lookup {name:?}: {source}")]
    Delegation {
        name: String,
        #[source]
        source: BoxError,
    },
    #[error("Name {name:?} is not bound in the naming directory")]
    NotFound { name: String },
    #[error("Value bound to {name:?} is not a {expected}")]
    TypeMismatch { name: String, expected: &'static str },
    #[error("Callback bound to {name:?} failed: {source}")]
    Callback {
        name: String,
        #[source]
        source: BoxError,
    },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NamingError {
    pub fn stage(&self) -> Stage {
        match self {
            NamingError::InvalidName(_)
            | NamingError::MalformedIdentifier { .. }
            | NamingError::MissingClassName { .. }
            | NamingError::InvalidProperty { .. } => Stage::Parse,
            NamingError::AmbiguousScope { .. }
            | NamingError::MissingApplicationContext { .. }
            | NamingError::NoConnectionFactory { .. } => Stage::Dispatch,
            NamingError::Delegation { .. } => Stage::Delegate,
            NamingError::NotFound { .. }
            | NamingError::TypeMismatch { .. }
            | NamingError::Callback { .. } => Stage::Directory,
            NamingError::Config(_) | NamingError::Io(_) | NamingError::Json(_) => Stage::Config,
        }
    }

    /// Hands back the bean container's own error for delegation failures.
    pub fn into_delegation_source(self) -> Result<BoxError, NamingError> {
        match self {
            NamingError::Delegation { source, .. } => Ok(source),
            other => Err(other),
        }
    }
}

pub type NamingResult<T> = std::result::Result<T, NamingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("connection refused")]
    struct Refused;

    #[test]
    fn test_stage_classification() {
        let err = NamingError::MalformedIdentifier {
            fragment: " x".to_string(),
            name: "php:app x".to_string(),
        };
        assert_eq!(err.stage(), Stage::Parse);
        assert!(err.to_string().contains("php:app x"));

        let err = NamingError::AmbiguousScope {
            name: "php:app/Foo".to_string(),
        };
        assert_eq!(err.stage(), Stage::Dispatch);
    }

    #[test]
    fn test_delegation_source_is_preserved() {
        let err = NamingError::Delegation {
            name: "php:app/Foo/local".to_string(),
            source: Box::new(Refused),
        };
        assert_eq!(err.stage(), Stage::Delegate);

        let source = err.into_delegation_source().unwrap();
        assert!(source.downcast_ref::<Refused>().is_some());
    }
}
