//! Seams to the bean container.
//!
//! The naming core never talks to a transport itself. It picks a connection
//! factory, opens a context session and delegates the final lookup through
//! these traits, which the hosting runtime implements.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type ContainerResult<T> = std::result::Result<T, BoxError>;

/// A shared, type-erased object reference: a bean proxy or a bound value.
pub type Object = Arc<dyn Any + Send + Sync>;

/// The deployed application a local lookup is bound to.
pub trait Application: Send + Sync + Debug {
    fn name(&self) -> &str;
}

/// Inbound request state that can carry session affinity.
pub trait RequestContext: Send + Sync {
    /// Session id of the inbound request, if it already has one.
    fn session_id(&self) -> Option<String>;

    /// Request-scoped application, preferred over the context's own.
    fn application(&self) -> Option<Arc<dyn Application>>;
}

/// Where a remote connection should point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEndpoint {
    pub port: Option<u16>,
    pub address: Option<String>,
    pub transport: String,
    pub app_name: Option<String>,
}

pub trait LocalConnectionFactory: Send + Sync {
    fn create_connection(
        &self,
        application: Arc<dyn Application>,
    ) -> ContainerResult<Box<dyn Connection>>;
}

pub trait RemoteConnectionFactory: Send + Sync {
    fn create_connection(&self, endpoint: RemoteEndpoint) -> ContainerResult<Box<dyn Connection>>;
}

pub trait Connection: Send {
    fn create_context_session(&self) -> ContainerResult<Box<dyn ContextSession>>;
}

pub trait ContextSession: Send {
    fn set_session_id(&mut self, session_id: String);

    fn session_id(&self) -> Option<&str>;

    fn create_initial_context(&self) -> ContainerResult<Box<dyn BeanContext>>;
}

/// The container-side context that finally hands out bean references.
pub trait BeanContext: Send {
    fn lookup(&self, class_name: &str) -> ContainerResult<Object>;
}
