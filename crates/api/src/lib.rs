pub mod container;
pub mod error;
pub mod properties;

// Re-export commonly used types
pub use container::{
    Application, BeanContext, BoxError, Connection, ContainerResult, ContextSession,
    LocalConnectionFactory, Object, RemoteConnectionFactory, RemoteEndpoint, RequestContext,
};
pub use error::{NamingError, NamingResult, Stage};
pub use properties::{Properties, PropertySource};
