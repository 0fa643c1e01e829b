//! Bean naming: parses JNDI style identifiers, keeps a shared naming
//! directory and dispatches lookups to local or remote bean containers.

pub mod config;
pub mod context;
pub mod directory;
pub mod lexer;
pub mod logging;
pub mod model;

pub use config::ContextConfig;
pub use context::{InitialContext, LookupState};
pub use directory::{Binding, BindingFilter, NamingDirectory};
pub use lexer::{Token, TokenKind, Tokenizer};
pub use model::{Interface, ResourceDescriptor};
pub use naming_api::{NamingError, NamingResult};
