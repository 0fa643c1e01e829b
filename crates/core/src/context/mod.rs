//! Initial context: turns a bean identifier into a bean reference.
//!
//! A lookup runs through
//! `Start -> Parsed -> LocalDispatch | RemoteDispatch -> SessionBound -> Delegated -> Done`
//! and stops in `Failed` at the first failure. Nothing is retried or cached; retrying a
//! transport is up to the connection implementation.
//!
//! Example identifiers:
//!
//! - `php:app/UserProcessor/local` looks the bean up in the caller's own
//!   application.
//! - `php:global/example/UserProcessor/remote` connects to the `example`
//!   application on the configured host and port.

mod session;

pub use session::{generate_session_id, resolve_session_id};

use crate::config::ContextConfig;
use crate::lexer::Tokenizer;
use crate::model::{Interface, ResourceDescriptor};
use naming_api::{
    Application, BoxError, Connection, LocalConnectionFactory, NamingError, NamingResult, Object,
    RemoteConnectionFactory, RequestContext,
};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupState {
    Start,
    Parsed,
    LocalDispatch,
    RemoteDispatch,
    SessionBound,
    Delegated,
    Done,
    Failed,
}

impl LookupState {
    /// Terminal state for a finished lookup.
    pub fn outcome<T>(result: &NamingResult<T>) -> Self {
        match result {
            Ok(_) => LookupState::Done,
            Err(_) => LookupState::Failed,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, LookupState::Done | LookupState::Failed)
    }
}

impl fmt::Display for LookupState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Entry point for bean lookups.
///
/// Cloning is cheap; bind a clone to each inbound request with
/// [`InitialContext::with_request`].
#[derive(Clone)]
pub struct InitialContext {
    config: ContextConfig,
    tokenizer: Tokenizer,
    application: Option<Arc<dyn Application>>,
    request: Option<Arc<dyn RequestContext>>,
    local_factory: Option<Arc<dyn LocalConnectionFactory>>,
    remote_factory: Option<Arc<dyn RemoteConnectionFactory>>,
}

impl Default for InitialContext {
    fn default() -> Self {
        Self {
            config: ContextConfig::default(),
            tokenizer: Tokenizer::default(),
            application: None,
            request: None,
            local_factory: None,
            remote_factory: None,
        }
    }
}

impl InitialContext {
    pub fn new(config: ContextConfig) -> NamingResult<Self> {
        config.validate()?;
        let tokenizer = config.tokenizer()?;
        Ok(Self {
            config,
            tokenizer,
            ..Self::default()
        })
    }

    pub fn with_application(mut self, application: Arc<dyn Application>) -> Self {
        self.application = Some(application);
        self
    }

    pub fn with_request(mut self, request: Arc<dyn RequestContext>) -> Self {
        self.request = Some(request);
        self
    }

    pub fn with_local_factory(mut self, factory: Arc<dyn LocalConnectionFactory>) -> Self {
        self.local_factory = Some(factory);
        self
    }

    pub fn with_remote_factory(mut self, factory: Arc<dyn RemoteConnectionFactory>) -> Self {
        self.remote_factory = Some(factory);
        self
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn application(&self) -> Option<&Arc<dyn Application>> {
        self.application.as_ref()
    }

    pub fn request(&self) -> Option<&Arc<dyn RequestContext>> {
        self.request.as_ref()
    }

    /// Parse `name` into a descriptor seeded with this context's defaults.
    pub fn prepare_descriptor(&self, name: &str) -> NamingResult<ResourceDescriptor> {
        let tokens = self.tokenizer.tokenize(name)?;
        ResourceDescriptor::from_tokens(name, &tokens, &self.config.properties)
    }

    /// Look up the enterprise bean identified by `name`.
    pub fn lookup(&self, name: &str) -> NamingResult<Object> {
        let result = self.run_lookup(name);
        trace_state(name, LookupState::outcome(&result));
        if let Err(e) = &result {
            tracing::warn!("Lookup of {:?} failed at {} stage: {}", name, e.stage(), e);
        }
        result
    }

    fn run_lookup(&self, name: &str) -> NamingResult<Object> {
        trace_state(name, LookupState::Start);
        if name.trim().is_empty() {
            return Err(NamingError::InvalidName(name.to_string()));
        }

        let descriptor = self.prepare_descriptor(name)?;
        trace_state(name, LookupState::Parsed);

        let connection = match descriptor.interface() {
            Interface::Remote => {
                trace_state(name, LookupState::RemoteDispatch);
                self.remote_connection(name, &descriptor)?
            }
            Interface::Local => {
                trace_state(name, LookupState::LocalDispatch);
                self.local_connection(name)?
            }
            Interface::Unset => {
                return Err(NamingError::AmbiguousScope {
                    name: name.to_string(),
                });
            }
        };

        self.delegate(name, &descriptor, connection.as_ref())
    }

    fn remote_connection(
        &self,
        name: &str,
        descriptor: &ResourceDescriptor,
    ) -> NamingResult<Box<dyn Connection>> {
        let factory = self
            .remote_factory
            .as_ref()
            .ok_or_else(|| NamingError::NoConnectionFactory {
                name: name.to_string(),
                interface: "remote",
            })?;

        let endpoint = descriptor.remote_endpoint();
        tracing::debug!(
            "Connecting to {}://{}:{} for application {:?}",
            endpoint.transport,
            endpoint.address.as_deref().unwrap_or("-"),
            endpoint.port.map(|p| p.to_string()).unwrap_or_default(),
            endpoint.app_name
        );
        factory
            .create_connection(endpoint)
            .map_err(|source| delegation(name, source))
    }

    fn local_connection(&self, name: &str) -> NamingResult<Box<dyn Connection>> {
        // A request-scoped application wins over the context's own.
        let application = self
            .request
            .as_ref()
            .and_then(|request| request.application())
            .or_else(|| self.application.clone())
            .ok_or_else(|| NamingError::MissingApplicationContext {
                name: name.to_string(),
            })?;

        let factory = self
            .local_factory
            .as_ref()
            .ok_or_else(|| NamingError::NoConnectionFactory {
                name: name.to_string(),
                interface: "local",
            })?;

        tracing::debug!("Connecting to local application {}", application.name());
        factory
            .create_connection(application)
            .map_err(|source| delegation(name, source))
    }

    fn delegate(
        &self,
        name: &str,
        descriptor: &ResourceDescriptor,
        connection: &dyn Connection,
    ) -> NamingResult<Object> {
        let mut session = connection
            .create_context_session()
            .map_err(|source| delegation(name, source))?;

        session.set_session_id(resolve_session_id(self.request.as_deref()));
        trace_state(name, LookupState::SessionBound);

        let bean = session
            .create_initial_context()
            .and_then(|context| context.lookup(descriptor.class_name()))
            .map_err(|source| delegation(name, source))?;
        trace_state(name, LookupState::Delegated);

        Ok(bean)
    }
}

impl fmt::Debug for InitialContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitialContext")
            .field("config", &self.config)
            .field("application", &self.application)
            .field("has_request", &self.request.is_some())
            .field("has_local_factory", &self.local_factory.is_some())
            .field("has_remote_factory", &self.remote_factory.is_some())
            .finish()
    }
}

fn delegation(name: &str, source: BoxError) -> NamingError {
    NamingError::Delegation {
        name: name.to_string(),
        source,
    }
}

fn trace_state(name: &str, state: LookupState) {
    tracing::debug!("Lookup {:?}: {}", name, state);
}
