use naming_api::{
    Application, BeanContext, Connection, ContainerResult, ContextSession, LocalConnectionFactory,
    Object, RemoteConnectionFactory, RemoteEndpoint, RequestContext,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug)]
pub struct TestApplication(pub &'static str);

impl Application for TestApplication {
    fn name(&self) -> &str {
        self.0
    }
}

#[allow(dead_code)]
pub fn application(name: &'static str) -> Arc<dyn Application> {
    Arc::new(TestApplication(name))
}

pub struct TestRequest {
    pub session_id: Option<String>,
    pub application: Option<Arc<dyn Application>>,
}

impl RequestContext for TestRequest {
    fn session_id(&self) -> Option<String> {
        self.session_id.clone()
    }

    fn application(&self) -> Option<Arc<dyn Application>> {
        self.application.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Local(String),
    Remote(RemoteEndpoint),
}

/// What the mock container hands out instead of a real bean proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeanProxy {
    pub class_name: String,
    pub session_id: String,
    pub target: Target,
}

#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    #[error("unknown bean {0}")]
    UnknownBean(String),
    #[error("connection refused by {0}")]
    Refused(String),
}

/// Serves both local and remote connections and counts how many were opened.
#[derive(Default)]
pub struct MockContainer {
    pub connections: AtomicUsize,
    pub known_beans: Vec<&'static str>,
    pub refuse_connections: bool,
}

impl MockContainer {
    pub fn with_beans(beans: &[&'static str]) -> Arc<Self> {
        Arc::new(Self {
            known_beans: beans.to_vec(),
            ..Self::default()
        })
    }

    #[allow(dead_code)]
    pub fn refusing() -> Arc<Self> {
        Arc::new(Self {
            refuse_connections: true,
            ..Self::default()
        })
    }

    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    fn connect(&self, target: Target) -> ContainerResult<Box<dyn Connection>> {
        if self.refuse_connections {
            return Err(Box::new(ContainerError::Refused(format!("{target:?}"))));
        }
        self.connections.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockConnection {
            target,
            known_beans: self.known_beans.clone(),
        }))
    }
}

impl LocalConnectionFactory for MockContainer {
    fn create_connection(
        &self,
        application: Arc<dyn Application>,
    ) -> ContainerResult<Box<dyn Connection>> {
        self.connect(Target::Local(application.name().to_string()))
    }
}

impl RemoteConnectionFactory for MockContainer {
    fn create_connection(&self, endpoint: RemoteEndpoint) -> ContainerResult<Box<dyn Connection>> {
        self.connect(Target::Remote(endpoint))
    }
}

struct MockConnection {
    target: Target,
    known_beans: Vec<&'static str>,
}

impl Connection for MockConnection {
    fn create_context_session(&self) -> ContainerResult<Box<dyn ContextSession>> {
        Ok(Box::new(MockSession {
            target: self.target.clone(),
            known_beans: self.known_beans.clone(),
            session_id: None,
        }))
    }
}

struct MockSession {
    target: Target,
    known_beans: Vec<&'static str>,
    session_id: Option<String>,
}

impl ContextSession for MockSession {
    fn set_session_id(&mut self, session_id: String) {
        self.session_id = Some(session_id);
    }

    fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    fn create_initial_context(&self) -> ContainerResult<Box<dyn BeanContext>> {
        Ok(Box::new(MockBeanContext {
            target: self.target.clone(),
            known_beans: self.known_beans.clone(),
            session_id: self.session_id.clone().unwrap_or_default(),
        }))
    }
}

struct MockBeanContext {
    target: Target,
    known_beans: Vec<&'static str>,
    session_id: String,
}

impl BeanContext for MockBeanContext {
    fn lookup(&self, class_name: &str) -> ContainerResult<Object> {
        if !self.known_beans.iter().any(|bean| *bean == class_name) {
            return Err(Box::new(ContainerError::UnknownBean(class_name.to_string())));
        }
        Ok(Arc::new(BeanProxy {
            class_name: class_name.to_string(),
            session_id: self.session_id.clone(),
            target: self.target.clone(),
        }))
    }
}
