//! Dry-run lookups: the real pipeline runs against a container that records
//! where it would have connected instead of talking to one.

use naming_api::{
    Application, BeanContext, Connection, ContainerResult, ContextSession, LocalConnectionFactory,
    Object, RemoteConnectionFactory, RemoteEndpoint, RequestContext,
};
use naming_core::{ContextConfig, InitialContext};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug)]
struct NamedApplication(String);

impl Application for NamedApplication {
    fn name(&self) -> &str {
        &self.0
    }
}

struct CliRequest {
    session_id: Option<String>,
}

impl RequestContext for CliRequest {
    fn session_id(&self) -> Option<String> {
        self.session_id.clone()
    }

    fn application(&self) -> Option<Arc<dyn Application>> {
        None
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "interface", rename_all = "lowercase")]
enum Route {
    Local { application: String },
    Remote { endpoint: RemoteEndpoint },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupPlan {
    route: Route,
    session_id: Option<String>,
    class_name: String,
}

struct RecordingContainer;

impl LocalConnectionFactory for RecordingContainer {
    fn create_connection(
        &self,
        application: Arc<dyn Application>,
    ) -> ContainerResult<Box<dyn Connection>> {
        Ok(Box::new(RecordingConnection(Route::Local {
            application: application.name().to_string(),
        })))
    }
}

impl RemoteConnectionFactory for RecordingContainer {
    fn create_connection(&self, endpoint: RemoteEndpoint) -> ContainerResult<Box<dyn Connection>> {
        Ok(Box::new(RecordingConnection(Route::Remote { endpoint })))
    }
}

struct RecordingConnection(Route);

impl Connection for RecordingConnection {
    fn create_context_session(&self) -> ContainerResult<Box<dyn ContextSession>> {
        Ok(Box::new(RecordingSession {
            route: self.0.clone(),
            session_id: None,
        }))
    }
}

struct RecordingSession {
    route: Route,
    session_id: Option<String>,
}

impl ContextSession for RecordingSession {
    fn set_session_id(&mut self, session_id: String) {
        self.session_id = Some(session_id);
    }

    fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    fn create_initial_context(&self) -> ContainerResult<Box<dyn BeanContext>> {
        Ok(Box::new(RecordingBeanContext {
            route: self.route.clone(),
            session_id: self.session_id.clone(),
        }))
    }
}

struct RecordingBeanContext {
    route: Route,
    session_id: Option<String>,
}

impl BeanContext for RecordingBeanContext {
    fn lookup(&self, class_name: &str) -> ContainerResult<Object> {
        Ok(Arc::new(LookupPlan {
            route: self.route.clone(),
            session_id: self.session_id.clone(),
            class_name: class_name.to_string(),
        }))
    }
}

fn dry_run(
    config: ContextConfig,
    name: &str,
    application: Option<String>,
    session_id: Option<String>,
) -> Result<Arc<LookupPlan>, Box<dyn std::error::Error>> {
    let container = Arc::new(RecordingContainer);
    let mut context = InitialContext::new(config)?
        .with_local_factory(container.clone())
        .with_remote_factory(container);

    if let Some(application) = application {
        context = context.with_application(Arc::new(NamedApplication(application)));
    }
    if session_id.is_some() {
        context = context.with_request(Arc::new(CliRequest { session_id }));
    }

    let bean = context.lookup(name)?;
    let plan = bean
        .downcast::<LookupPlan>()
        .map_err(|_| "recording container returned an unexpected bean")?;
    Ok(plan)
}

pub fn run(
    config: ContextConfig,
    name: &str,
    application: Option<String>,
    session_id: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let plan = dry_run(config, name, application, session_id)?;

    tracing::info!("Resolved {} to {:?}", name, plan.route);
    println!("{}", serde_json::to_string_pretty(&*plan)?);
    Ok(())
}
