use naming_api::RequestContext;
use uuid::Uuid;

/// A fresh, random session id (UUID v4).
pub fn generate_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// Reuse the inbound request's session id, or make one up so stateful beans
/// always get some session affinity.
pub fn resolve_session_id(request: Option<&dyn RequestContext>) -> String {
    request
        .and_then(|r| r.session_id())
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(generate_session_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use naming_api::Application;
    use std::collections::HashSet;
    use std::sync::Arc;

    struct Request(Option<&'static str>);

    impl RequestContext for Request {
        fn session_id(&self) -> Option<String> {
            self.0.map(str::to_string)
        }

        fn application(&self) -> Option<Arc<dyn Application>> {
            None
        }
    }

    #[test]
    fn test_request_session_is_reused() {
        let request = Request(Some("abc123"));
        assert_eq!(resolve_session_id(Some(&request)), "abc123");
    }

    #[test]
    fn test_generated_ids_are_uuids() {
        let request = Request(Some("  "));
        let id = resolve_session_id(Some(&request));
        assert!(Uuid::parse_str(&id).is_ok());

        let id = resolve_session_id(None);
        assert_eq!(Uuid::parse_str(&id).unwrap().get_version_num(), 4);
    }

    #[test]
    fn test_generated_ids_do_not_collide() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_session_id()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
