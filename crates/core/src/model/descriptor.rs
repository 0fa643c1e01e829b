use crate::lexer::{Token, TokenKind};
use naming_api::{NamingError, NamingResult, Properties, PropertySource, RemoteEndpoint};
use serde::Serialize;
use std::fmt;

pub const PROPERTY_SCHEME: &str = "scheme";
pub const PROPERTY_HOST: &str = "host";
pub const PROPERTY_PORT: &str = "port";
pub const PROPERTY_CONTEXT_NAME: &str = "contextName";
pub const PROPERTY_CLASS_NAME: &str = "className";
pub const PROPERTY_INTERFACE: &str = "interface";
pub const PROPERTY_INDEX_FILE: &str = "indexFile";

/// Business interface requested by an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Interface {
    Local,
    Remote,
    #[default]
    Unset,
}

impl Interface {
    pub const LOCAL_KEYWORD: &'static str = "local";
    pub const REMOTE_KEYWORD: &'static str = "remote";

    /// Map an interface keyword; anything else is not an interface.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            Self::LOCAL_KEYWORD => Some(Interface::Local),
            Self::REMOTE_KEYWORD => Some(Interface::Remote),
            _ => None,
        }
    }

    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Interface::Local => Some(Self::LOCAL_KEYWORD),
            Interface::Remote => Some(Self::REMOTE_KEYWORD),
            Interface::Unset => None,
        }
    }
}

/// The parsed form of a bean identifier.
///
/// Populated once, either from a complete property set or from the tokens of
/// an identifier string layered over default properties, and read-only after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    scheme: String,
    host: Option<String>,
    port: Option<u16>,
    context_name: Option<String>,
    class_name: String,
    interface: Interface,
    index_file: Option<String>,
}

impl ResourceDescriptor {
    /// Build a descriptor from an already complete set of properties.
    pub fn from_properties(properties: &dyn PropertySource) -> NamingResult<Self> {
        Self::populate(properties, None)
    }

    /// Build a descriptor from the tokens of `name`, starting from `defaults`.
    ///
    /// `name` must open with `<scheme>:<scope>`; everything after that only
    /// overrides the seeded values.
    pub fn from_tokens(name: &str, tokens: &[Token], defaults: &Properties) -> NamingResult<Self> {
        check_shape(name, tokens)?;

        let mut properties = defaults.clone();
        for token in tokens {
            match token.kind {
                TokenKind::Scheme => properties.set(PROPERTY_SCHEME, token.lexeme.as_str()),
                TokenKind::Interface => properties.set(PROPERTY_INTERFACE, token.lexeme.as_str()),
                // Later class tokens overwrite earlier ones.
                TokenKind::Class => properties.set(PROPERTY_CLASS_NAME, token.lexeme.as_str()),
                TokenKind::GlobalScope => {
                    if let Some(context_name) = &token.capture {
                        properties.set(PROPERTY_CONTEXT_NAME, context_name.as_str());
                    }
                }
                TokenKind::ApplicationScope | TokenKind::Colon | TokenKind::Separator => {}
            }
        }

        Self::populate(&properties, Some(name))
    }

    fn populate(properties: &dyn PropertySource, name: Option<&str>) -> NamingResult<Self> {
        let value = |key: &str| {
            properties
                .get(key)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let scheme = value(PROPERTY_SCHEME).ok_or_else(|| NamingError::InvalidProperty {
            key: PROPERTY_SCHEME.to_string(),
            value: String::new(),
        })?;

        let port = match value(PROPERTY_PORT) {
            Some(raw) => Some(raw.parse::<u16>().map_err(|_| NamingError::InvalidProperty {
                key: PROPERTY_PORT.to_string(),
                value: raw.clone(),
            })?),
            None => None,
        };

        let interface = match value(PROPERTY_INTERFACE) {
            Some(raw) => Interface::from_keyword(&raw).ok_or(NamingError::InvalidProperty {
                key: PROPERTY_INTERFACE.to_string(),
                value: raw,
            })?,
            None => Interface::Unset,
        };

        let class_name = value(PROPERTY_CLASS_NAME).ok_or_else(|| NamingError::MissingClassName {
            name: name.unwrap_or("<properties>").to_string(),
        })?;

        Ok(Self {
            scheme,
            host: value(PROPERTY_HOST),
            port,
            context_name: value(PROPERTY_CONTEXT_NAME),
            class_name,
            interface,
            index_file: value(PROPERTY_INDEX_FILE),
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn context_name(&self) -> Option<&str> {
        self.context_name.as_deref()
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn interface(&self) -> Interface {
        self.interface
    }

    pub fn index_file(&self) -> Option<&str> {
        self.index_file.as_deref()
    }

    pub fn is_local(&self) -> bool {
        self.interface == Interface::Local
    }

    pub fn is_remote(&self) -> bool {
        self.interface == Interface::Remote
    }

    /// Connection target for a remote lookup.
    pub fn remote_endpoint(&self) -> RemoteEndpoint {
        RemoteEndpoint {
            port: self.port,
            address: self.host.clone(),
            transport: self.scheme.clone(),
            app_name: self.context_name.clone(),
        }
    }

    /// Render back into identifier syntax.
    pub fn to_identifier(&self) -> String {
        let mut identifier = format!("{}:", self.scheme);
        match &self.context_name {
            Some(context_name) => {
                identifier.push_str("global/");
                identifier.push_str(context_name);
            }
            None => identifier.push_str("app"),
        }
        identifier.push('/');
        identifier.push_str(&self.class_name);
        if let Some(keyword) = self.interface.keyword() {
            identifier.push('/');
            identifier.push_str(keyword);
        }
        identifier
    }
}

impl fmt::Display for ResourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_identifier())
    }
}

/// An identifier has to open with `<scheme>:<scope>`.
fn check_shape(name: &str, tokens: &[Token]) -> NamingResult<()> {
    let expected: [fn(TokenKind) -> bool; 3] = [
        |kind| kind == TokenKind::Scheme,
        |kind| kind == TokenKind::Colon,
        |kind| kind.is_scope(),
    ];

    for (i, accepts) in expected.iter().enumerate() {
        let fragment = match tokens.get(i) {
            Some(token) if accepts(token.kind) => continue,
            Some(token) => name[token.offset..].to_string(),
            None => name.to_string(),
        };
        return Err(NamingError::MalformedIdentifier {
            fragment,
            name: name.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse(name: &str) -> NamingResult<ResourceDescriptor> {
        let tokens = tokenize(name)?;
        ResourceDescriptor::from_tokens(name, &tokens, &Properties::new())
    }

    #[test]
    fn test_global_scope_identifier() {
        let descriptor = parse("php:global/example/UserProcessor/remote").unwrap();
        assert_eq!(descriptor.scheme(), "php");
        assert_eq!(descriptor.context_name(), Some("example"));
        assert_eq!(descriptor.class_name(), "UserProcessor");
        assert_eq!(descriptor.interface(), Interface::Remote);
        assert!(descriptor.is_remote());
        assert!(!descriptor.is_local());
    }

    #[test]
    fn test_application_scope_leaves_context_unset() {
        let descriptor = parse("php:app/UserProcessor/local").unwrap();
        assert_eq!(descriptor.context_name(), None);
        assert_eq!(descriptor.class_name(), "UserProcessor");
        assert!(descriptor.is_local());
    }

    #[test]
    fn test_missing_interface_is_unset() {
        let descriptor = parse("php:app/UserProcessor").unwrap();
        assert_eq!(descriptor.interface(), Interface::Unset);
        assert!(!descriptor.is_local());
        assert!(!descriptor.is_remote());
    }

    #[test]
    fn test_last_class_token_wins() {
        let descriptor = parse("php:global/example/Legacy/UserProcessor/local").unwrap();
        assert_eq!(descriptor.class_name(), "UserProcessor");
    }

    #[test]
    fn test_defaults_survive_unless_overridden() {
        let defaults: Properties = [
            ("scheme", "php"),
            ("host", "127.0.0.1"),
            ("port", "8585"),
            ("indexFile", "index.pc"),
            ("interface", "local"),
        ]
        .into_iter()
        .collect();

        let name = "php:app/UserProcessor";
        let tokens = tokenize(name).unwrap();
        let descriptor = ResourceDescriptor::from_tokens(name, &tokens, &defaults).unwrap();
        assert_eq!(descriptor.host(), Some("127.0.0.1"));
        assert_eq!(descriptor.port(), Some(8585));
        assert_eq!(descriptor.index_file(), Some("index.pc"));
        assert!(descriptor.is_local());

        let name = "php:app/UserProcessor/remote";
        let tokens = tokenize(name).unwrap();
        let descriptor = ResourceDescriptor::from_tokens(name, &tokens, &defaults).unwrap();
        assert!(descriptor.is_remote());
    }

    #[test]
    fn test_bare_class_name_is_malformed() {
        match parse("UserProcessor").unwrap_err() {
            NamingError::MalformedIdentifier { fragment, name } => {
                assert_eq!(fragment, "UserProcessor");
                assert_eq!(name, "UserProcessor");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_scope_is_malformed() {
        match parse("php:UserProcessor/local").unwrap_err() {
            NamingError::MalformedIdentifier { fragment, .. } => {
                assert_eq!(fragment, "UserProcessor/local");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            parse("php:").unwrap_err(),
            NamingError::MalformedIdentifier { .. }
        ));
    }

    #[test]
    fn test_missing_class_name() {
        assert!(matches!(
            parse("php:global/example").unwrap_err(),
            NamingError::MissingClassName { name } if name == "php:global/example"
        ));
    }

    #[test]
    fn test_from_properties() {
        let properties: Properties = [
            ("scheme", "php"),
            ("host", "10.0.0.7"),
            ("port", "9090"),
            ("contextName", "example"),
            ("className", "UserProcessor"),
            ("interface", "remote"),
        ]
        .into_iter()
        .collect();

        let descriptor = ResourceDescriptor::from_properties(&properties).unwrap();
        assert_eq!(
            descriptor.remote_endpoint(),
            RemoteEndpoint {
                port: Some(9090),
                address: Some("10.0.0.7".to_string()),
                transport: "php".to_string(),
                app_name: Some("example".to_string()),
            }
        );
        assert_eq!(
            descriptor.to_identifier(),
            "php:global/example/UserProcessor/remote"
        );
    }

    #[test]
    fn test_from_properties_rejects_bad_values() {
        let properties: Properties = [("scheme", "php"), ("className", "Foo"), ("port", "http")]
            .into_iter()
            .collect();
        assert!(matches!(
            ResourceDescriptor::from_properties(&properties).unwrap_err(),
            NamingError::InvalidProperty { key, .. } if key == "port"
        ));

        let properties: Properties = [("scheme", "php"), ("className", "Foo"), ("interface", "both")]
            .into_iter()
            .collect();
        assert!(matches!(
            ResourceDescriptor::from_properties(&properties).unwrap_err(),
            NamingError::InvalidProperty { key, .. } if key == "interface"
        ));

        let properties: Properties = [("scheme", "php")].into_iter().collect();
        assert!(matches!(
            ResourceDescriptor::from_properties(&properties).unwrap_err(),
            NamingError::MissingClassName { .. }
        ));
    }

    #[test]
    fn test_identifier_round_trip_for_app_scope() {
        let descriptor = parse("php:app/UserProcessor").unwrap();
        assert_eq!(descriptor.to_string(), "php:app/UserProcessor");
    }
}
