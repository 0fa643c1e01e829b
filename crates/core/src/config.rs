use crate::lexer::{DEFAULT_SCHEME, Tokenizer};
use naming_api::{NamingError, NamingResult, Properties};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration of an [`InitialContext`](crate::context::InitialContext).
///
/// Loaded values are layered over the defaults, so a config file only needs
/// the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Literal scheme keywords the tokenizer recognizes.
    pub schemes: Vec<String>,
    /// Default descriptor properties, overridden by identifier tokens.
    pub properties: Properties,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            schemes: vec![DEFAULT_SCHEME.to_string()],
            properties: default_properties(),
        }
    }
}

/// No `interface` default: an identifier without an interface segment stays
/// unresolved unless a config sets one.
pub fn default_properties() -> Properties {
    [
        ("scheme", DEFAULT_SCHEME),
        ("user", "appserver"),
        ("pass", "appserver.i0"),
        ("host", "127.0.0.1"),
        ("port", "8585"),
        ("scope", "app"),
        ("indexFile", "index.pc"),
    ]
    .into_iter()
    .collect()
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    schemes: Option<Vec<String>>,
    properties: Properties,
}

impl ContextConfig {
    pub fn from_json(json: &str) -> NamingResult<Self> {
        let raw: RawConfig = serde_json::from_str(json)?;
        let mut config = ContextConfig::default();
        if let Some(schemes) = raw.schemes {
            config.schemes = schemes;
        }
        config.properties.merge(&raw.properties);
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> NamingResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        tracing::info!("Loaded naming configuration from {}", path.display());
        Ok(config)
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.set(key, value);
        self
    }

    pub fn validate(&self) -> NamingResult<()> {
        if self.schemes.iter().all(|s| s.trim().is_empty()) {
            return Err(NamingError::Config(
                "at least one scheme keyword is required".to_string(),
            ));
        }
        Ok(())
    }

    pub fn tokenizer(&self) -> NamingResult<Tokenizer> {
        if self.schemes.len() == 1 && self.schemes[0] == DEFAULT_SCHEME {
            return Ok(Tokenizer::default());
        }
        Tokenizer::with_schemes(self.schemes.as_slice())
    }
}
