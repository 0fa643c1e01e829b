use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Scheme,
    GlobalScope,
    ApplicationScope,
    Colon,
    Separator,
    Interface,
    Class,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Scheme => "SCHEME",
            TokenKind::GlobalScope => "GLOBAL_SCOPE",
            TokenKind::ApplicationScope => "APPLICATION_SCOPE",
            TokenKind::Colon => "COLON",
            TokenKind::Separator => "SEPARATOR",
            TokenKind::Interface => "INTERFACE",
            TokenKind::Class => "CLASS",
        }
    }

    pub fn is_scope(&self) -> bool {
        matches!(self, TokenKind::GlobalScope | TokenKind::ApplicationScope)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified slice of an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    /// Byte offset of the lexeme within the scanned input.
    pub offset: usize,
    /// Sub-match of the rule, e.g. the context name of `global/<name>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture: Option<String>,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            offset,
            capture: None,
        }
    }

    pub fn with_capture(mut self, capture: impl Into<String>) -> Self {
        self.capture = Some(capture.into());
        self
    }
}
