//! Tokenizer for JNDI style bean identifiers such as
//! `php:global/example/UserProcessor/remote`.
//!
//! Each rule is a regex anchored at the scan position. The scanner walks the
//! input once from left to right and takes the longest match at every
//! position; equally long matches go to the rule listed first.

mod token;

pub use token::{Token, TokenKind};

use naming_api::{NamingError, NamingResult};
use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_SCHEME: &str = "php";

const WORD: &str = "[A-Za-z0-9_]";

static DEFAULT_TOKENIZER: Lazy<Tokenizer> = Lazy::new(|| {
    Tokenizer::with_schemes(&[DEFAULT_SCHEME])
        .expect("Failed to compile default identifier rules - this is a fatal error")
});

/// Tokenize with the default rule set (scheme keyword `php`).
pub fn tokenize(input: &str) -> NamingResult<Vec<Token>> {
    DEFAULT_TOKENIZER.tokenize(input)
}

#[derive(Debug, Clone)]
struct Rule {
    kind: TokenKind,
    pattern: Regex,
}

#[derive(Debug, Clone)]
pub struct Tokenizer {
    rules: Vec<Rule>,
    schemes: Vec<String>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        DEFAULT_TOKENIZER.clone()
    }
}

impl Tokenizer {
    /// Build a tokenizer recognizing the given literal scheme keywords.
    pub fn with_schemes<S: AsRef<str>>(schemes: &[S]) -> NamingResult<Self> {
        let schemes: Vec<String> = schemes
            .iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if schemes.is_empty() {
            return Err(NamingError::Config(
                "at least one scheme keyword is required".to_string(),
            ));
        }

        let scheme_alternation = schemes
            .iter()
            .map(|s| regex::escape(s))
            .collect::<Vec<_>>()
            .join("|");

        let table = [
            (TokenKind::Scheme, format!("(?:{scheme_alternation})")),
            (TokenKind::GlobalScope, format!("global/({WORD}+)")),
            (TokenKind::ApplicationScope, "app".to_string()),
            (TokenKind::Colon, ":".to_string()),
            (TokenKind::Separator, "/".to_string()),
            (TokenKind::Interface, "(?:local|remote)".to_string()),
            (TokenKind::Class, format!("{WORD}+")),
        ];

        let mut rules = Vec::with_capacity(table.len());
        for (kind, pattern) in table {
            let pattern = Regex::new(&format!("^{pattern}"))
                .map_err(|e| NamingError::Config(format!("invalid {kind} rule: {e}")))?;
            rules.push(Rule { kind, pattern });
        }

        Ok(Self { rules, schemes })
    }

    pub fn schemes(&self) -> &[String] {
        &self.schemes
    }

    pub fn tokenize(&self, input: &str) -> NamingResult<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut pos = 0;

        while pos < input.len() {
            let rest = &input[pos..];
            let token = self.longest_match(rest, pos).ok_or_else(|| {
                NamingError::MalformedIdentifier {
                    fragment: rest.to_string(),
                    name: input.to_string(),
                }
            })?;
            pos += token.lexeme.len();
            tokens.push(token);
        }

        tracing::trace!("Tokenized {:?} into {} tokens", input, tokens.len());
        Ok(tokens)
    }

    fn longest_match(&self, rest: &str, offset: usize) -> Option<Token> {
        let mut best: Option<Token> = None;

        for rule in &self.rules {
            let Some(caps) = rule.pattern.captures(rest) else {
                continue;
            };
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let len = whole.len();
            if len == 0 || best.as_ref().is_some_and(|b| b.lexeme.len() >= len) {
                continue;
            }

            let mut token = Token::new(rule.kind, whole.as_str(), offset);
            if let Some(sub) = caps.get(1) {
                token = token.with_capture(sub.as_str());
            }
            best = Some(token);
        }

        best
    }
}
