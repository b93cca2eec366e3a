use std::fmt;

use serde::Serialize;

/// Token classes produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Punctuation,
    Operator,
    String,
    Integer,
    Float,
    Identifier,
    /// `#include`, `#iChannel<n>`, `#iKeyboard`, `#iUniform`.
    PreprocessorKeyword,
    /// Texture setting words such as `MinFilter` or `in`.
    Keyword,
    /// GLSL scalar and vector type names.
    Type,
    Unknown,
}

/// Payload carried by a token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TokenValue {
    Text(String),
    Number(f64),
}

impl TokenValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
}

impl Token {
    pub fn text(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: TokenValue::Text(value.into()),
        }
    }

    pub fn number(kind: TokenKind, value: f64) -> Self {
        Self {
            kind,
            value: TokenValue::Number(value),
        }
    }

    pub fn is(&self, kind: TokenKind, value: &str) -> bool {
        self.kind == kind && self.value.as_str() == Some(value)
    }
}

/// Character offsets bracketing a token, `begin` inclusive and `end` exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LineRange {
    pub begin: usize,
    pub end: usize,
}

impl LineRange {
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }
}
